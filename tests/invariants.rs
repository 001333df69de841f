//! Contract Invariant Tests
//!
//! These tests verify the pipeline guarantees against a runner double
//! that records every spawn instead of starting a process.

use std::cell::RefCell;
use std::io;

use cfndsl_runner::{
    CompilerCommand, CompilerConfig, InvocationPipeline, InvocationRequest, InvocationResult,
    ProcessOutput, ProcessRunner, TaskArgs,
};
use serde_json::{json, Value};

struct RecordingRunner {
    calls: RefCell<Vec<CompilerCommand>>,
    outcome: Result<ProcessOutput, io::ErrorKind>,
}

impl RecordingRunner {
    fn exiting(code: i32, stdout: &str, stderr: &str) -> Self {
        Self {
            calls: RefCell::new(vec![]),
            outcome: Ok(ProcessOutput {
                code: Some(code),
                stdout: stdout.as_bytes().to_vec(),
                stderr: stderr.as_bytes().to_vec(),
            }),
        }
    }

    fn unspawnable() -> Self {
        Self {
            calls: RefCell::new(vec![]),
            outcome: Err(io::ErrorKind::NotFound),
        }
    }

    fn spawn_count(&self) -> usize {
        self.calls.borrow().len()
    }

    fn last_argv(&self) -> Vec<String> {
        self.calls.borrow().last().expect("no spawn recorded").argv()
    }
}

impl ProcessRunner for RecordingRunner {
    fn run(&self, command: &CompilerCommand) -> io::Result<ProcessOutput> {
        self.calls.borrow_mut().push(command.clone());
        self.outcome.clone().map_err(io::Error::from)
    }
}

fn pipeline(runner: RecordingRunner) -> InvocationPipeline<RecordingRunner> {
    InvocationPipeline::with_runner(CompilerConfig::default(), runner)
}

fn args(value: Value) -> TaskArgs {
    match value {
        Value::Object(map) => map,
        other => panic!("not an object: {other}"),
    }
}

fn position(argv: &[String], token: &str) -> usize {
    argv.iter().position(|a| a == token).unwrap_or_else(|| panic!("{token} missing from {argv:?}"))
}

#[test]
fn invariant_missing_paths_never_spawn() {
    for raw in [
        json!({"src": "sqs.rb"}),
        json!({"dest": "/tmp/sqs.json"}),
        json!({"src": "", "dest": ""}),
        json!({}),
    ] {
        let pipeline = pipeline(RecordingRunner::exiting(0, "", ""));
        let result = pipeline.execute_args(&args(raw));

        assert!(result.failed);
        assert!(!result.changed);
        assert_eq!(result.message.as_deref(), Some("src and dest are required"));
        assert_eq!(pipeline.runner().spawn_count(), 0);
    }
}

#[test]
fn invariant_direct_request_with_empty_paths_never_spawns() {
    for (src, dest) in [("", "/tmp/sqs.json"), ("sqs.rb", ""), ("", "")] {
        let pipeline = pipeline(RecordingRunner::exiting(0, "", ""));
        let result = pipeline.execute(&InvocationRequest::new(src, dest));

        assert!(result.failed);
        assert!(!result.changed);
        assert_eq!(result.message.as_deref(), Some("src and dest are required"));
        assert_eq!(result.cmd, None);
        assert_eq!(pipeline.runner().spawn_count(), 0);
    }
}

#[test]
fn invariant_unsupported_format_never_spawns() {
    for format in ["xml", "jsonx", "", "YML"] {
        let pipeline = pipeline(RecordingRunner::exiting(0, "", ""));
        let result = pipeline.execute_args(&args(json!({
            "src": "sqs.rb", "dest": "/tmp/sqs.json", "format": format
        })));

        assert!(result.failed, "{format}");
        assert_eq!(result.message.as_deref(), Some("unsupported output format"));
        assert_eq!(pipeline.runner().spawn_count(), 0);
    }
}

#[test]
fn invariant_format_case_variants_normalize() {
    for (format, expected) in [("json", "json"), ("JSON", "json"), ("Yaml", "yaml"), ("yAmL", "yaml")] {
        let pipeline = pipeline(RecordingRunner::exiting(0, "", ""));
        pipeline.execute_args(&args(json!({
            "src": "sqs.rb", "dest": "/tmp/sqs.json", "format": format
        })));

        let argv = pipeline.runner().last_argv();
        assert_eq!(argv.iter().filter(|a| *a == "-f").count(), 1);
        assert_eq!(argv[position(&argv, "-f") + 1], expected);
    }
}

#[test]
fn invariant_define_placed_after_output_before_params() {
    let pipeline = pipeline(RecordingRunner::exiting(0, "", ""));
    pipeline.execute_args(&args(json!({
        "src": "sqs.rb",
        "dest": "/tmp/sqs.json",
        "defines": {"quename": "myqueue"},
        "yaml": "params.yml",
        "ruby": ["params.rb"],
        "json": ["params.json"],
    })));

    let argv = pipeline.runner().last_argv();
    let define = position(&argv, "quename=myqueue");
    assert_eq!(argv.iter().filter(|a| *a == "quename=myqueue").count(), 1);
    assert_eq!(argv[define - 1], "-D");
    assert!(define > position(&argv, "/tmp/sqs.json"));
    assert!(define < position(&argv, "-y"));
    assert!(define < position(&argv, "-r"));
    assert!(define < position(&argv, "-j"));
}

#[test]
fn invariant_define_values_stringified_as_host_literals() {
    let pipeline = pipeline(RecordingRunner::exiting(0, "", ""));
    pipeline.execute_args(&args(json!({
        "src": "a.rb",
        "dest": "b.json",
        "defines": {"flag": true, "quiet": false, "k": null, "delay": 5},
    })));

    assert_eq!(
        pipeline.runner().last_argv(),
        [
            "cfndsl", "-b", "-f", "json", "-o", "b.json",
            "-D", "flag=True", "-D", "quiet=False", "-D", "k=None", "-D", "delay=5",
            "a.rb",
        ]
    );
}

#[test]
fn invariant_yaml_params_keep_order() {
    let pipeline = pipeline(RecordingRunner::exiting(0, "", ""));
    pipeline.execute_args(&args(json!({
        "src": "sqs.rb", "dest": "/tmp/sqs.json", "yaml": ["a.yml", "b.yml"]
    })));

    let argv = pipeline.runner().last_argv();
    let first = position(&argv, "a.yml");
    assert_eq!(argv[first - 1..first + 3], ["-y", "a.yml", "-y", "b.yml"]);
}

#[test]
fn invariant_identical_inputs_identical_results() {
    let raw = args(json!({
        "src": "sqs.rb", "dest": "/tmp/sqs.json", "defines": {"quename": "myqueue", "delay": 5}
    }));

    let pipeline = pipeline(RecordingRunner::exiting(0, "", ""));
    let first = pipeline.execute_args(&raw);
    let second = pipeline.execute_args(&raw);

    assert_eq!(first, second);
    assert!(first.invocation_hash.is_some());
    assert_eq!(pipeline.runner().spawn_count(), 2);
}

#[test]
fn scenario_default_request_succeeds() {
    let pipeline = pipeline(RecordingRunner::exiting(0, "", ""));
    let result = pipeline.execute(&InvocationRequest::new("sqs.rb", "/tmp/sqs.json"));

    assert_eq!(
        pipeline.runner().last_argv(),
        ["cfndsl", "-b", "-f", "json", "-o", "/tmp/sqs.json", "sqs.rb"]
    );
    assert!(result.changed);
    assert!(!result.failed);
    assert_eq!(result.message, None);
    assert_eq!(result.rc, Some(0));
}

#[test]
fn scenario_compiler_failure_reports_output() {
    let pipeline = pipeline(RecordingRunner::exiting(1, "", "syntax error"));
    let result = pipeline.execute_args(&args(json!({"src": "sqs.rb", "dest": "/tmp/sqs.json"})));

    assert!(result.failed);
    assert!(!result.changed);
    assert_eq!(result.message.as_deref(), Some("  syntax error"));
    assert_eq!(result.rc, Some(1));
    assert_eq!(pipeline.runner().spawn_count(), 1);
}

#[test]
fn scenario_compiler_output_not_truncated() {
    let stdout = "x".repeat(64 * 1024);
    let pipeline = pipeline(RecordingRunner::exiting(3, &stdout, "boom"));
    let result = pipeline.execute(&InvocationRequest::new("sqs.rb", "/tmp/sqs.json"));

    assert_eq!(result.message, Some(format!("{stdout}  boom")));
}

#[test]
fn scenario_defines_not_a_map() {
    let pipeline = pipeline(RecordingRunner::exiting(0, "", ""));
    let result = pipeline.execute_args(&args(json!({
        "src": "sqs.rb", "dest": "/tmp/sqs.json", "defines": ["not", "a", "map"]
    })));

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({"changed": false, "failed": true, "msg": "defines must be a dict"})
    );
    assert_eq!(pipeline.runner().spawn_count(), 0);
}

#[test]
fn scenario_check_mode_skips() {
    let pipeline = pipeline(RecordingRunner::exiting(0, "", ""));
    let result = pipeline.execute_args(&args(json!({
        "src": "sqs.rb", "dest": "/tmp/sqs.json", "_ansible_check_mode": true
    })));

    assert_eq!(result, InvocationResult::skipped());
    assert!(!result.failed);
    assert_eq!(pipeline.runner().spawn_count(), 0);
}

#[test]
fn scenario_spawn_failure_is_reported() {
    let pipeline = pipeline(RecordingRunner::unspawnable());
    let result = pipeline.execute(&InvocationRequest::new("sqs.rb", "/tmp/sqs.json"));

    assert!(result.failed);
    assert!(!result.changed);
    assert_eq!(result.rc, None);
    assert!(result.message.unwrap().starts_with("failed to execute cfndsl: "));
}
