//! cfndsl-task - Bridge interface for the automation engine
//!
//! Commands: run, build, describe
//! Outputs JSON to stdout, logs to stderr
//! Returns 2 on a failed result, 1 on unreadable arguments

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

use cfndsl_runner::{
    validate_args, CompilerConfig, InvocationPipeline, TaskArgs, MODULE_DOC, RUNNER_VERSION,
};

#[derive(Parser)]
#[command(name = "cfndsl-task")]
#[command(about = "cfndsl-task - CFNDSL compile task runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Compiler program (defaults to $CFNDSL_COMPILER, then `cfndsl`)
    #[arg(short, long, global = true)]
    compiler: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate task arguments and run the compiler
    Run {
        #[command(flatten)]
        input: TaskInput,

        /// Report a skipped result without running anything
        #[arg(long)]
        check: bool,
    },

    /// Validate task arguments and print the compiler argv without running it
    Build {
        #[command(flatten)]
        input: TaskInput,
    },

    /// Print the module documentation
    Describe,
}

#[derive(Args)]
struct TaskInput {
    /// JSON file holding the task arguments
    args_file: Option<PathBuf>,

    /// Task arguments as inline JSON
    #[arg(short, long, conflicts_with = "args_file")]
    payload: Option<String>,
}

impl TaskInput {
    fn load(&self) -> Result<TaskArgs, String> {
        let raw = match (&self.args_file, &self.payload) {
            (_, Some(payload)) => payload.clone(),
            (Some(path), None) => std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?,
            (None, None) => return Err("No task arguments: pass ARGS_FILE or --payload".to_string()),
        };
        serde_json::from_str(&raw).map_err(|e| format!("Invalid payload: {}", e))
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    let config = cli
        .compiler
        .map(CompilerConfig::new)
        .unwrap_or_else(CompilerConfig::from_env);
    let pipeline = InvocationPipeline::new(config);

    match cli.command {
        Commands::Run { input, check } => {
            let result = if check {
                pipeline.execute_check_mode()
            } else {
                match input.load() {
                    Ok(args) => pipeline.execute_args(&args),
                    Err(e) => return input_error(&e),
                }
            };

            emit(&result);
            if result.failed {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            }
        }

        Commands::Build { input } => {
            let args = match input.load() {
                Ok(a) => a,
                Err(e) => return input_error(&e),
            };

            match validate_args(&args) {
                Ok(request) => {
                    let command = pipeline.build(&request);
                    emit(&serde_json::json!({
                        "cmd": command.argv(),
                        "invocation_hash": cfndsl_runner::invocation_hash(&command).ok(),
                    }));
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    emit(&serde_json::json!({"failed": true, "msg": e.to_string()}));
                    ExitCode::from(2)
                }
            }
        }

        Commands::Describe => {
            emit(&serde_json::json!({
                "runner_version": RUNNER_VERSION,
                "documentation": MODULE_DOC,
            }));
            ExitCode::SUCCESS
        }
    }
}

fn input_error(message: &str) -> ExitCode {
    emit(&serde_json::json!({"failed": true, "msg": message}));
    ExitCode::FAILURE
}

fn emit<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => println!(r#"{{"failed": true, "msg": "Serialization error: {}"}}"#, e),
    }
}

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("cfndsl_runner=debug,cfndsl_task=debug")
        } else {
            EnvFilter::new("cfndsl_runner=warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
