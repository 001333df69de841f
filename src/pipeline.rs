//! Invocation Pipeline - Single Entry Point
//!
//! validate -> build -> run -> map. Every error becomes an
//! [`InvocationResult`]; nothing escapes `execute`.

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::command::CompilerCommand;
use crate::hashing::invocation_hash;
use crate::request::InvocationRequest;
use crate::result::InvocationResult;
use crate::runner::{CompilerConfig, ProcessOutput, ProcessRunner, SystemRunner};
use crate::validation::{check_request, validate_args, TaskArgs};

/// Task argument the automation engine sets when running in check mode.
pub const CHECK_MODE_ARG: &str = "_ansible_check_mode";

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("src and dest are required")]
    MissingArgument,

    #[error("unsupported output format")]
    UnsupportedFormat,

    #[error("{}", invalid_type_message(.0))]
    InvalidType(&'static str),

    #[error("{stdout}  {stderr}")]
    CompilerFailure {
        rc: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error("failed to execute {program}: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

fn invalid_type_message(field: &str) -> String {
    match field {
        "defines" => "defines must be a dict".to_string(),
        "yaml" | "ruby" | "json" => format!("{} variables can only be a list or string", field),
        "pretty" | "disable_binding" => format!("{} must be a boolean", field),
        _ => format!("{} must be a string", field),
    }
}

impl PipelineError {
    fn from_output(output: ProcessOutput) -> Self {
        Self::CompilerFailure {
            rc: output.code,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Drives one compiler invocation per call. Holds no per-call state.
pub struct InvocationPipeline<R = SystemRunner> {
    config: CompilerConfig,
    runner: R,
}

impl InvocationPipeline<SystemRunner> {
    pub fn new(config: CompilerConfig) -> Self {
        Self::with_runner(config, SystemRunner)
    }
}

impl<R: ProcessRunner> InvocationPipeline<R> {
    pub fn with_runner(config: CompilerConfig, runner: R) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Validate raw task arguments, then execute.
    ///
    /// `_ansible_check_mode: true` short-circuits to a skipped result
    /// before validation.
    pub fn execute_args(&self, args: &TaskArgs) -> InvocationResult {
        if is_check_mode(args) {
            return self.execute_check_mode();
        }

        match validate_args(args) {
            Ok(request) => self.execute(&request),
            Err(err) => {
                warn!(error = %err, "task arguments rejected");
                InvocationResult::failure(err.to_string())
            }
        }
    }

    /// Build and run the compiler for a request.
    ///
    /// Required paths are re-checked here; an empty source or destination
    /// is never spawned.
    pub fn execute(&self, request: &InvocationRequest) -> InvocationResult {
        if let Err(err) = check_request(request) {
            warn!(error = %err, "request rejected");
            return InvocationResult::failure(err.to_string());
        }

        let command = self.build(request);
        let argv = command.argv();
        let hash = invocation_hash(&command).ok();

        match self.run(&command) {
            Ok(rc) => {
                info!(source = %request.source, destination = %request.destination, "compiled");
                InvocationResult::changed()
                    .with_command(argv, hash)
                    .with_rc(Some(rc))
            }
            Err(err) => {
                warn!(error = %err, "compilation failed");
                let rc = match &err {
                    PipelineError::CompilerFailure { rc, .. } => *rc,
                    _ => None,
                };
                InvocationResult::failure(err.to_string())
                    .with_command(argv, hash)
                    .with_rc(rc)
            }
        }
    }

    /// Result for a call made in check mode; nothing is spawned.
    pub fn execute_check_mode(&self) -> InvocationResult {
        info!("check mode requested, skipping");
        InvocationResult::skipped()
    }

    pub fn build(&self, request: &InvocationRequest) -> CompilerCommand {
        let command = CompilerCommand::build(&self.config.program, request);
        debug!(argv = ?command.argv(), "built compiler invocation");
        command
    }

    fn run(&self, command: &CompilerCommand) -> Result<i32, PipelineError> {
        let output = self
            .runner
            .run(command)
            .map_err(|source| PipelineError::SpawnFailed {
                program: command.program.clone(),
                source,
            })?;

        if output.success() {
            Ok(0)
        } else {
            Err(PipelineError::from_output(output))
        }
    }
}

impl Default for InvocationPipeline<SystemRunner> {
    fn default() -> Self {
        Self::new(CompilerConfig::default())
    }
}

pub fn is_check_mode(args: &TaskArgs) -> bool {
    matches!(args.get(CHECK_MODE_ARG), Some(Value::Bool(true)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(PipelineError::MissingArgument.to_string(), "src and dest are required");
        assert_eq!(PipelineError::UnsupportedFormat.to_string(), "unsupported output format");
        assert_eq!(PipelineError::InvalidType("defines").to_string(), "defines must be a dict");
        assert_eq!(
            PipelineError::InvalidType("yaml").to_string(),
            "yaml variables can only be a list or string"
        );
        assert_eq!(PipelineError::InvalidType("dest").to_string(), "dest must be a string");
    }

    #[test]
    fn test_compiler_failure_concatenates_streams() {
        let err = PipelineError::from_output(ProcessOutput {
            code: Some(1),
            stdout: b"partial".to_vec(),
            stderr: b"syntax error".to_vec(),
        });
        assert_eq!(err.to_string(), "partial  syntax error");
    }
}
