//! CFNDSL Runner - Task Arguments to Compiler Invocation
//!
//! # Contract
//! 1. Validation runs before anything is spawned
//! 2. The same request always builds the same argv
//! 3. One synchronous compiler run per call, never retried
//! 4. Every failure is reported as a result, never raised

pub mod request;
pub mod validation;
pub mod command;
pub mod runner;
pub mod result;
pub mod hashing;
pub mod docs;
pub mod pipeline;

pub use request::{DefineValue, InvocationRequest, OutputFormat, ParamFiles, ParamKind};
pub use validation::{validate_args, TaskArgs};
pub use command::{CompilerCommand, DEFAULT_PROGRAM};
pub use runner::{CompilerConfig, ProcessOutput, ProcessRunner, SystemRunner};
pub use result::InvocationResult;
pub use hashing::{canonical_json, invocation_hash};
pub use docs::MODULE_DOC;
pub use pipeline::{InvocationPipeline, PipelineError};

pub const RUNNER_VERSION: &str = env!("CARGO_PKG_VERSION");
