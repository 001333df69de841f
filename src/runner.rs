//! Process Runner - Child Process Boundary
//!
//! The pipeline only talks to the compiler through [`ProcessRunner`],
//! so tests can substitute a double and observe every spawn.

use std::io;
use std::process::{Command, Stdio};

use crate::command::{CompilerCommand, DEFAULT_PROGRAM};

/// Environment variable overriding the compiler program.
pub const COMPILER_ENV: &str = "CFNDSL_COMPILER";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerConfig {
    pub program: String,
}

impl CompilerConfig {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }

    /// `CFNDSL_COMPILER` when set and non-empty, otherwise `cfndsl`.
    pub fn from_env() -> Self {
        match std::env::var(COMPILER_ENV) {
            Ok(program) if !program.trim().is_empty() => Self::new(program),
            _ => Self::default(),
        }
    }
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

/// Everything observed from a finished child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// `None` when the child was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

pub trait ProcessRunner {
    /// Run to completion with no stdin, capturing both output streams.
    fn run(&self, command: &CompilerCommand) -> io::Result<ProcessOutput>;
}

/// Spawns real child processes; the environment is inherited.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, command: &CompilerCommand) -> io::Result<ProcessOutput> {
        let output = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .output()?;

        Ok(ProcessOutput {
            code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}
