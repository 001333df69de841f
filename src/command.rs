//! Command Builder - Request to Compiler Argument Vector
//!
//! Argument order is fixed so the same request always yields the same argv.

use serde::{Deserialize, Serialize};

use crate::request::{InvocationRequest, ParamKind};

pub const DEFAULT_PROGRAM: &str = "cfndsl";

/// A fully assembled compiler invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl CompilerCommand {
    /// Build the argv for `request`:
    /// `program [-p] [-b] -f <fmt> -o <dest> [-D k=v]* [-y p]* [-r p]* [-j p]* <src>`
    pub fn build(program: &str, request: &InvocationRequest) -> Self {
        let mut args = Vec::new();

        if request.pretty {
            args.push("-p".to_string());
        }
        if request.disable_binding {
            args.push("-b".to_string());
        }

        args.push("-f".to_string());
        args.push(request.output_format.as_flag_value().to_string());
        args.push("-o".to_string());
        args.push(request.destination.clone());

        if let Some(defines) = &request.defines {
            for (key, value) in defines {
                args.push("-D".to_string());
                args.push(format!("{}={}", key, value));
            }
        }

        for kind in ParamKind::ALL {
            for path in request.params(kind) {
                args.push(kind.flag().to_string());
                args.push(path.clone());
            }
        }

        args.push(request.source.clone());

        Self {
            program: program.to_string(),
            args,
        }
    }

    /// Program followed by its arguments.
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }
}
