//! Validation - Task Arguments to Typed Request
//!
//! Checks run in a fixed order and stop at the first failure:
//! required paths, output format, flags, defines, parameter files.
//! Nothing here spawns a process.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::pipeline::PipelineError;
use crate::request::{DefineValue, InvocationRequest, OutputFormat, ParamFiles, ParamKind};

pub type TaskArgs = Map<String, Value>;

/// Turn raw task arguments into a request, or the first reason they are unusable.
pub fn validate_args(args: &TaskArgs) -> Result<InvocationRequest, PipelineError> {
    let (src, dest) = match (present(args, "src"), present(args, "dest")) {
        (Some(src), Some(dest)) => (src, dest),
        _ => return Err(PipelineError::MissingArgument),
    };

    let mut request = InvocationRequest::new(string_arg(src, "src")?, string_arg(dest, "dest")?);
    request.output_format = output_format(args)?;
    request.pretty = boolean_arg(args, "pretty", false)?;
    request.disable_binding = boolean_arg(args, "disable_binding", true)?;
    request.defines = defines(args)?;

    for kind in ParamKind::ALL {
        *request.params_mut(kind) = param_files(args, kind)?;
    }

    Ok(request)
}

/// Guard for requests that did not come through [`validate_args`].
pub fn check_request(request: &InvocationRequest) -> Result<(), PipelineError> {
    if request.source.is_empty() || request.destination.is_empty() {
        return Err(PipelineError::MissingArgument);
    }
    Ok(())
}

/// A key counts as present when it is neither null nor an empty string.
fn present<'a>(args: &'a TaskArgs, key: &str) -> Option<&'a Value> {
    match args.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(v) => Some(v),
    }
}

fn string_arg(value: &Value, field: &'static str) -> Result<String, PipelineError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or(PipelineError::InvalidType(field))
}

fn output_format(args: &TaskArgs) -> Result<OutputFormat, PipelineError> {
    let raw = ["format", "outformat"]
        .iter()
        .find_map(|key| args.get(*key).filter(|v| !v.is_null()));

    match raw {
        None => Ok(OutputFormat::default()),
        Some(Value::String(s)) => OutputFormat::parse(s).ok_or(PipelineError::UnsupportedFormat),
        Some(_) => Err(PipelineError::UnsupportedFormat),
    }
}

/// Booleans as the automation engine spells them.
fn boolean_arg(args: &TaskArgs, field: &'static str, default: bool) -> Result<bool, PipelineError> {
    match args.get(field) {
        None | Some(Value::Null) => Ok(default),
        Some(Value::Bool(b)) => Ok(*b),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(PipelineError::InvalidType(field)),
        },
        Some(Value::String(s)) => match s.to_ascii_lowercase().as_str() {
            "yes" | "y" | "true" | "on" | "1" => Ok(true),
            "no" | "n" | "false" | "off" | "0" => Ok(false),
            _ => Err(PipelineError::InvalidType(field)),
        },
        Some(_) => Err(PipelineError::InvalidType(field)),
    }
}

fn defines(args: &TaskArgs) -> Result<Option<IndexMap<String, DefineValue>>, PipelineError> {
    let map = match args.get("defines") {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Object(map)) => map,
        Some(_) => return Err(PipelineError::InvalidType("defines")),
    };

    map.iter()
        .map(|(key, value)| {
            let scalar = match value {
                Value::String(s) => DefineValue::Text(s.clone()),
                Value::Number(n) => DefineValue::Number(n.clone()),
                Value::Bool(b) => DefineValue::Bool(*b),
                Value::Null => DefineValue::Null,
                _ => return Err(PipelineError::InvalidType("defines")),
            };
            Ok((key.clone(), scalar))
        })
        .collect::<Result<IndexMap<_, _>, _>>()
        .map(Some)
}

fn param_files(args: &TaskArgs, kind: ParamKind) -> Result<Option<ParamFiles>, PipelineError> {
    match args.get(kind.field()) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(path)) if !path.is_empty() => Ok(Some(ParamFiles::Single(path.clone()))),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().filter(|p| !p.is_empty()).map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .map(|paths| Some(ParamFiles::List(paths)))
            .ok_or(PipelineError::InvalidType(kind.field())),
        Some(_) => Err(PipelineError::InvalidType(kind.field())),
    }
}
