//! Invocation Request - Typed Task Arguments
//!
//! Produced once by validation, consumed by the command builder.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Output format handed to the compiler via `-f`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Yaml,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Json
    }
}

impl OutputFormat {
    /// Case-insensitive parse; only `json` and `yaml` are recognised.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_uppercase().as_str() {
            "JSON" => Some(Self::Json),
            "YAML" => Some(Self::Yaml),
            _ => None,
        }
    }

    pub fn as_flag_value(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

/// External parameter files: one path or an ordered list of paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamFiles {
    Single(String),
    List(Vec<String>),
}

impl ParamFiles {
    pub fn paths(&self) -> &[String] {
        match self {
            Self::Single(path) => std::slice::from_ref(path),
            Self::List(paths) => paths,
        }
    }
}

/// Kind of external parameter file, in the order the compiler receives them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Yaml,
    Ruby,
    Json,
}

impl ParamKind {
    pub const ALL: [ParamKind; 3] = [ParamKind::Yaml, ParamKind::Ruby, ParamKind::Json];

    /// Task argument key.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Ruby => "ruby",
            Self::Json => "json",
        }
    }

    pub fn flag(&self) -> &'static str {
        match self {
            Self::Yaml => "-y",
            Self::Ruby => "-r",
            Self::Json => "-j",
        }
    }
}

/// Scalar value of a define. Rendered the way the compiler's host
/// language spells literals: `True`, `False`, `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefineValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for DefineValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("None"),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A validated request. Construct through `validation::validate_args`
/// or directly with [`InvocationRequest::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationRequest {
    pub source: String,
    pub destination: String,
    #[serde(default)]
    pub output_format: OutputFormat,
    #[serde(default)]
    pub pretty: bool,
    #[serde(default = "default_true")]
    pub disable_binding: bool,
    #[serde(default)]
    pub yaml_params: Option<ParamFiles>,
    #[serde(default)]
    pub ruby_params: Option<ParamFiles>,
    #[serde(default)]
    pub json_params: Option<ParamFiles>,
    #[serde(default)]
    pub defines: Option<IndexMap<String, DefineValue>>,
}

fn default_true() -> bool { true }

impl InvocationRequest {
    /// Request with every optional field at its default.
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            output_format: OutputFormat::default(),
            pretty: false,
            disable_binding: true,
            yaml_params: None,
            ruby_params: None,
            json_params: None,
            defines: None,
        }
    }

    pub fn params(&self, kind: ParamKind) -> &[String] {
        let files = match kind {
            ParamKind::Yaml => &self.yaml_params,
            ParamKind::Ruby => &self.ruby_params,
            ParamKind::Json => &self.json_params,
        };
        files.as_ref().map(ParamFiles::paths).unwrap_or(&[])
    }

    pub fn params_mut(&mut self, kind: ParamKind) -> &mut Option<ParamFiles> {
        match kind {
            ParamKind::Yaml => &mut self.yaml_params,
            ParamKind::Ruby => &mut self.ruby_params,
            ParamKind::Json => &mut self.json_params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_case_insensitive() {
        assert_eq!(OutputFormat::parse("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("YaMl"), Some(OutputFormat::Yaml));
        assert_eq!(OutputFormat::parse("xml"), None);
        assert_eq!(OutputFormat::parse(" json"), None);
    }

    #[test]
    fn test_single_param_is_one_element_sequence() {
        let mut request = InvocationRequest::new("sqs.rb", "/tmp/sqs.json");
        *request.params_mut(ParamKind::Ruby) = Some(ParamFiles::Single("params.rb".into()));

        assert_eq!(request.params(ParamKind::Ruby), ["params.rb".to_string()]);
        assert!(request.params(ParamKind::Yaml).is_empty());
    }

    #[test]
    fn test_define_value_display() {
        assert_eq!(DefineValue::Text("myqueue".into()).to_string(), "myqueue");
        assert_eq!(DefineValue::Number(5.into()).to_string(), "5");
        assert_eq!(DefineValue::Bool(false).to_string(), "False");
        assert_eq!(DefineValue::Bool(true).to_string(), "True");
        assert_eq!(DefineValue::Null.to_string(), "None");
    }
}
