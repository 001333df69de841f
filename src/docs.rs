//! Module Documentation - Catalog Metadata
//!
//! Static description of the task options and usage examples, as shown in
//! the automation engine's module catalog. Nothing here affects execution.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct OptionDoc {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
    /// `None` renders as `null`.
    pub default: Option<&'static str>,
    pub aliases: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct ExampleDoc {
    pub name: &'static str,
    pub description: &'static str,
    /// Task arguments, as the engine would pass them.
    pub args: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModuleDoc {
    pub module: &'static str,
    pub short_description: &'static str,
    pub description: &'static [&'static str],
    pub version_added: &'static str,
    pub author: &'static str,
    pub options: &'static [OptionDoc],
    pub examples: &'static [ExampleDoc],
}

pub const MODULE_DOC: ModuleDoc = ModuleDoc {
    module: "cfndsl",
    short_description: "Compiles CFNDSL to Cloudformation",
    description: &["Compiles CFNDSL to CloudFormation"],
    version_added: "2.2",
    author: "Greg Cockburn (@gergnz)",
    options: &[
        OptionDoc {
            name: "src",
            description: "The ruby template to be compiled.",
            required: true,
            default: None,
            aliases: &[],
        },
        OptionDoc {
            name: "dest",
            description: "The destination output of the compiled Cloudformation in JSON or YAML.",
            required: true,
            default: None,
            aliases: &[],
        },
        OptionDoc {
            name: "yaml",
            description: "A list of or single YAML file to use as external parameters.",
            required: false,
            default: None,
            aliases: &[],
        },
        OptionDoc {
            name: "ruby",
            description: "A list of or single RUBY file to use as external parameters.",
            required: false,
            default: None,
            aliases: &[],
        },
        OptionDoc {
            name: "json",
            description: "A list of or single JSON file to use as external parameters.",
            required: false,
            default: None,
            aliases: &[],
        },
        OptionDoc {
            name: "pretty",
            description: "Output pretty JSON.",
            required: false,
            default: Some("false"),
            aliases: &[],
        },
        OptionDoc {
            name: "format",
            description: "Change the output format to be YAML instead of JSON.",
            required: false,
            default: Some("JSON"),
            aliases: &["outformat"],
        },
        OptionDoc {
            name: "defines",
            description: "A mapping of defines to pass to CFNDSL.",
            required: false,
            default: None,
            aliases: &[],
        },
        OptionDoc {
            name: "disable_binding",
            description: "Enable or Disable bindings. (Safe not to)",
            required: false,
            default: Some("true"),
            aliases: &[],
        },
    ],
    examples: &[
        ExampleDoc {
            name: "build a sqs",
            description: "Create a SQS Queue Cloudformation",
            args: r#"{"dest": "/tmp/sqs.json", "src": "cfndsl/sqs.rb"}"#,
        },
        ExampleDoc {
            name: "build sqs with external parameters",
            description: "Create a SQS Queue Cloudformation using external parameters in YAML format",
            args: r#"{"dest": "/tmp/sqs.json", "src": "cfndsl/sqs.rb", "yaml": ["external_parameters/sqs.yml"]}"#,
        },
        ExampleDoc {
            name: "build sqs with defines",
            description: "Create a SQS Queue Cloudformation using defines",
            args: r#"{"dest": "/tmp/sqs.json", "src": "cfndsl/sqs.rb", "defines": {"quename": "myqueue"}}"#,
        },
    ],
};

impl ModuleDoc {
    pub fn option(&self, name: &str) -> Option<&OptionDoc> {
        self.options
            .iter()
            .find(|o| o.name == name || o.aliases.iter().any(|a| *a == name))
    }
}
