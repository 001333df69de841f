//! Invocation Result - Record Returned to the Automation Engine

use serde::{Deserialize, Serialize};

pub const CHECK_MODE_MESSAGE: &str = "skipped, this module does not support check_mode.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationResult {
    pub changed: bool,
    pub failed: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub skipped: bool,
    #[serde(rename = "msg", default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmd: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rc: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invocation_hash: Option<String>,
}

impl InvocationResult {
    pub fn changed() -> Self {
        Self {
            changed: true,
            ..Self::default()
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            failed: true,
            message: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn skipped() -> Self {
        Self {
            skipped: true,
            message: Some(CHECK_MODE_MESSAGE.to_string()),
            ..Self::default()
        }
    }

    pub fn with_command(mut self, cmd: Vec<String>, invocation_hash: Option<String>) -> Self {
        self.cmd = Some(cmd);
        self.invocation_hash = invocation_hash;
        self
    }

    pub fn with_rc(mut self, rc: Option<i32>) -> Self {
        self.rc = rc;
        self
    }
}
