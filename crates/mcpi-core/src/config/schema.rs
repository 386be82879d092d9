//! Typed view of a single `mcpServers` entry.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::runtime::RunnerSpec;

/// Launch specification the host uses to start a registered server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerEntry {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    /// `None` and an empty map are persisted differently: the former omits
    /// the field, the latter writes `"env": {}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<BTreeMap<String, String>>,
}

impl ServerEntry {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
            env: None,
        }
    }

    pub fn with_env(mut self, env: Option<BTreeMap<String, String>>) -> Self {
        self.env = env;
        self
    }
}

impl From<RunnerSpec> for ServerEntry {
    fn from(spec: RunnerSpec) -> Self {
        Self {
            command: spec.command,
            args: spec.args,
            env: spec.env,
        }
    }
}
