//! Runtime resolution for MCP servers.
//!
//! Turns "what was installed" into the concrete `RunnerSpec` the host will
//! spawn. Nothing here touches the filesystem or runs a process.
//!
//! | Install path           | RuntimeKind | command | args                        |
//! |------------------------|-------------|---------|-----------------------------|
//! | npm registry package   | Npx         | `npx`   | `<package> [extra_args...]` |
//! | Python package         | Uvx         | `uvx`   | `<package> [extra_args...]` |
//! | local package script   | Node        | `node`  | `<script> [extra_args...]`  |

use std::collections::BTreeMap;
use std::path::Path;

/// JS-ecosystem package runner.
pub const NPX: &str = "npx";
/// Python-ecosystem package launcher.
pub const UVX: &str = "uvx";
/// Node-compatible runtime.
pub const NODE: &str = "node";

/// How a registered server is launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeKind {
    Npx,
    Uvx,
    Node,
}

impl RuntimeKind {
    pub fn command(self) -> &'static str {
        match self {
            RuntimeKind::Npx => NPX,
            RuntimeKind::Uvx => UVX,
            RuntimeKind::Node => NODE,
        }
    }
}

impl std::fmt::Display for RuntimeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.command())
    }
}

/// Executable specification - the final output of runtime resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerSpec {
    pub command: String,
    pub args: Vec<String>,
    pub env: Option<BTreeMap<String, String>>,
}

/// Launch a registry package through a package runner (`npx` or `uvx`).
pub fn resolve_package(
    kind: RuntimeKind,
    package: &str,
    extra_args: &[String],
    env: Option<BTreeMap<String, String>>,
) -> RunnerSpec {
    let mut args = vec![package.to_string()];
    args.extend(extra_args.iter().cloned());

    RunnerSpec {
        command: kind.command().to_string(),
        args,
        env,
    }
}

/// Launch a script file directly with the runtime.
pub fn resolve_script(
    script: &Path,
    extra_args: &[String],
    env: Option<BTreeMap<String, String>>,
) -> RunnerSpec {
    let mut args = vec![script.to_string_lossy().to_string()];
    args.extend(extra_args.iter().cloned());

    RunnerSpec {
        command: NODE.to_string(),
        args,
        env,
    }
}
