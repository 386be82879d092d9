//! External tools the installer depends on.
//!
//! Probes only care whether a process exits successfully. "Not installed",
//! "crashed", and "returned non-zero" all collapse to `false`, and output is
//! discarded.

use std::future::Future;
use std::path::Path;
use std::process::Stdio;

use anyhow::Context;
use tokio::process::Command;

use crate::runtime::{NODE, UVX};

/// npm is spawned through its `.cmd` shim on Windows.
pub const NPM: &str = if cfg!(windows) { "npm.cmd" } else { "npm" };

/// Capability checks and package-manager actions used by the installer.
pub trait Toolchain {
    /// Whether the Node-compatible runtime is available.
    fn has_runtime(&self) -> impl Future<Output = bool> + Send;

    /// Whether the Python package launcher (`uvx`) is available.
    fn has_python_launcher(&self) -> impl Future<Output = bool> + Send;

    /// Whether `name` resolves in the npm registry. Network and lookup
    /// failures are indistinguishable and both yield `false`.
    fn is_registry_package(&self, name: &str) -> impl Future<Output = bool> + Send;

    /// Install a local package's dependencies from its manifest.
    fn install_dependencies(&self, dir: &Path) -> impl Future<Output = anyhow::Result<()>> + Send;
}

/// Toolchain backed by real subprocesses found on `PATH`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemToolchain;

impl SystemToolchain {
    pub fn new() -> Self {
        Self
    }
}

impl Toolchain for SystemToolchain {
    async fn has_runtime(&self) -> bool {
        probe(NODE, &["--version"]).await
    }

    async fn has_python_launcher(&self) -> bool {
        probe(UVX, &["--version"]).await
    }

    async fn is_registry_package(&self, name: &str) -> bool {
        probe(NPM, &["view", name, "version"]).await
    }

    async fn install_dependencies(&self, dir: &Path) -> anyhow::Result<()> {
        tracing::info!(dir = %dir.display(), "Installing package dependencies");
        let status = Command::new(NPM)
            .arg("install")
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .with_context(|| format!("Failed to run {} install in {}", NPM, dir.display()))?;
        if !status.success() {
            anyhow::bail!("{} install failed in {} ({})", NPM, dir.display(), status);
        }
        Ok(())
    }
}

/// Run `program args...` and report whether it exited successfully.
///
/// No timeout is applied; a hung tool hangs the caller.
pub async fn probe(program: &str, args: &[&str]) -> bool {
    let result = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await;

    match result {
        Ok(status) => {
            tracing::debug!(program, ?args, %status, "Probe finished");
            status.success()
        }
        Err(err) => {
            tracing::debug!(program, ?args, error = %err, "Probe failed to spawn");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn probe_missing_program_is_false() {
        assert!(!probe("mcpi-definitely-not-installed-7f3a", &["--version"]).await);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn probe_reflects_exit_status() {
        assert!(probe("sh", &["-c", "exit 0"]).await);
        assert!(!probe("sh", &["-c", "exit 3"]).await);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn install_dependencies_reports_missing_directory() {
        let result = SystemToolchain::new()
            .install_dependencies(Path::new("/nonexistent/mcpi/package"))
            .await;
        assert!(result.is_err());
    }
}
