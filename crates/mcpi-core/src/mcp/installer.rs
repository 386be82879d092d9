//! MCP server installation pipeline.

use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::config::{ConfigStore, ServerEntry};
use crate::mcp::InstallError;
use crate::package::{PackageManifest, parse_env_assignments, server_key};
use crate::runtime::{RuntimeKind, resolve_package, resolve_script};
use crate::toolchain::Toolchain;

/// Caller-supplied launch options shared by both install paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchOptions {
    /// Extra arguments appended after the package or script.
    pub args: Vec<String>,
    /// `KEY=VALUE` assignments. `None` leaves `env` out of the entry
    /// entirely, `Some(vec![])` writes an empty `env` object.
    pub env: Option<Vec<String>>,
}

impl LaunchOptions {
    pub fn new(args: Vec<String>, env: Option<Vec<String>>) -> Self {
        Self { args, env }
    }
}

/// Report from MCP installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McpInstallReport {
    /// Keys written under `mcpServers`, in registration order.
    pub servers: Vec<String>,
    pub runtime: RuntimeKind,
}

impl McpInstallReport {
    /// Human-readable summary returned to the host.
    pub fn message(&self) -> String {
        match self.runtime {
            RuntimeKind::Npx | RuntimeKind::Uvx => format!(
                "Installed MCP server {} via {} successfully! Tell the user to restart the app",
                self.servers.join(", "),
                self.runtime
            ),
            RuntimeKind::Node => format!(
                "Installed the following servers via npm successfully! {} Tell the user to restart the app",
                self.servers.join(";")
            ),
        }
    }
}

/// MCP server installer.
///
/// Each call performs its own read-merge-write of the config document.
/// Calls are expected to be serialized by the caller.
#[derive(Debug, Clone)]
pub struct McpInstaller<T> {
    store: ConfigStore,
    toolchain: T,
}

impl<T: Toolchain> McpInstaller<T> {
    pub fn new(store: ConfigStore, toolchain: T) -> Self {
        Self { store, toolchain }
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn toolchain(&self) -> &T {
        &self.toolchain
    }

    /// Install a package by registry name.
    ///
    /// npm wins over uvx when a name resolves in both ecosystems.
    pub async fn install_registry_server(
        &self,
        name: &str,
        options: &LaunchOptions,
    ) -> Result<McpInstallReport, InstallError> {
        // Names reach `npm view` as a bare argument and become the entry key
        if name.trim().is_empty() || name.starts_with('-') {
            return Err(InstallError::InvalidPackageName(name.to_string()));
        }

        // 1. The runtime is a hard prerequisite for every path
        if !self.toolchain.has_runtime().await {
            return Err(InstallError::RuntimeMissing);
        }

        // 2. Pick the launcher
        let runtime = if self.toolchain.is_registry_package(name).await {
            RuntimeKind::Npx
        } else if self.toolchain.has_python_launcher().await {
            RuntimeKind::Uvx
        } else {
            return Err(InstallError::PythonLauncherMissing);
        };
        tracing::debug!(package = name, %runtime, "Resolved package launcher");

        // 3. Record the launch command
        let key = server_key(name).to_string();
        let spec = resolve_package(runtime, name, &options.args, parsed_env(options));
        self.store
            .register_servers(&[(key.clone(), ServerEntry::from(spec))])?;

        Ok(McpInstallReport {
            servers: vec![key],
            runtime,
        })
    }

    /// Install a package from a local directory containing a `package.json`.
    pub async fn install_local_server(
        &self,
        path: &Path,
        options: &LaunchOptions,
    ) -> Result<McpInstallReport, InstallError> {
        if !path.exists() {
            return Err(InstallError::PathNotFound(path.to_path_buf()));
        }

        // 1. Find the manifest
        let package_dir = absolute_dir(path)?;
        let manifest = PackageManifest::load(&package_dir)?
            .ok_or_else(|| InstallError::UnknownInstallMethod(path.to_path_buf()))?;

        // 2. Install dependencies
        self.toolchain
            .install_dependencies(&package_dir)
            .await
            .with_context(|| format!("Failed to install dependencies for {}", path.display()))?;

        // 3. Register one server per executable
        let env = parsed_env(options);
        let entries: Vec<(String, ServerEntry)> = manifest
            .executables(&package_dir)
            .into_iter()
            .map(|target| {
                let spec = resolve_script(&target.script, &options.args, env.clone());
                (target.name, ServerEntry::from(spec))
            })
            .collect();
        self.store.register_servers(&entries)?;

        Ok(McpInstallReport {
            servers: entries.into_iter().map(|(name, _)| name).collect(),
            runtime: RuntimeKind::Node,
        })
    }
}

fn parsed_env(options: &LaunchOptions) -> Option<std::collections::BTreeMap<String, String>> {
    options.env.as_deref().map(parse_env_assignments)
}

fn absolute_dir(path: &Path) -> anyhow::Result<PathBuf> {
    let resolved = std::fs::canonicalize(path)
        .with_context(|| format!("Failed to resolve path: {}", path.display()))?;
    // canonicalize yields verbatim `\\?\` paths on Windows, which node rejects
    #[cfg(windows)]
    {
        if let Some(stripped) = resolved.to_str().and_then(|s| s.strip_prefix(r"\\?\")) {
            return Ok(PathBuf::from(stripped));
        }
    }
    Ok(resolved)
}
