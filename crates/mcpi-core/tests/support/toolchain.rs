use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use mcpi_core::toolchain::Toolchain;

/// Scripted toolchain that never spawns a process.
#[derive(Debug, Default)]
pub struct FakeToolchain {
    pub runtime: bool,
    pub python_launcher: bool,
    pub registry: HashSet<String>,
    pub fail_dependency_install: bool,
    pub dependency_installs: Mutex<Vec<PathBuf>>,
}

impl FakeToolchain {
    /// Node and uvx present, empty registry.
    pub fn full() -> Self {
        Self {
            runtime: true,
            python_launcher: true,
            ..Self::default()
        }
    }

    pub fn with_registry_package(mut self, name: &str) -> Self {
        self.registry.insert(name.to_string());
        self
    }

    pub fn without_python_launcher(mut self) -> Self {
        self.python_launcher = false;
        self
    }

    pub fn installed_dirs(&self) -> Vec<PathBuf> {
        self.dependency_installs.lock().unwrap().clone()
    }
}

impl Toolchain for FakeToolchain {
    async fn has_runtime(&self) -> bool {
        self.runtime
    }

    async fn has_python_launcher(&self) -> bool {
        self.python_launcher
    }

    async fn is_registry_package(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    async fn install_dependencies(&self, dir: &Path) -> anyhow::Result<()> {
        self.dependency_installs
            .lock()
            .unwrap()
            .push(dir.to_path_buf());
        if self.fail_dependency_install {
            anyhow::bail!("npm install exited with status 1");
        }
        Ok(())
    }
}
