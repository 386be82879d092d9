//! `package.json` schema
//!
//! Only the fields that decide how a local package is launched are read:
//! `name`, `main`, and `bin`. Everything else in the manifest is ignored.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use super::server_key;

/// Manifest file that marks a directory as an installable package.
pub const MANIFEST_FILE: &str = "package.json";

/// Entry module npm assumes when `main` is not declared.
const DEFAULT_MAIN: &str = "index.js";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageManifest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub main: Option<String>,

    /// Executables exposed by the package
    #[serde(default)]
    pub bin: Option<BinField>,
}

/// `bin` is either a single path (named after the package) or a name → path map.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BinField {
    Single(String),
    Named(BTreeMap<String, String>),
}

/// A launchable script discovered in a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutableTarget {
    pub name: String,
    pub script: PathBuf,
}

impl PackageManifest {
    /// Read `package.json` from `dir`, or `None` when the directory has none.
    pub fn load(dir: &Path) -> anyhow::Result<Option<Self>> {
        let path = dir.join(MANIFEST_FILE);
        if !path.is_file() {
            return Ok(None);
        }
        let bytes = std::fs::read(&path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        let manifest = Self::from_slice(&bytes)
            .with_context(|| format!("Failed to parse manifest: {}", path.display()))?;
        Ok(Some(manifest))
    }

    pub fn from_slice(bytes: &[u8]) -> anyhow::Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Executable targets with scripts resolved against `package_dir`.
    ///
    /// Declared `bin` entries win; without any, the package's `main` module
    /// becomes a single target named after the package.
    pub fn executables(&self, package_dir: &Path) -> Vec<ExecutableTarget> {
        let declared: Vec<(String, &str)> = match &self.bin {
            Some(BinField::Single(script)) => {
                vec![(self.display_name(package_dir), script.as_str())]
            }
            Some(BinField::Named(map)) => map
                .iter()
                .map(|(name, script)| (name.clone(), script.as_str()))
                .collect(),
            None => Vec::new(),
        };

        if declared.is_empty() {
            let main = self.main.as_deref().unwrap_or(DEFAULT_MAIN);
            return vec![ExecutableTarget {
                name: self.display_name(package_dir),
                script: resolve_against(package_dir, main),
            }];
        }

        declared
            .into_iter()
            .map(|(name, script)| ExecutableTarget {
                name,
                script: resolve_against(package_dir, script),
            })
            .collect()
    }

    fn display_name(&self, package_dir: &Path) -> String {
        match self.name.as_deref().filter(|name| !name.is_empty()) {
            Some(name) => server_key(name).to_string(),
            None => package_dir
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| "server".to_string()),
        }
    }
}

fn resolve_against(base: &Path, relative: &str) -> PathBuf {
    base.join(relative)
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}
