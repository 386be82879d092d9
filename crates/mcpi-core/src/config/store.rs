//! Config store for loading and saving the host configuration document.

use std::path::{Path, PathBuf};

use super::{ConfigDocument, ServerEntry};

#[derive(Debug, Clone)]
pub struct ConfigStore {
    config_path: PathBuf,
}

impl ConfigStore {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> ConfigDocument {
        ConfigDocument::load_or_default(&self.config_path)
    }

    pub fn save(&self, document: &ConfigDocument) -> anyhow::Result<()> {
        document.save(&self.config_path)
    }

    /// One read-merge-write cycle registering every given entry.
    ///
    /// Not guarded against concurrent writers; the last writer wins.
    pub fn register_servers(&self, entries: &[(String, ServerEntry)]) -> anyhow::Result<()> {
        let mut document = self.load();
        for (name, entry) in entries {
            document.upsert_server(name, entry)?;
            tracing::info!(server = %name, command = %entry.command, "Registered server");
        }
        self.save(&document)
    }
}
