//! Host configuration document with read-merge-write semantics.

use std::path::Path;

use anyhow::Context;
use serde_json::{Map, Value};

use super::ServerEntry;

/// Top-level field holding the registered servers.
pub const SERVERS_FIELD: &str = "mcpServers";

/// In-memory copy of the host's JSON configuration.
///
/// Only the `mcpServers` entries being installed are ever touched; every
/// other key round-trips unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigDocument {
    root: Map<String, Value>,
}

impl ConfigDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the document, falling back to an empty one when the file is
    /// missing, unreadable, not JSON, or not a JSON object.
    pub fn load_or_default(path: &Path) -> Self {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %path.display(), error = %err, "Unreadable config, starting empty");
                }
                return Self::new();
            }
        };
        Self::from_slice(&bytes).unwrap_or_else(|| {
            tracing::warn!(path = %path.display(), "Config is not a JSON object, starting empty");
            Self::new()
        })
    }

    /// Parse a document, returning `None` unless the root is a JSON object.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        match serde_json::from_slice(bytes) {
            Ok(Value::Object(root)) => Some(Self { root }),
            _ => None,
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    /// Registered servers, or an empty map when the field is absent or malformed.
    pub fn servers(&self) -> Map<String, Value> {
        match self.root.get(SERVERS_FIELD) {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        }
    }

    pub fn server(&self, name: &str) -> Option<ServerEntry> {
        let value = self.root.get(SERVERS_FIELD)?.get(name)?;
        serde_json::from_value(value.clone()).ok()
    }

    /// Insert or replace a single server entry.
    pub fn upsert_server(&mut self, name: &str, entry: &ServerEntry) -> anyhow::Result<()> {
        let value = serde_json::to_value(entry)
            .with_context(|| format!("Failed to serialize server entry: {}", name))?;
        let mut servers = self.servers();
        servers.insert(name.to_string(), value);
        self.root
            .insert(SERVERS_FIELD.to_string(), Value::Object(servers));
        Ok(())
    }

    /// Write the whole document back, pretty-printed.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let bytes =
            serde_json::to_vec_pretty(&self.root).context("Failed to serialize JSON config")?;
        std::fs::write(path, bytes)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_empty() {
        let temp = TempDir::new().unwrap();
        let doc = ConfigDocument::load_or_default(&temp.path().join("absent.json"));
        assert!(doc.as_map().is_empty());
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let doc = ConfigDocument::load_or_default(&path);

        assert_eq!(doc, ConfigDocument::new());
    }

    #[test]
    fn non_object_root_loads_empty() {
        assert!(ConfigDocument::from_slice(b"[1, 2, 3]").is_none());
        assert!(ConfigDocument::from_slice(b"\"text\"").is_none());
    }

    #[test]
    fn upsert_replaces_malformed_servers_field() {
        let mut doc = ConfigDocument::from_slice(br#"{"mcpServers": 7, "theme": "dark"}"#).unwrap();

        doc.upsert_server("demo", &ServerEntry::new("npx", vec!["demo".to_string()]))
            .unwrap();

        assert_eq!(
            serde_json::Value::Object(doc.as_map().clone()),
            json!({
                "mcpServers": {"demo": {"command": "npx", "args": ["demo"]}},
                "theme": "dark"
            })
        );
    }

    #[test]
    fn upsert_keeps_sibling_servers() {
        let mut doc = ConfigDocument::from_slice(
            br#"{"mcpServers": {"user": {"command": "echo", "args": []}}}"#,
        )
        .unwrap();

        doc.upsert_server("demo", &ServerEntry::new("uvx", vec!["demo".to_string()]))
            .unwrap();

        let servers = doc.servers();
        assert_eq!(servers.len(), 2);
        assert_eq!(servers["user"], json!({"command": "echo", "args": []}));
        assert_eq!(doc.server("demo").unwrap().command, "uvx");
    }

    #[test]
    fn save_creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("dir").join("config.json");
        let mut doc = ConfigDocument::new();
        doc.upsert_server("demo", &ServerEntry::new("npx", vec![]))
            .unwrap();

        doc.save(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\n  \"mcpServers\""));
        assert_eq!(ConfigDocument::load_or_default(&path), doc);
    }
}
