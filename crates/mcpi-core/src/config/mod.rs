//! Host configuration document handling
//!
//! The host reads a single JSON document on startup. Installs merge new
//! entries into its `mcpServers` object and leave everything else alone.

pub mod document;
pub mod paths;
pub mod schema;
pub mod store;

pub use document::{ConfigDocument, SERVERS_FIELD};
pub use paths::{default_config_path, resolve_config_path};
pub use schema::ServerEntry;
pub use store::ConfigStore;
