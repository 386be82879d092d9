//! MCP server installation and the stdio tool server exposing it.

pub mod error;
pub mod installer;
pub mod server;

pub use error::InstallError;
pub use installer::{LaunchOptions, McpInstallReport, McpInstaller};
pub use server::{McpServer, ServerSettings};
