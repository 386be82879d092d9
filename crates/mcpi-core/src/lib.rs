//! mcpi Core Library
//!
//! Installs MCP servers from the npm registry, uvx, or a local checkout and
//! registers their launch commands in the host's JSON configuration.

pub mod config;
pub mod mcp;
pub mod package;
pub mod runtime;
pub mod toolchain;

/// Re-exports of commonly used types
pub mod prelude {
    // Configuration
    pub use crate::config::{ConfigDocument, ConfigStore, ServerEntry};

    // MCP
    pub use crate::mcp::{
        InstallError, LaunchOptions, McpInstallReport, McpInstaller, McpServer, ServerSettings,
    };

    // Runtime
    pub use crate::runtime::{RunnerSpec, RuntimeKind};

    // Toolchain
    pub use crate::toolchain::{SystemToolchain, Toolchain};
}
