//! MCP stdio server
//!
//! Newline-delimited JSON-RPC over stdin/stdout. Requests are handled one at
//! a time: a line is read, fully processed (including any subprocesses),
//! answered, and only then is the next line read.

pub mod protocol;
pub mod tools;

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::config::ConfigStore;
use crate::mcp::{InstallError, McpInstallReport, McpInstaller};
use crate::toolchain::Toolchain;

use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
use tools::{INSTALL_LOCAL_TOOL, INSTALL_REPO_TOOL, InstallLocalArgs, InstallRepoArgs, ToolResult};

pub const SERVER_NAME: &str = "mcpi";
pub const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";

/// Startup settings, fixed for the lifetime of the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// Host configuration document to write entries into.
    pub config_path: PathBuf,
    /// Whether `install_local_mcp_server` is offered.
    pub local_installs: bool,
}

impl ServerSettings {
    pub fn new(config_path: PathBuf) -> Self {
        Self {
            config_path,
            local_installs: true,
        }
    }

    pub fn registry_only(mut self, registry_only: bool) -> Self {
        self.local_installs = !registry_only;
        self
    }
}

/// MCP server exposing the installer as tools.
#[derive(Debug)]
pub struct McpServer<T> {
    installer: McpInstaller<T>,
    local_installs: bool,
}

impl<T: Toolchain> McpServer<T> {
    pub fn new(settings: ServerSettings, toolchain: T) -> Self {
        let store = ConfigStore::new(settings.config_path);
        Self {
            installer: McpInstaller::new(store, toolchain),
            local_installs: settings.local_installs,
        }
    }

    pub fn config_path(&self) -> &Path {
        self.installer.store().config_path()
    }

    /// Serve on the process's stdin/stdout until stdin closes.
    pub async fn serve_stdio(&self) -> anyhow::Result<()> {
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Serve requests from `reader`, writing responses to `writer`.
    ///
    /// Returns when the reader hits EOF. Only transport I/O errors end the
    /// loop early; request failures are always answered.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        tracing::info!(config = %self.config_path().display(), local_installs = self.local_installs, "MCP server ready");
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .await
                .context("Failed to read request")?;
            if read == 0 {
                break;
            }
            let frame = buf.trim_ascii();
            if frame.is_empty() {
                continue;
            }
            let Some(response) = self.handle_frame(frame).await else {
                continue;
            };
            let mut frame = serde_json::to_vec(&response).context("Failed to encode response")?;
            frame.push(b'\n');
            writer
                .write_all(&frame)
                .await
                .context("Failed to write response")?;
            writer.flush().await.context("Failed to flush response")?;
        }
        tracing::info!("Input closed, shutting down");
        Ok(())
    }

    /// Handle one raw frame. Returns `None` for notifications.
    ///
    /// Frames that are not valid UTF-8 JSON get a parse error reply.
    pub async fn handle_frame(&self, frame: &[u8]) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_slice(frame) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(error = %err, "Discarding malformed frame");
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    JsonRpcError::parse_error(format!("Parse error: {}", err)),
                ));
            }
        };
        // Echo the id back even when the rest of the request is unusable
        let id = value.get("id").cloned().unwrap_or(Value::Null);
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(err) => {
                return Some(JsonRpcResponse::failure(
                    id,
                    JsonRpcError::invalid_request(format!("Invalid request: {}", err)),
                ));
            }
        };
        self.handle_request(request).await
    }

    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        self.handle_frame(line.as_bytes()).await
    }

    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        tracing::debug!(method = %request.method, id = ?request.id, "Handling request");
        let Some(id) = request.id.clone() else {
            // Notifications (`notifications/initialized`, cancellations, ...)
            // need no answer.
            return None;
        };
        let outcome = match request.method.as_str() {
            "initialize" => Ok(self.initialize(&request.params)),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": tools::tool_definitions(self.local_installs) })),
            "tools/call" => self.call_tool(&request.params).await,
            method => Err(JsonRpcError::method_not_found(method)),
        };
        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(id, error),
        })
    }

    fn initialize(&self, params: &Value) -> Value {
        let protocol_version = params
            .get("protocolVersion")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_PROTOCOL_VERSION);
        json!({
            "protocolVersion": protocol_version,
            "capabilities": { "tools": {} },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION"),
            },
        })
    }

    async fn call_tool(&self, params: &Value) -> Result<Value, JsonRpcError> {
        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| JsonRpcError::invalid_params("Missing tool name"))?;
        let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);

        let result = match name {
            INSTALL_REPO_TOOL => match parse_arguments::<InstallRepoArgs>(arguments) {
                Ok(args) => {
                    let outcome = self
                        .installer
                        .install_registry_server(&args.name, &args.launch_options())
                        .await;
                    render_outcome(name, outcome)
                }
                Err(result) => result,
            },
            INSTALL_LOCAL_TOOL if self.local_installs => {
                match parse_arguments::<InstallLocalArgs>(arguments) {
                    Ok(args) => {
                        let outcome = self
                            .installer
                            .install_local_server(Path::new(&args.path), &args.launch_options())
                            .await;
                        render_outcome(name, outcome)
                    }
                    Err(result) => result,
                }
            }
            other => {
                return Err(JsonRpcError::invalid_params(format!(
                    "Unknown tool: {}",
                    other
                )));
            }
        };

        serde_json::to_value(&result)
            .map_err(|err| JsonRpcError::internal_error(err.to_string()))
    }
}

fn parse_arguments<A: DeserializeOwned>(arguments: Value) -> Result<A, ToolResult> {
    serde_json::from_value(arguments)
        .map_err(|err| ToolResult::error(format!("Error: invalid arguments: {}", err)))
}

fn render_outcome(tool: &str, outcome: Result<McpInstallReport, InstallError>) -> ToolResult {
    match outcome {
        Ok(report) => ToolResult::text(report.message()),
        Err(err) => {
            tracing::warn!(tool, error = %err, "Install failed");
            ToolResult::error(err.to_string())
        }
    }
}
