//! Tool catalog and tool-call result envelope.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::mcp::LaunchOptions;

pub const INSTALL_REPO_TOOL: &str = "install_repo_mcp_server";
pub const INSTALL_LOCAL_TOOL: &str = "install_local_mcp_server";

/// Result of a `tools/call`. `isError` is present only on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    Text { text: String },
}

impl ToolResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: None,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: Some(true),
        }
    }

    pub fn is_error(&self) -> bool {
        self.is_error.unwrap_or(false)
    }

    /// Concatenated text of all content blocks.
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .map(|block| match block {
                ToolContent::Text { text } => text.as_str(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InstallRepoArgs {
    pub name: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub env: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InstallLocalArgs {
    pub path: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub env: Option<Vec<String>>,
}

impl InstallRepoArgs {
    pub fn launch_options(&self) -> LaunchOptions {
        LaunchOptions::new(self.args.clone(), self.env.clone())
    }
}

impl InstallLocalArgs {
    pub fn launch_options(&self) -> LaunchOptions {
        LaunchOptions::new(self.args.clone(), self.env.clone())
    }
}

/// Tool descriptors for `tools/list`.
pub fn tool_definitions(local_installs: bool) -> Vec<Value> {
    let mut tools = vec![json!({
        "name": INSTALL_REPO_TOOL,
        "description": "Install an MCP server via npx or uvx",
        "inputSchema": install_schema("name", "The package name of the MCP server"),
    })];
    if local_installs {
        tools.push(json!({
            "name": INSTALL_LOCAL_TOOL,
            "description": "Install an MCP server whose code is cloned locally on your computer",
            "inputSchema": install_schema(
                "path",
                "The path to the MCP server code cloned on your computer",
            ),
        }));
    }
    tools
}

fn install_schema(target: &str, target_description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            target: {
                "type": "string",
                "description": target_description,
            },
            "args": {
                "type": "array",
                "items": {"type": "string"},
                "description": "The arguments to pass along",
            },
            "env": {
                "type": "array",
                "items": {"type": "string"},
                "description": "The environment variables to set, delimited by =",
            },
        },
        "required": [target],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_result_has_no_error_flag() {
        let value = serde_json::to_value(ToolResult::text("done")).unwrap();
        assert_eq!(value, json!({"content": [{"type": "text", "text": "done"}]}));
    }

    #[test]
    fn error_result_sets_flag() {
        let value = serde_json::to_value(ToolResult::error("nope")).unwrap();
        assert_eq!(
            value,
            json!({"content": [{"type": "text", "text": "nope"}], "isError": true})
        );
    }

    #[test]
    fn catalog_hides_local_tool_when_disabled() {
        let names: Vec<_> = tool_definitions(false)
            .iter()
            .map(|tool| tool["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec![INSTALL_REPO_TOOL.to_string()]);

        assert_eq!(tool_definitions(true).len(), 2);
    }

    #[test]
    fn schema_requires_target_field() {
        let tools = tool_definitions(true);
        assert_eq!(tools[0]["inputSchema"]["required"], json!(["name"]));
        assert_eq!(tools[1]["inputSchema"]["required"], json!(["path"]));
    }

    #[test]
    fn repo_args_distinguish_missing_and_empty_env() {
        let missing: InstallRepoArgs = serde_json::from_value(json!({"name": "pkg"})).unwrap();
        assert!(missing.env.is_none());

        let empty: InstallRepoArgs =
            serde_json::from_value(json!({"name": "pkg", "env": []})).unwrap();
        assert_eq!(empty.env, Some(vec![]));
    }
}
