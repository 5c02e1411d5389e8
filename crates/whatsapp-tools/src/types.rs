//! Tool type definitions.

use crate::error::ToolError;
use async_trait::async_trait;

/// Tool definition announced to the agent.
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    /// Tool name (e.g., "get_groups").
    pub name: String,
    /// Human-readable description, including usage guidance for the agent.
    pub description: String,
    /// JSON Schema for parameters.
    pub parameters: serde_json::Value,
}

/// Tool invocation received from the agent runtime.
#[derive(Debug, Clone)]
pub struct ToolCall {
    /// Tool name.
    pub name: String,
    /// JSON object string of arguments.
    pub arguments: String,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: arguments.into(),
        }
    }
}

/// Result of executing a tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResult {
    /// Result content (or error message).
    pub content: String,
    /// Whether execution succeeded.
    pub success: bool,
}

impl ToolResult {
    /// Create a successful result.
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            success: true,
        }
    }

    /// Create an error result.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: message.into(),
            success: false,
        }
    }
}

/// Trait for implementing tools.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool definition for the agent.
    fn definition(&self) -> ToolDefinition;

    /// Get the tool name.
    fn name(&self) -> &str;

    /// Execute the tool with JSON arguments.
    async fn execute(&self, arguments: &str) -> Result<String, ToolError>;
}
