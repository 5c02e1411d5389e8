//! Tool executor with error handling.

use crate::registry::ToolRegistry;
use crate::types::{ToolCall, ToolResult};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Executor that dispatches calls to registered tools.
///
/// No timeout is applied here; the HTTP client's own timeout bounds every
/// collaborator call.
pub struct ToolExecutor {
    registry: Arc<ToolRegistry>,
}

impl ToolExecutor {
    /// Create a new executor.
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    /// Registry backing this executor.
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Execute a tool call.
    pub async fn execute(&self, tool_call: &ToolCall) -> ToolResult {
        let tool_name = &tool_call.name;
        info!(tool = %tool_name, "Executing tool");

        let tool = match self.registry.get_tool(tool_name) {
            Some(t) => t,
            None => {
                warn!(tool = %tool_name, "Tool not found or disabled");
                return ToolResult::error(format!("Tool '{}' not available", tool_name));
            }
        };

        match tool.execute(&tool_call.arguments).await {
            Ok(content) => {
                info!(tool = %tool_name, len = content.len(), "Tool executed successfully");
                ToolResult::success(content)
            }
            Err(e) => {
                error!(tool = %tool_name, error = %e, "Tool execution failed");
                ToolResult::error(e.to_string())
            }
        }
    }
}
