//! MCP server exposing the WhatsApp tools over stdio.

use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, Implementation, JsonObject, ListToolsResult,
    PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler};
use tracing::debug;
use whatsapp_tools::{ToolCall, ToolDefinition, ToolExecutor};

/// MCP handler that announces the registered tools and dispatches calls to them.
#[derive(Clone)]
pub struct WhatsAppServer {
    name: String,
    executor: Arc<ToolExecutor>,
}

impl WhatsAppServer {
    pub fn new(name: impl Into<String>, executor: Arc<ToolExecutor>) -> Self {
        Self {
            name: name.into(),
            executor,
        }
    }

    /// Enabled tools as MCP tool descriptors.
    pub fn tools(&self) -> Result<Vec<Tool>, McpError> {
        self.executor
            .registry()
            .get_definitions()
            .into_iter()
            .map(to_mcp_tool)
            .collect()
    }

    /// Run a tool and wrap its text in a call result.
    ///
    /// Tool failures become error results so the agent sees the failure text.
    pub async fn dispatch(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        let arguments = serde_json::Value::Object(arguments.unwrap_or_default()).to_string();
        let result = self.executor.execute(&ToolCall::new(name, arguments)).await;

        debug!(tool = %name, success = result.success, "Tool call finished");
        if result.success {
            CallToolResult::success(vec![Content::text(result.content)])
        } else {
            CallToolResult::error(vec![Content::text(result.content)])
        }
    }
}

fn to_mcp_tool(definition: ToolDefinition) -> Result<Tool, McpError> {
    let input_schema = definition
        .parameters
        .as_object()
        .cloned()
        .ok_or_else(|| {
            McpError::internal_error(
                format!("Schema for {} is not an object", definition.name),
                None,
            )
        })?;

    Ok(Tool::new(
        definition.name,
        definition.description,
        Arc::new(input_schema),
    ))
}

impl ServerHandler for WhatsAppServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.name.clone(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(
                "WhatsApp via Evolution API.\n\n\
                 Tools:\n\
                 - get_groups: list groups and their ids\n\
                 - get_group_messages: read a group's messages between two dates\n\
                 - send_message_to_group: send a text message to a group\n\
                 - send_message_to_phone: send a text message to a phone number\n"
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _pagination: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tools()?,
            meta: Default::default(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.dispatch(&request.name, request.arguments).await)
    }
}
