//! WhatsApp tools backed by the [`Gateway`](crate::Gateway).

mod groups;
mod messages;
mod send;

pub use groups::GetGroupsTool;
pub use messages::GetGroupMessagesTool;
pub use send::{SendMessageToGroupTool, SendMessageToPhoneTool};

use crate::error::ToolError;
use crate::gateway::Gateway;
use crate::types::Tool;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// All four WhatsApp tools sharing one gateway, in announcement order.
pub fn all_tools(gateway: Arc<Gateway>) -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(GetGroupsTool::new(gateway.clone())),
        Arc::new(GetGroupMessagesTool::new(gateway.clone())),
        Arc::new(SendMessageToGroupTool::new(gateway.clone())),
        Arc::new(SendMessageToPhoneTool::new(gateway)),
    ]
}

// An empty argument string is treated as an empty object.
fn parse_args<T: DeserializeOwned>(arguments: &str) -> Result<T, ToolError> {
    let arguments = if arguments.trim().is_empty() {
        "{}"
    } else {
        arguments
    };
    serde_json::from_str(arguments).map_err(|e| ToolError::InvalidArguments(e.to_string()))
}
