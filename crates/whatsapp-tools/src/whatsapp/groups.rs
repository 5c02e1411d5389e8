//! Group listing tool.

use crate::error::ToolError;
use crate::gateway::Gateway;
use crate::types::{Tool, ToolDefinition};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

/// Lists the WhatsApp groups available to the instance.
pub struct GetGroupsTool {
    gateway: Arc<Gateway>,
}

#[derive(Deserialize)]
struct GetGroupsArgs {}

impl GetGroupsTool {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl Tool for GetGroupsTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "get_groups".into(),
            description: "Recupera e retorna uma lista formatada dos grupos do WhatsApp disponíveis, \
                com o ID e o nome de cada grupo, no formato \"Grupo ID: <id>, Nome: <nome>\". \
                Use o ID retornado para ler mensagens ou enviar mensagens ao grupo."
                .into(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        }
    }

    fn name(&self) -> &str {
        "get_groups"
    }

    async fn execute(&self, arguments: &str) -> Result<String, ToolError> {
        let GetGroupsArgs {} = super::parse_args(arguments)?;
        self.gateway.get_groups().await
    }
}
