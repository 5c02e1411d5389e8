//! Group history tool.

use crate::error::ToolError;
use crate::gateway::Gateway;
use crate::types::{Tool, ToolDefinition};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// Reads the messages a group received within a date window.
pub struct GetGroupMessagesTool {
    gateway: Arc<Gateway>,
}

#[derive(Deserialize)]
struct GroupMessagesArgs {
    group_id: String,
    start_date: String,
    end_date: String,
}

impl GetGroupMessagesTool {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl Tool for GetGroupMessagesTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "get_group_messages".into(),
            description: "Recupera as mensagens enviadas em um grupo do WhatsApp dentro de um \
                intervalo de datas. Para cada mensagem retorna usuário, data e hora, tipo da \
                mensagem e texto, separadas por um delimitador visual."
                .into(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "group_id": {
                        "type": "string",
                        "description": "Identificador do grupo, obtido com get_groups (ex.: '120363400728341590@g.us')"
                    },
                    "start_date": {
                        "type": "string",
                        "description": "Data e hora de início no formato 'YYYY-MM-DD HH:MM:SS'"
                    },
                    "end_date": {
                        "type": "string",
                        "description": "Data e hora de término no formato 'YYYY-MM-DD HH:MM:SS'"
                    }
                },
                "required": ["group_id", "start_date", "end_date"]
            }),
        }
    }

    fn name(&self) -> &str {
        "get_group_messages"
    }

    async fn execute(&self, arguments: &str) -> Result<String, ToolError> {
        let args: GroupMessagesArgs = super::parse_args(arguments)?;
        debug!(group_id = %args.group_id, start = %args.start_date, end = %args.end_date, "Reading group history");

        self.gateway
            .get_group_messages(&args.group_id, &args.start_date, &args.end_date)
            .await
    }
}
