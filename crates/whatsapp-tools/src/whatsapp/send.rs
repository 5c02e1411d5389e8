//! Text message delivery tools.

use crate::error::ToolError;
use crate::gateway::Gateway;
use crate::types::{Tool, ToolDefinition};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

const MESSAGE_DESCRIPTION: &str =
    "Conteúdo da mensagem. Pode conter texto formatado, emojis e quebras de linha.";

/// Sends a text message to a WhatsApp group.
pub struct SendMessageToGroupTool {
    gateway: Arc<Gateway>,
}

#[derive(Deserialize)]
struct SendToGroupArgs {
    group_id: String,
    message: String,
}

impl SendMessageToGroupTool {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl Tool for SendMessageToGroupTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "send_message_to_group".into(),
            description: "Envia uma mensagem de texto para um grupo específico do WhatsApp. \
                Retorna \"Mensagem enviada com sucesso\" ou \"Erro ao enviar mensagem: <descrição>\"."
                .into(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "group_id": {
                        "type": "string",
                        "description": "Identificador do grupo no formato 'XXXXXXXXXXXXXXXXX@g.us', obtido com get_groups"
                    },
                    "message": {
                        "type": "string",
                        "description": MESSAGE_DESCRIPTION
                    }
                },
                "required": ["group_id", "message"]
            }),
        }
    }

    fn name(&self) -> &str {
        "send_message_to_group"
    }

    async fn execute(&self, arguments: &str) -> Result<String, ToolError> {
        let args: SendToGroupArgs = super::parse_args(arguments)?;
        Ok(self
            .gateway
            .send_message_to_group(&args.group_id, &args.message)
            .await)
    }
}

/// Sends a text message to a phone number registered on WhatsApp.
pub struct SendMessageToPhoneTool {
    gateway: Arc<Gateway>,
}

#[derive(Deserialize)]
struct SendToPhoneArgs {
    cellphone: String,
    message: String,
}

impl SendMessageToPhoneTool {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl Tool for SendMessageToPhoneTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "send_message_to_phone".into(),
            description: "Envia uma mensagem de texto para um número de telefone via WhatsApp. \
                A mensagem só é entregue se o número estiver registrado no WhatsApp. \
                Retorna \"Mensagem enviada com sucesso\" ou \"Erro ao enviar mensagem: <descrição>\"."
                .into(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "cellphone": {
                        "type": "string",
                        "description": "Número no formato internacional, só dígitos, com código do país e DDD \
                            (ex.: '5511999999999'). Se faltar o código do país, coloque 55 na frente; \
                            o DDD deve ser informado pelo usuário."
                    },
                    "message": {
                        "type": "string",
                        "description": MESSAGE_DESCRIPTION
                    }
                },
                "required": ["cellphone", "message"]
            }),
        }
    }

    fn name(&self) -> &str {
        "send_message_to_phone"
    }

    async fn execute(&self, arguments: &str) -> Result<String, ToolError> {
        let args: SendToPhoneArgs = super::parse_args(arguments)?;
        Ok(self
            .gateway
            .send_message_to_phone(&args.cellphone, &args.message)
            .await)
    }
}
