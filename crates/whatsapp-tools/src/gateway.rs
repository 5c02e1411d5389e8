//! Delegation and text rendering for the WhatsApp operations.

use crate::error::ToolError;
use evolution_client::{Group, GroupRepository, Message, MessageSender, TimeZoneSetting};
use std::sync::Arc;
use tracing::{info, warn};

/// Returned when a message was accepted for delivery.
pub const SEND_SUCCESS: &str = "Mensagem enviada com sucesso";

/// Prefix of the text returned when delivery fails.
pub const SEND_ERROR_PREFIX: &str = "Erro ao enviar mensagem: ";

const MESSAGE_SEPARATOR: &str = "Mensagem -----------------------------------";

/// Routes tool operations to the repository and sender, rendering plain text.
///
/// Holds no mutable state; every call goes straight to the collaborators.
pub struct Gateway {
    repository: Arc<dyn GroupRepository>,
    sender: Arc<dyn MessageSender>,
    time_zone: TimeZoneSetting,
}

impl Gateway {
    /// Create a new gateway rendering timestamps in the local time zone.
    pub fn new(repository: Arc<dyn GroupRepository>, sender: Arc<dyn MessageSender>) -> Self {
        Self {
            repository,
            sender,
            time_zone: TimeZoneSetting::default(),
        }
    }

    /// Set the zone used to render message timestamps.
    pub fn with_time_zone(mut self, time_zone: TimeZoneSetting) -> Self {
        self.time_zone = time_zone;
        self
    }

    /// One `Grupo ID: <id>, Nome: <name>` line per group.
    pub async fn get_groups(&self) -> Result<String, ToolError> {
        let groups = self.repository.fetch_groups().await?;
        Ok(format_groups(&groups))
    }

    /// Formatted history of a group between two `YYYY-MM-DD HH:MM:SS` bounds.
    pub async fn get_group_messages(
        &self,
        group_id: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<String, ToolError> {
        let messages = self
            .repository
            .get_messages(group_id, start_date, end_date)
            .await?;
        Ok(format_messages(&messages, &self.time_zone))
    }

    pub async fn send_message_to_group(&self, group_id: &str, message: &str) -> String {
        self.send(group_id, message).await
    }

    pub async fn send_message_to_phone(&self, cellphone: &str, message: &str) -> String {
        self.send(cellphone, message).await
    }

    // Delivery failures never escape: they become the error literal.
    async fn send(&self, recipient: &str, message: &str) -> String {
        match self.sender.send_text(recipient, message).await {
            Ok(()) => {
                info!(recipient = %mask_recipient(recipient), "Message sent");
                SEND_SUCCESS.to_string()
            }
            Err(e) => {
                warn!(recipient = %mask_recipient(recipient), error = %e, "Message not sent");
                format!("{}{}", SEND_ERROR_PREFIX, e)
            }
        }
    }
}

// Keeps the last four characters; phone numbers stay out of info/warn logs.
fn mask_recipient(recipient: &str) -> String {
    let count = recipient.chars().count();
    recipient
        .chars()
        .enumerate()
        .map(|(i, c)| if i + 4 < count { '*' } else { c })
        .collect()
}

/// Render groups in the order given.
pub fn format_groups(groups: &[Group]) -> String {
    let mut out = String::new();
    for group in groups {
        out.push_str(&format!(
            "Grupo ID: {}, Nome: {}\n",
            group.group_id, group.name
        ));
    }
    out
}

/// Render messages as five-line blocks in the order given.
pub fn format_messages(messages: &[Message], time_zone: &TimeZoneSetting) -> String {
    let mut out = String::new();
    for message in messages {
        out.push_str(MESSAGE_SEPARATOR);
        out.push('\n');
        out.push_str(&format!("Usuário: {}\n", message.push_name));
        out.push_str(&format!(
            "Data e hora: {}\n",
            time_zone.format_timestamp(message.message_timestamp)
        ));
        out.push_str(&format!("Tipo: {}\n", message.message_type));
        out.push_str(&format!("Texto: {}\n", message.text()));
    }
    out
}
