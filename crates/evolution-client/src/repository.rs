//! Collaborator interfaces consumed by the tool layer.

use crate::client::EvolutionClient;
use crate::error::EvolutionError;
use crate::types::{Group, Message};
use async_trait::async_trait;

/// Source of groups and their message history.
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// List every group visible to the account.
    async fn fetch_groups(&self) -> Result<Vec<Group>, EvolutionError>;

    /// Messages of `group_id` between two `YYYY-MM-DD HH:MM:SS` bounds, inclusive.
    async fn get_messages(
        &self,
        group_id: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<Message>, EvolutionError>;
}

/// Outbound text delivery.
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Send `message` to a group JID or a phone number.
    async fn send_text(&self, recipient: &str, message: &str) -> Result<(), EvolutionError>;
}

#[async_trait]
impl GroupRepository for EvolutionClient {
    async fn fetch_groups(&self) -> Result<Vec<Group>, EvolutionError> {
        EvolutionClient::fetch_groups(self).await
    }

    async fn get_messages(
        &self,
        group_id: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<Message>, EvolutionError> {
        let start = self.time_zone().parse_datetime(start_date)?;
        let end = self.time_zone().parse_datetime(end_date)?;
        self.find_messages(group_id, start, end).await
    }
}

#[async_trait]
impl MessageSender for EvolutionClient {
    async fn send_text(&self, recipient: &str, message: &str) -> Result<(), EvolutionError> {
        EvolutionClient::send_text(self, recipient, message).await
    }
}
