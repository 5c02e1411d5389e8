//! Evolution API HTTP client.

use crate::error::EvolutionError;
use crate::time::TimeZoneSetting;
use crate::types::*;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use urlencoding::encode;

/// Evolution API client bound to a single WhatsApp instance.
///
/// The API key is stored using `SecretString` to prevent accidental
/// exposure in logs or debug output. Cloning is cheap and shares the
/// underlying connection pool.
#[derive(Clone)]
pub struct EvolutionClient {
    client: Client,
    base_url: String,
    api_key: SecretString,
    instance: String,
    time_zone: TimeZoneSetting,
}

impl EvolutionClient {
    /// Create a new Evolution client.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        instance: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, EvolutionError> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url,
            api_key: SecretString::new(api_key.into()),
            instance: instance.into(),
            time_zone: TimeZoneSetting::default(),
        })
    }

    /// Set the zone used to interpret message window bounds.
    pub fn with_time_zone(mut self, time_zone: TimeZoneSetting) -> Self {
        self.time_zone = time_zone;
        self
    }

    /// Get the configured instance name.
    pub fn instance(&self) -> &str {
        &self.instance
    }

    /// Get the configured time zone.
    pub fn time_zone(&self) -> TimeZoneSetting {
        self.time_zone
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, path, encode(&self.instance))
    }

    /// Check if the Evolution API is reachable.
    pub async fn health_check(&self) -> bool {
        self.client
            .get(&self.base_url)
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    /// Get the WhatsApp connection state of the instance (e.g. `open`).
    #[instrument(skip(self), fields(instance = %self.instance))]
    pub async fn connection_state(&self) -> Result<String, EvolutionError> {
        let response = self
            .client
            .get(self.endpoint("instance/connectionState"))
            .header("apikey", self.api_key.expose_secret())
            .send()
            .await?;

        let state: ConnectionStateResponse = Self::decode(response).await?;
        Ok(state.instance.state)
    }

    /// List all groups the instance participates in.
    #[instrument(skip(self), fields(instance = %self.instance))]
    pub async fn fetch_groups(&self) -> Result<Vec<Group>, EvolutionError> {
        let response = self
            .client
            .get(self.endpoint("group/fetchAllGroups"))
            .query(&[("getParticipants", "false")])
            .header("apikey", self.api_key.expose_secret())
            .send()
            .await?;

        let records: Vec<GroupRecord> = Self::decode(response).await?;
        debug!("Fetched {} groups", records.len());
        Ok(records.into_iter().map(Group::from).collect())
    }

    /// Fetch the messages of a chat whose timestamp lies in `[start, end]`.
    ///
    /// Bounds are epoch seconds, both inclusive. Records the API returns
    /// outside the window or for another chat are dropped; order is kept.
    #[instrument(skip(self), fields(instance = %self.instance))]
    pub async fn find_messages(
        &self,
        remote_jid: &str,
        start: i64,
        end: i64,
    ) -> Result<Vec<Message>, EvolutionError> {
        let request = FindMessagesRequest {
            filter: MessageFilter {
                key: KeyFilter {
                    remote_jid: remote_jid.to_string(),
                },
                message_timestamp: TimestampRange { gte: start, lte: end },
            },
        };

        let response = self
            .client
            .post(self.endpoint("chat/findMessages"))
            .header("apikey", self.api_key.expose_secret())
            .json(&request)
            .send()
            .await?;

        let body: FindMessagesResponse = Self::decode(response).await?;
        let messages: Vec<Message> = body
            .into_messages()
            .into_iter()
            .filter(|m| (start..=end).contains(&m.message_timestamp))
            .filter(|m| m.remote_jid().map_or(true, |jid| jid == remote_jid))
            .collect();

        debug!("Found {} messages", messages.len());
        Ok(messages)
    }

    /// Send a text message to a group JID or phone number.
    #[instrument(skip(self, number, text), fields(instance = %self.instance))]
    pub async fn send_text(&self, number: &str, text: &str) -> Result<(), EvolutionError> {
        let request = SendTextRequest {
            number: number.to_string(),
            text: text.to_string(),
        };

        let response = self
            .client
            .post(self.endpoint("message/sendText"))
            .header("apikey", self.api_key.expose_secret())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let msg = if body.trim().is_empty() {
                status.to_string()
            } else {
                body
            };
            warn!("Send failed: {}", msg);
            return Err(EvolutionError::SendFailed(msg));
        }

        debug!("Sent message to {}", number);
        Ok(())
    }

    // Body is read first so malformed payloads surface as `EvolutionError::Json`.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, EvolutionError> {
        let body = Self::check(response).await?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn check(response: Response) -> Result<Response, EvolutionError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "Evolution API error: {}", message);
        Err(EvolutionError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
