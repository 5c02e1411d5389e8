//! Evolution API types.

use serde::{Deserialize, Deserializer, Serialize};

/// A WhatsApp group visible to the instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Group JID, e.g. `120363400728341590@g.us`.
    pub group_id: String,
    /// Group subject.
    pub name: String,
}

/// Group entry returned by `fetchAllGroups`.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupRecord {
    pub id: String,
    #[serde(default)]
    pub subject: Option<String>,
}

impl From<GroupRecord> for Group {
    fn from(record: GroupRecord) -> Self {
        Self {
            group_id: record.id,
            name: record.subject.unwrap_or_default(),
        }
    }
}

/// A stored chat message.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(default)]
    pub key: Option<MessageKey>,
    /// Sender display name.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub push_name: String,
    /// Epoch seconds.
    #[serde(deserialize_with = "epoch_seconds")]
    pub message_timestamp: i64,
    /// Payload tag, e.g. `conversation` or `imageMessage`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message_type: String,
    #[serde(default, rename = "message")]
    pub content: Option<MessageContent>,
}

impl Message {
    /// Display text for the message, whatever its payload encoding.
    ///
    /// Returns an empty string for payloads without any text (stickers,
    /// audio, protocol messages).
    pub fn text(&self) -> &str {
        self.content
            .as_ref()
            .and_then(MessageContent::text)
            .unwrap_or("")
    }

    /// Chat the message belongs to, when the API reported it.
    pub fn remote_jid(&self) -> Option<&str> {
        self.key.as_ref().and_then(|k| k.remote_jid.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageKey {
    pub id: Option<String>,
    pub remote_jid: Option<String>,
    #[serde(default)]
    pub from_me: bool,
    pub participant: Option<String>,
}

/// Message payload. Only one field is normally present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageContent {
    pub conversation: Option<String>,
    pub extended_text_message: Option<TextPayload>,
    pub image_message: Option<MediaPayload>,
    pub video_message: Option<MediaPayload>,
    pub document_message: Option<MediaPayload>,
    pub buttons_response_message: Option<SelectionPayload>,
    pub list_response_message: Option<ListResponsePayload>,
    pub template_button_reply_message: Option<SelectionPayload>,
    pub reaction_message: Option<TextPayload>,
}

impl MessageContent {
    fn text(&self) -> Option<&str> {
        let candidates = [
            self.conversation.as_deref(),
            self.extended_text_message.as_ref().and_then(|m| m.text.as_deref()),
            self.image_message.as_ref().and_then(|m| m.caption.as_deref()),
            self.video_message.as_ref().and_then(|m| m.caption.as_deref()),
            self.document_message.as_ref().and_then(|m| m.caption.as_deref()),
            self.document_message.as_ref().and_then(|m| m.file_name.as_deref()),
            self.buttons_response_message
                .as_ref()
                .and_then(|m| m.selected_display_text.as_deref()),
            self.list_response_message.as_ref().and_then(|m| m.title.as_deref()),
            self.template_button_reply_message
                .as_ref()
                .and_then(|m| m.selected_display_text.as_deref()),
            self.reaction_message.as_ref().and_then(|m| m.text.as_deref()),
        ];

        candidates.into_iter().flatten().find(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextPayload {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaPayload {
    pub caption: Option<String>,
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionPayload {
    pub selected_display_text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListResponsePayload {
    pub title: Option<String>,
}

/// `findMessages` response: paged on API v2, a bare array on v1.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FindMessagesResponse {
    Paged { messages: MessagePage },
    Bare(Vec<Message>),
}

impl FindMessagesResponse {
    pub fn into_messages(self) -> Vec<Message> {
        match self {
            Self::Paged { messages } => messages.records,
            Self::Bare(messages) => messages,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessagePage {
    #[serde(default)]
    pub records: Vec<Message>,
}

/// `findMessages` request body.
#[derive(Debug, Clone, Serialize)]
pub struct FindMessagesRequest {
    #[serde(rename = "where")]
    pub filter: MessageFilter,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageFilter {
    pub key: KeyFilter,
    #[serde(rename = "messageTimestamp")]
    pub message_timestamp: TimestampRange,
}

#[derive(Debug, Clone, Serialize)]
pub struct KeyFilter {
    #[serde(rename = "remoteJid")]
    pub remote_jid: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimestampRange {
    pub gte: i64,
    pub lte: i64,
}

/// Outgoing text message request.
#[derive(Debug, Clone, Serialize)]
pub struct SendTextRequest {
    pub number: String,
    pub text: String,
}

/// Connection state response.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionStateResponse {
    pub instance: InstanceState,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceState {
    pub instance_name: Option<String>,
    pub state: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Number(i64),
    Text(String),
}

// Some API versions serialize the timestamp as a numeric string.
fn epoch_seconds<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawTimestamp::deserialize(deserializer)? {
        RawTimestamp::Number(value) => Ok(value),
        RawTimestamp::Text(value) => value.trim().parse().map_err(serde::de::Error::custom),
    }
}
