use chrono::{DateTime, Utc};
use nanoid::nanoid;
use serde::{Deserialize, Serialize};

/// Who produced a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// Which path produced an assistant reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MessageSource {
    /// Served verbatim from the FAQ catalog.
    Faq,
    /// Generated by the fallback completion backend.
    Ai,
}

/// A single entry in a session transcript.
///
/// Messages are append-only and ordered by creation; `id` is a nanoid minted
/// at creation time. `source` and `confidence` are set only on assistant
/// replies (`confidence` only on FAQ hits).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    #[schema(value_type = String)]
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<MessageSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: nanoid!(),
            role: MessageRole::User,
            content: content.into(),
            timestamp: Utc::now(),
            source: None,
            confidence: None,
        }
    }

    /// Assistant message with no producing path, used for the session
    /// greeting.
    pub fn greeting(content: impl Into<String>) -> Self {
        Self {
            id: nanoid!(),
            role: MessageRole::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
            source: None,
            confidence: None,
        }
    }

    pub fn assistant(
        content: impl Into<String>,
        source: MessageSource,
        confidence: Option<u8>,
    ) -> Self {
        Self {
            id: nanoid!(),
            role: MessageRole::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
            source: Some(source),
            confidence,
        }
    }
}
