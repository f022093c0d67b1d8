use serde::{Deserialize, Serialize};

use crate::chat::ChatDispatcher;
use crate::models::{ChatMessage, UserProfile};

/// Request body for creating a chat session.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    /// Client profile used to personalize the assistant persona. Omit to use
    /// the bundled demo profile.
    #[serde(default)]
    pub client_profile: Option<UserProfile>,
}

/// Snapshot of a chat session and its transcript.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    pub session_id: String,
    /// Whether the chat panel is currently open.
    pub open: bool,
    /// Whether a submission is currently awaiting its reply.
    pub in_flight: bool,
    /// Transcript in append order, starting with the greeting.
    pub messages: Vec<ChatMessage>,
}

impl SessionDto {
    pub fn from_dispatcher(session_id: impl Into<String>, dispatcher: &ChatDispatcher) -> Self {
        Self {
            session_id: session_id.into(),
            open: dispatcher.is_open(),
            in_flight: dispatcher.is_in_flight(),
            messages: dispatcher.messages(),
        }
    }
}

/// Request body for submitting a user message.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub content: String,
}

/// The assistant reply produced for one submission.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub session_id: String,
    pub reply: ChatMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_session_request_accepts_empty_body() {
        let req: CreateSessionRequest = serde_json::from_str("{}").expect("deserialize");
        assert!(req.client_profile.is_none());
    }

    #[test]
    fn create_session_request_accepts_profile() {
        let req: CreateSessionRequest = serde_json::from_value(serde_json::json!({
            "clientProfile": {
                "name": "Sam Rivera",
                "products": ["Pension"],
                "portfolioValue": 10000.0
            }
        }))
        .expect("deserialize");
        let profile = req.client_profile.expect("profile");
        assert_eq!(profile.name, "Sam Rivera");
    }

    #[test]
    fn session_dto_serializes_camel_case() {
        let dto = SessionDto {
            session_id: "abc".to_string(),
            open: true,
            in_flight: false,
            messages: vec![],
        };
        let json = serde_json::to_value(&dto).expect("serialize");
        assert_eq!(json["sessionId"], "abc");
        assert_eq!(json["inFlight"], false);
    }
}
