use serde::{Deserialize, Serialize};

use crate::RelayError;

/// Identity sent upstream for every end user.
pub const UPSTREAM_USER: &str = "user";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: MessageRole::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: MessageRole::Assistant, content: content.into() }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self { role: MessageRole::Error, content: content.into() }
    }
}

// === Relay DTOs ===

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "conversationId", skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, conversation_id: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            conversation_id: Some(conversation_id.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
    #[serde(default)]
    pub conversation_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

// === Upstream DTOs ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseMode {
    Blocking,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpstreamRequest {
    pub inputs: serde_json::Map<String, serde_json::Value>,
    pub query: String,
    pub conversation_id: String,
    pub response_mode: ResponseMode,
    pub user: String,
}

impl UpstreamRequest {
    pub fn blocking(query: &str, conversation_id: &str) -> Self {
        Self {
            inputs: serde_json::Map::new(),
            query: query.to_string(),
            conversation_id: conversation_id.to_string(),
            response_mode: ResponseMode::Blocking,
            user: UPSTREAM_USER.to_string(),
        }
    }
}

/// Loose view of any body that should carry an answer. Both the upstream
/// reply and the relay reply go through this before they are trusted.
#[derive(Debug, Deserialize)]
struct AnswerEnvelope {
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    conversation_id: Option<String>,
}

/// Parses `body` and requires a non-empty string `answer`.
pub fn parse_answer(body: &str) -> Result<ChatResponse, RelayError> {
    let envelope: AnswerEnvelope = serde_json::from_str(body)?;

    match envelope.answer {
        Some(answer) if !answer.is_empty() => Ok(ChatResponse {
            answer,
            conversation_id: envelope.conversation_id.unwrap_or_default(),
        }),
        _ => Err(RelayError::InvalidResponse("missing answer field".into())),
    }
}
