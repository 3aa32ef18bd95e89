use async_trait::async_trait;
use tracing::{debug, warn};

use crate::{ChatRequest, ChatResponse, Message, MessageRole, RelayError};

pub const WELCOME_MESSAGE: &str =
    "Hello! I am a doctor here to help you with your symptoms. Please describe your symptoms to me.";

pub const ERROR_MESSAGE: &str =
    "Sorry, there was an error processing your request. Please check your connection and try again.";

pub const CONFIG_MISSING_MESSAGE: &str =
    "API configuration is missing. Please check your environment variables.";

/// One hop to whatever answers chat turns for a session.
#[async_trait]
pub trait Relay: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, RelayError>;
}

/// Client-side transcript plus the upstream conversation token.
///
/// A turn is split into [`begin`](Self::begin) and [`finish`](Self::finish)
/// so a front-end can render the user message and the loading state before
/// the relay answers. [`submit`](Self::submit) runs both halves.
#[derive(Debug, Default)]
pub struct ConversationSession {
    messages: Vec<Message>,
    conversation_id: String,
    loading: bool,
}

impl ConversationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initialize(&mut self, configured: bool) {
        if !configured {
            self.messages = vec![Message::error(CONFIG_MISSING_MESSAGE)];
            return;
        }
        self.messages = vec![Message::assistant(WELCOME_MESSAGE)];
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn conversation_id(&self) -> &str {
        &self.conversation_id
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Starts a turn. Returns `None` for blank input or while a turn is
    /// already in flight.
    pub fn begin(&mut self, text: &str) -> Option<ChatRequest> {
        let text = text.trim();
        if text.is_empty() || self.loading {
            return None;
        }

        self.messages.push(Message::user(text));
        self.loading = true;

        Some(ChatRequest::new(text, self.conversation_id.as_str()))
    }

    /// Completes the in-flight turn. Runs even if the session was reset in
    /// between; the answer still lands in the current transcript.
    pub fn finish(&mut self, result: Result<ChatResponse, RelayError>) {
        let result = result.and_then(|resp| {
            if resp.answer.is_empty() {
                return Err(RelayError::InvalidResponse("missing answer field".into()));
            }
            Ok(resp)
        });

        match result {
            Ok(resp) => {
                if !resp.conversation_id.is_empty() {
                    self.conversation_id = resp.conversation_id;
                }
                debug!("Turn complete, conversation {}", self.conversation_id);
                self.messages.push(Message::assistant(resp.answer));
            }
            Err(e) => {
                warn!("Chat turn failed: {}", e);
                self.messages.push(Message::error(ERROR_MESSAGE));
            }
        }

        self.loading = false;
    }

    /// Returns whether a turn was started.
    pub async fn submit<R: Relay + ?Sized>(&mut self, relay: &R, text: &str) -> bool {
        let Some(request) = self.begin(text) else {
            return false;
        };

        let result = relay.send(&request).await;
        self.finish(result);
        true
    }

    pub fn reset(&mut self) {
        self.messages = vec![Message::assistant(WELCOME_MESSAGE)];
        self.conversation_id.clear();
    }

    pub fn last_role(&self) -> Option<MessageRole> {
        self.messages.last().map(|m| m.role)
    }
}
