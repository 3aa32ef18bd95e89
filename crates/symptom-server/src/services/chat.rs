use symptom_core::{ChatRequest, ChatResponse, RelayError};
use tracing::info;

use crate::state::AppState;

/// Configuration is checked before the body is even parsed, so a relay
/// without upstream settings fails every request the same way.
pub async fn relay(state: &AppState, body: &[u8]) -> Result<ChatResponse, RelayError> {
    let upstream = state.upstream()?;

    let request: ChatRequest = serde_json::from_slice(body)
        .map_err(|e| RelayError::MalformedRequest(e.to_string()))?;

    let message = request
        .message
        .filter(|m| !m.is_empty())
        .ok_or(RelayError::EmptyMessage)?;
    let conversation_id = request.conversation_id.unwrap_or_default();

    info!(
        "Relaying message ({} chars), conversation '{}'",
        message.len(),
        conversation_id
    );

    upstream.ask(&message, &conversation_id).await
}
