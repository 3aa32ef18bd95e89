use reqwest::Client;
use symptom_core::{parse_answer, ChatResponse, RelayError, UpstreamConfig, UpstreamRequest};
use tracing::{debug, info};

/// Blocking-mode client for the third-party conversational API.
///
/// One POST per turn, no retries, and the reqwest default timeout.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: Client,
    api_url: String,
    api_key: String,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Self {
        Self {
            http: Client::new(),
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    pub async fn ask(&self, query: &str, conversation_id: &str) -> Result<ChatResponse, RelayError> {
        let request = UpstreamRequest::blocking(query, conversation_id);

        debug!(
            "Upstream request: conversation '{}', query '{}...'",
            conversation_id,
            query.chars().take(50).collect::<String>()
        );

        let response = self
            .http
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| RelayError::Http(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| RelayError::Http(e.to_string()))?;

        let answer = parse_answer(&body)?;
        info!(
            "Upstream answered ({} chars), conversation '{}'",
            answer.answer.len(),
            answer.conversation_id
        );

        Ok(answer)
    }
}
