use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use symptom_core::{parse_answer, ChatRequest, ChatResponse, Relay, RelayError};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub upstream_configured: bool,
}

/// Talks to a running relay server on behalf of a conversation session.
#[derive(Debug, Clone)]
pub struct RelayClient {
    http: Client,
    base_url: String,
}

impl RelayClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn health(&self) -> Result<HealthResponse, RelayError> {
        let response = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .map_err(|e| RelayError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RelayError::Status {
                status: response.status().as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| RelayError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl Relay for RelayClient {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, RelayError> {
        let url = format!("{}/api/chat", self.base_url);
        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| RelayError::Http(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RelayError::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(RelayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        parse_answer(&body)
    }
}
