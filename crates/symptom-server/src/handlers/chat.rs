use std::sync::Arc;

use axum::{body::Bytes, extract::State, Json};
use symptom_core::{ChatResponse, RelayError};
use tracing::{error, warn};

use crate::error::AppError;
use crate::services;
use crate::state::AppState;

/// Takes raw bytes so a missing `Content-Type` is not a rejection of its own.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ChatResponse>, AppError> {
    let response = services::chat::relay(&state, &body).await.map_err(|e| {
        match &e {
            RelayError::EmptyMessage => warn!("Rejected chat request: {}", e),
            _ => error!("API error: {}", e),
        }
        AppError::from(e)
    })?;

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use axum::body::Body;
    use axum::http::{HeaderMap, Request, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use serde_json::{json, Value};
    use symptom_core::UpstreamConfig;
    use tower::ServiceExt;

    use super::*;
    use crate::app;

    type Seen = Arc<Mutex<Vec<(String, Value)>>>;

    /// Serves `reply` for every POST and records what it was sent.
    async fn mock_upstream(status: StatusCode, reply: &'static str) -> (String, Seen) {
        let seen: Seen = Arc::default();
        let recorder = seen.clone();

        let upstream = Router::new().route(
            "/v1/chat-messages",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let recorder = recorder.clone();
                async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    recorder.lock().unwrap().push((auth, body));
                    (status, [("content-type", "application/json")], reply)
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, upstream).await.unwrap() });

        (format!("http://{addr}/v1/chat-messages"), seen)
    }

    fn relay_for(api_url: String) -> Router {
        let config = UpstreamConfig {
            api_url,
            api_key: "upstream-key".into(),
        };
        app::router(Arc::new(AppState::new(Ok(config))))
    }

    fn unconfigured_relay() -> Router {
        let config = UpstreamConfig::from_lookup(|_: &str| None);
        app::router(Arc::new(AppState::new(config)))
    }

    async fn post_chat(app: Router, body: &str) -> (StatusCode, Value) {
        let request = Request::post("/api/chat")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn relays_answer_and_conversation_id() {
        let (url, seen) = mock_upstream(
            StatusCode::OK,
            r#"{"answer":"X","conversation_id":"C","message_id":"m-1"}"#,
        )
        .await;

        let (status, body) = post_chat(
            relay_for(url),
            r#"{"message":"I have a headache","conversationId":"C"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"answer": "X", "conversation_id": "C"}));

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "Bearer upstream-key");
        assert_eq!(
            seen[0].1,
            json!({
                "inputs": {},
                "query": "I have a headache",
                "conversation_id": "C",
                "response_mode": "blocking",
                "user": "user"
            })
        );
    }

    #[tokio::test]
    async fn missing_conversation_id_defaults_to_empty() {
        let (url, seen) = mock_upstream(StatusCode::OK, r#"{"answer":"Hello"}"#).await;

        let (status, body) = post_chat(relay_for(url), r#"{"message":"hi"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"answer": "Hello", "conversation_id": ""}));
        assert_eq!(seen.lock().unwrap()[0].1["conversation_id"], json!(""));
    }

    #[tokio::test]
    async fn empty_or_missing_message_is_bad_request() {
        let (url, seen) = mock_upstream(StatusCode::OK, r#"{"answer":"X"}"#).await;

        for body in [
            r#"{"message":""}"#,
            r#"{}"#,
            r#"{"conversationId":"C"}"#,
            r#"{"message":"","conversationId":"C"}"#,
            r#"{"message":null}"#,
        ] {
            let (status, resp) = post_chat(relay_for(url.clone()), body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
            assert_eq!(resp, json!({"error": "Message is required"}));
        }

        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unconfigured_relay_fails_every_request() {
        for body in [r#"{"message":"I have a headache"}"#, r#"{"message":""}"#, "garbage"] {
            let (status, resp) = post_chat(unconfigured_relay(), body).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(resp, json!({"error": "Error processing request"}));
        }
    }

    #[tokio::test]
    async fn upstream_status_is_not_leaked() {
        let (url, _) =
            mock_upstream(StatusCode::SERVICE_UNAVAILABLE, r#"{"code":"overloaded"}"#).await;

        let (status, body) = post_chat(relay_for(url), r#"{"message":"hi"}"#).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Error processing request"}));
    }

    #[tokio::test]
    async fn upstream_reply_without_answer_fails() {
        let (url, _) = mock_upstream(StatusCode::OK, r#"{"foo":"bar"}"#).await;

        let (status, body) = post_chat(relay_for(url), r#"{"message":"hi"}"#).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Error processing request"}));
    }

    #[tokio::test]
    async fn upstream_reply_that_is_not_json_fails() {
        let (url, _) = mock_upstream(StatusCode::OK, "Bad Gateway").await;

        let (status, _) = post_chat(relay_for(url), r#"{"message":"hi"}"#).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn malformed_request_body_fails_generically() {
        let (url, seen) = mock_upstream(StatusCode::OK, r#"{"answer":"X"}"#).await;

        let (status, body) = post_chat(relay_for(url), "{not json").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Error processing request"}));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn accepts_body_without_content_type() {
        let (url, _) = mock_upstream(StatusCode::OK, r#"{"answer":"X","conversation_id":"C"}"#).await;

        let request = Request::post("/api/chat")
            .body(Body::from(r#"{"message":"hi"}"#))
            .unwrap();
        let response = relay_for(url).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn health_reports_configuration() {
        let request = || Request::get("/health").body(Body::empty()).unwrap();

        let response = unconfigured_relay().oneshot(request()).await.unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"status": "ok", "upstream_configured": false}));

        let response = relay_for("http://127.0.0.1:9/chat".into())
            .oneshot(request())
            .await
            .unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["upstream_configured"], json!(true));
    }
}
