pub mod chat;
pub mod page;

use std::sync::Arc;

use axum::{extract::State, Json};
use symptom_http::HealthResponse;

use crate::state::AppState;

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        upstream_configured: state.is_configured(),
    })
}
