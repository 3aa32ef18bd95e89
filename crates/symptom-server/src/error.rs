use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use symptom_core::{ErrorBody, RelayError};

/// What the caller sees. Server-side causes never leak past this point.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Internal(String),
}

impl From<RelayError> for AppError {
    fn from(err: RelayError) -> Self {
        match err {
            RelayError::EmptyMessage => AppError::BadRequest(err.to_string()),
            _ => AppError::Internal("Error processing request".into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
