use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Configuration missing: {0}")]
    Config(String),

    #[error("Message is required")]
    EmptyMessage,

    #[error("Malformed request body: {0}")]
    MalformedRequest(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        RelayError::InvalidResponse(err.to_string())
    }
}
