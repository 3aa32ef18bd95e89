pub mod config;
pub mod error;
pub mod session;
pub mod types;

pub use config::UpstreamConfig;
pub use error::RelayError;
pub use session::{ConversationSession, Relay};
pub use types::*;
