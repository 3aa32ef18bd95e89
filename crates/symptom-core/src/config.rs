use std::env;

use crate::RelayError;

pub const API_URL_VAR: &str = "API_URL";
pub const API_KEY_VAR: &str = "API_KEY";

/// Where the relay forwards chat turns and the bearer token it presents.
#[derive(Clone)]
pub struct UpstreamConfig {
    pub api_url: String,
    pub api_key: String,
}

impl UpstreamConfig {
    pub fn from_env() -> Result<Self, RelayError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RelayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_url = read(API_URL_VAR);
        let api_key = read(API_KEY_VAR);

        match (api_url, api_key) {
            (Some(api_url), Some(api_key)) => Ok(Self { api_url, api_key }),
            (url, key) => {
                let missing: Vec<&str> = [(API_URL_VAR, url.is_none()), (API_KEY_VAR, key.is_none())]
                    .into_iter()
                    .filter_map(|(name, absent)| absent.then_some(name))
                    .collect();
                Err(RelayError::Config(missing.join(", ")))
            }
        }
    }
}

// Keeps the token out of logs.
impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"***")
            .finish()
    }
}
