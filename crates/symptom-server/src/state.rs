use symptom_core::{RelayError, UpstreamConfig};
use symptom_http::UpstreamClient;

pub struct AppState {
    upstream: Result<UpstreamClient, String>,
}

impl AppState {
    pub fn new(config: Result<UpstreamConfig, RelayError>) -> Self {
        let upstream = config
            .map(|c| UpstreamClient::new(&c))
            .map_err(|e| e.to_string());
        Self { upstream }
    }

    pub fn upstream(&self) -> Result<&UpstreamClient, RelayError> {
        self.upstream
            .as_ref()
            .map_err(|reason| RelayError::Config(reason.clone()))
    }

    pub fn is_configured(&self) -> bool {
        self.upstream.is_ok()
    }
}
