mod relay;
mod upstream;

pub use relay::{HealthResponse, RelayClient};
pub use upstream::UpstreamClient;
