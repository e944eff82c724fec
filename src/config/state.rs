// Application state module
// Immutable state shared by every connection task

use super::types::Config;
use crate::http::CorsPolicy;
use crate::upstream::{UpstreamClient, UpstreamError};

/// Application state
pub struct AppState {
    pub config: Config,
    pub upstream: UpstreamClient,
    pub cors: CorsPolicy,
    pub access_log: bool,
}

impl AppState {
    /// Build the state once at startup; nothing in it changes afterwards
    pub fn new(config: &Config) -> Result<Self, UpstreamError> {
        let upstream = UpstreamClient::new(&config.upstream)?;
        let cors = CorsPolicy::new(&config.cors.allowed_origins);

        Ok(Self {
            config: config.clone(),
            upstream,
            cors,
            access_log: config.logging.access_log,
        })
    }
}
