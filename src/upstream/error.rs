//! Upstream error types
//!
//! Every variant ends the same way for the caller (a generic 500); the
//! distinction only matters for the server-side log line.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("Invalid upstream URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Client(reqwest::Error),

    #[error("Network error: {0}")]
    Network(reqwest::Error),

    #[error("News API error: {status} {reason}")]
    Status { status: u16, reason: String },

    #[error("Failed to read upstream body: {0}")]
    Body(reqwest::Error),

    #[error("Upstream returned invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl UpstreamError {
    /// Short label used as a structured log field
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidUrl(_) => "invalid_url",
            Self::Client(_) => "client",
            Self::Network(_) => "network",
            Self::Status { .. } => "status",
            Self::Body(_) => "body",
            Self::Decode(_) => "decode",
        }
    }
}

pub type UpstreamResult<T> = Result<T, UpstreamError>;
