// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub cors: CorsConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Upstream news-search API configuration
#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    /// Article search endpoint, without query string
    pub base_url: String,
    /// Credential appended as the `api-key` query parameter
    #[serde(default)]
    pub api_key: String,
    /// Per-request deadline in seconds; no deadline when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Cross-origin configuration
#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    /// Origins whose browsers may read responses; the first one is the fallback
    pub allowed_origins: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    /// Seconds allowed for a client to send request headers; in-flight requests are not bounded
    pub header_read_timeout: u64,
    pub max_connections: Option<u64>,
}
