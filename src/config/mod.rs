// Configuration module entry point
// Loads the immutable process configuration and the shared application state

mod state;
mod types;

use config::{ConfigError, Environment, File};
use hyper::header::HeaderValue;
use std::net::SocketAddr;
use std::path::Path;
use url::Url;

// Re-export public types
pub use state::AppState;
pub use types::{Config, CorsConfig, LoggingConfig, PerformanceConfig, ServerConfig, UpstreamConfig};

/// Config file looked up in the working directory (any supported extension)
pub const CONFIG_FILE: &str = "config";

/// New York Times Article Search endpoint
pub const DEFAULT_UPSTREAM_URL: &str = "https://api.nytimes.com/svc/search/v2/articlesearch.json";

/// Frontend development server
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3001";

/// Credential variables, preferred name first
const API_KEY_VARS: [&str; 2] = ["NYT_API_KEY", "NY_TIMES_API_KEY"];

/// Upstream endpoint variables, preferred name first
const UPSTREAM_URL_VARS: [&str; 2] = ["NYT_API_URL", "REACT_APP_NY_TIMES"];

/// Values taken from the named environment variables of the external contract
#[derive(Debug, Default, Clone)]
struct ContractVars {
    api_key: Option<String>,
    base_url: Option<String>,
}

impl ContractVars {
    fn from_env() -> Self {
        let lookup = |name: &str| std::env::var(name).ok();
        Self {
            api_key: first_set(&API_KEY_VARS, lookup),
            base_url: first_set(&UPSTREAM_URL_VARS, lookup),
        }
    }
}

/// Return the value of the first variable that is set and non-blank
fn first_set(names: &[&str], lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    names
        .iter()
        .find_map(|name| lookup(name).filter(|value| !value.trim().is_empty()))
}

/// Load `.env` from `path`, or from the working directory when `None`.
/// A missing file is fine; an unreadable or malformed one is not.
fn load_env_file(path: Option<&Path>) -> Result<(), ConfigError> {
    let result = match path {
        Some(p) => dotenvy::from_path(p),
        None => dotenvy::dotenv().map(|_| ()),
    };
    match result {
        Ok(()) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(ConfigError::Message(format!("failed to load .env: {e}"))),
    }
}

impl Config {
    /// Load `.env`, then `config.toml` and the environment
    pub fn load() -> Result<Self, ConfigError> {
        load_env_file(None)?;
        Self::load_from(CONFIG_FILE)
    }

    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, ConfigError> {
        Self::build(config_path, &ContractVars::from_env())
    }

    fn build(config_path: &str, contract: &ContractVars) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(File::with_name(config_path).required(false))
            .add_source(
                Environment::with_prefix("PROXY")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            )
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("upstream.base_url", DEFAULT_UPSTREAM_URL)?
            .set_default("cors.allowed_origins", vec![DEFAULT_ALLOWED_ORIGIN])?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.header_read_timeout", 30)?
            .set_override_option("upstream.api_key", contract.api_key.clone())?
            .set_override_option("upstream.base_url", contract.base_url.clone())?
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject configurations the proxy cannot serve with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.upstream.api_key.trim().is_empty() {
            return Err(ConfigError::Message(format!(
                "missing API credential: set {} (or {})",
                API_KEY_VARS[0], API_KEY_VARS[1]
            )));
        }

        let url = Url::parse(&self.upstream.base_url).map_err(|e| {
            ConfigError::Message(format!(
                "invalid upstream URL '{}' (set {}): {e}",
                self.upstream.base_url, UPSTREAM_URL_VARS[0]
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Message(format!(
                "upstream URL must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.upstream.timeout_secs == Some(0) {
            return Err(ConfigError::Message(
                "upstream.timeout_secs must be greater than zero".to_string(),
            ));
        }

        if self.performance.header_read_timeout == 0 {
            return Err(ConfigError::Message(
                "performance.header_read_timeout must be greater than zero".to_string(),
            ));
        }

        if self.cors.allowed_origins.is_empty() {
            return Err(ConfigError::Message(
                "cors.allowed_origins must list at least one origin".to_string(),
            ));
        }
        for origin in &self.cors.allowed_origins {
            HeaderValue::from_str(origin).map_err(|e| {
                ConfigError::Message(format!("invalid CORS origin '{origin}': {e}"))
            })?;
        }

        Ok(())
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
