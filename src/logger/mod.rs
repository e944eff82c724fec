//! Logger module
//!
//! Provides logging utilities for the proxy including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error and warning logging, including upstream failures
//!
//! Diagnostics go through `tracing`; access log lines go through the
//! access log writer so they can be sent to a file.

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use crate::upstream::UpstreamError;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

/// Initialize the logger with configuration
///
/// Should be called once at application startup. `RUST_LOG` wins over
/// `logging.level` when set.
pub fn init(config: &Config) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()?;

    writer::init(config.logging.access_log_file.as_deref())?;
    Ok(())
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    tracing::info!("Server is running on port {}", addr.port());
    tracing::info!("Listening on: http://{addr}");
    tracing::info!("Route: GET /api/articles?q=<text>");
    tracing::info!("Upstream: {}", config.upstream.base_url);
    tracing::info!("Allowed origins: {}", config.cors.allowed_origins.join(", "));
    if let Some(secs) = config.upstream.timeout_secs {
        tracing::info!("Upstream timeout: {secs}s");
    }
    if let Some(workers) = config.server.workers {
        tracing::info!("Worker threads: {workers}");
    }
    if let Some(ref path) = config.logging.access_log_file {
        tracing::info!("Access log: {path}");
    }
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    tracing::debug!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    tracing::error!("Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    tracing::error!("{message}");
}

pub fn log_warning(message: &str) {
    tracing::warn!("{message}");
}

/// Record why an article search failed; the caller only ever sees a 500
pub fn log_upstream_failure(err: &UpstreamError, query: &str) {
    tracing::error!(kind = err.kind(), query, "Error fetching articles: {err}");
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    let line = entry.format(format);
    match writer::get() {
        Some(w) => w.write_line(&line),
        None => println!("{line}"),
    }
}
