//! Upstream module
//!
//! Outbound calls to the news-search API.

mod client;
mod error;

pub use client::UpstreamClient;
pub use error::UpstreamError;
