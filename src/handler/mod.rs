//! Request handler module
//!
//! Routes inbound requests and runs the article search proxy.

pub mod articles;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
