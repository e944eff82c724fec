//! HTTP protocol layer module
//!
//! Response builders and the CORS gate, decoupled from request handling.

pub mod cors;
pub mod response;

// Re-export commonly used types
pub use cors::CorsPolicy;
pub use response::{
    build_404_response, build_articles_error_response, build_json_response,
    ARTICLES_ERROR_MESSAGE,
};
