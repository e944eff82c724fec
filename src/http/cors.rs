//! CORS module
//!
//! Header-based gate telling browsers which origins may read a response.
//! The server still processes every request; only the headers differ.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{self, HeaderValue};
use hyper::{Response, StatusCode};

use crate::config::DEFAULT_ALLOWED_ORIGIN;

/// Methods advertised on preflight responses
const ALLOWED_METHODS: &str = "GET, HEAD, PUT, PATCH, POST, DELETE";

/// Allowed-origin list resolved once at startup
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allowed_origins: Vec<HeaderValue>,
}

impl CorsPolicy {
    /// Entries that are not valid header values are skipped; an empty list
    /// falls back to the development frontend origin.
    pub fn new(origins: &[String]) -> Self {
        let mut allowed_origins: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| HeaderValue::from_str(origin).ok())
            .collect();
        if allowed_origins.is_empty() {
            allowed_origins.push(HeaderValue::from_static(DEFAULT_ALLOWED_ORIGIN));
        }
        Self { allowed_origins }
    }

    /// Origin to emit: the caller's if allowed, else the first configured one
    pub fn allow_origin(&self, request_origin: Option<&HeaderValue>) -> HeaderValue {
        request_origin
            .and_then(|origin| self.allowed_origins.iter().find(|allowed| *allowed == origin))
            .unwrap_or(&self.allowed_origins[0])
            .clone()
    }

    /// Annotate a response with the allow-origin header and `Vary: Origin`
    pub fn apply<B>(&self, request_origin: Option<&HeaderValue>, response: &mut Response<B>) {
        let headers = response.headers_mut();
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            self.allow_origin(request_origin),
        );
        headers.append(header::VARY, HeaderValue::from_static("Origin"));
    }

    /// Build the 204 answer to a preflight request
    pub fn preflight(
        &self,
        request_origin: Option<&HeaderValue>,
        requested_headers: Option<&HeaderValue>,
    ) -> Response<Full<Bytes>> {
        let mut response = Response::new(Full::new(Bytes::new()));
        *response.status_mut() = StatusCode::NO_CONTENT;

        self.apply(request_origin, &mut response);

        let headers = response.headers_mut();
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        );
        if let Some(requested) = requested_headers {
            headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, requested.clone());
            headers.append(
                header::VARY,
                HeaderValue::from_static("Access-Control-Request-Headers"),
            );
        }
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("0"));

        response
    }
}
