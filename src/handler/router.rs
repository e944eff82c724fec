//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: preflight, route matching,
//! CORS annotation and access logging.

use crate::config::AppState;
use crate::handler::articles;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::header::{self, HeaderValue};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// The one proxied route
pub const ARTICLES_PATH: &str = "/api/articles";

/// Main entry point for HTTP request handling
///
/// The request body is never read, so any body type is accepted.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: Option<SocketAddr>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let access_entry = state.access_log.then(|| {
        AccessLogEntry::from_request(
            peer_addr,
            req.method(),
            req.uri(),
            req.version(),
            req.headers(),
        )
    });

    let origin = req.headers().get(header::ORIGIN).cloned();

    let response = if req.method() == Method::OPTIONS {
        state.cors.preflight(
            origin.as_ref(),
            req.headers().get(header::ACCESS_CONTROL_REQUEST_HEADERS),
        )
    } else {
        let mut response = route_request(&req, &state).await;
        state.cors.apply(origin.as_ref(), &mut response);
        response
    };

    if let Some(mut entry) = access_entry {
        entry.status = response.status().as_u16();
        entry.body_bytes = response_size(&response);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Route request based on path and method
async fn route_request<B>(req: &Request<B>, state: &AppState) -> Response<Full<Bytes>> {
    let path = req.uri().path();
    let normalized = if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    };

    if normalized != ARTICLES_PATH {
        return http::build_404_response();
    }

    match *req.method() {
        Method::GET => articles::handle_articles(req.uri(), false, state).await,
        Method::HEAD => articles::handle_articles(req.uri(), true, state).await,
        _ => http::build_404_response(),
    }
}

/// Bytes the client will receive, from the declared length or the body itself
fn response_size(response: &Response<Full<Bytes>>) -> usize {
    response
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v: &HeaderValue| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .or_else(|| {
            response
                .body()
                .size_hint()
                .exact()
                .and_then(|n| usize::try_from(n).ok())
        })
        .unwrap_or(0)
}
