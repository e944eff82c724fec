//! HTTP response building module
//!
//! Builders for the handful of responses the proxy can produce.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Fixed body returned for every upstream failure
pub const ARTICLES_ERROR_MESSAGE: &str = "Error fetching articles";

/// Build 200 response forwarding an upstream JSON body verbatim
pub fn build_json_response(data: Bytes, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    Response::builder()
        .status(200)
        .header("Content-Type", "application/json; charset=utf-8")
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build the generic 500 returned when the article search fails
pub fn build_articles_error_response(is_head: bool) -> Response<Full<Bytes>> {
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from_static(ARTICLES_ERROR_MESSAGE.as_bytes())
    };

    Response::builder()
        .status(500)
        .header("Content-Type", "text/plain; charset=utf-8")
        .header("Content-Length", ARTICLES_ERROR_MESSAGE.len())
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("500", &e);
            Response::new(Full::new(Bytes::from_static(
                ARTICLES_ERROR_MESSAGE.as_bytes(),
            )))
        })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(Full::new(Bytes::from("404 Not Found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("404 Not Found")))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
