//! Article search handler
//!
//! Forwards the caller's query to the news API and relays the JSON, or the
//! fixed error message when anything goes wrong.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, Uri};

use crate::config::AppState;
use crate::http;
use crate::logger;

/// Search request extracted from the inbound query string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleQuery {
    pub q: Option<String>,
}

impl ArticleQuery {
    /// Take the first `q` pair, percent-decoded
    pub fn from_uri(uri: &Uri) -> Self {
        let q = uri.query().and_then(|qs| {
            url::form_urlencoded::parse(qs.as_bytes())
                .find(|(key, _)| key == "q")
                .map(|(_, value)| value.into_owned())
        });
        Self { q }
    }

    /// Text sent upstream; an absent `q` is sent as empty
    pub fn text(&self) -> &str {
        self.q.as_deref().unwrap_or("")
    }
}

pub async fn handle_articles(uri: &Uri, is_head: bool, state: &AppState) -> Response<Full<Bytes>> {
    let query = ArticleQuery::from_uri(uri);
    if query.q.is_none() {
        tracing::debug!("No q parameter, searching with an empty query");
    }

    match state.upstream.search_articles(query.text()).await {
        Ok(body) => http::build_json_response(body, is_head),
        Err(err) => {
            logger::log_upstream_failure(&err, query.text());
            http::build_articles_error_response(is_head)
        }
    }
}
