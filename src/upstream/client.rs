// Upstream client implementation
// Issues the article search against the configured news API

use hyper::body::Bytes;
use reqwest::{header, Client};
use std::time::Duration;
use url::Url;

use super::error::{UpstreamError, UpstreamResult};
use crate::config::UpstreamConfig;

/// Query parameter carrying the credential
const API_KEY_PARAM: &str = "api-key";

/// Query parameter carrying the caller's search text
const QUERY_PARAM: &str = "q";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub struct UpstreamClient {
    http_client: Client,
    base_url: Url,
    api_key: String,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> UpstreamResult<Self> {
        let base_url = Url::parse(&config.base_url)?;

        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder.build().map_err(UpstreamError::Client)?;

        Ok(Self {
            http_client,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    /// Build the search URL: base endpoint plus `q` and `api-key`, form-encoded.
    /// Query pairs already present on the base endpoint are kept.
    pub fn build_url(&self, query: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair(QUERY_PARAM, query)
            .append_pair(API_KEY_PARAM, &self.api_key);
        url
    }

    /// Run one article search and return the upstream JSON body untouched
    pub async fn search_articles(&self, query: &str) -> UpstreamResult<Bytes> {
        let url = self.build_url(query);
        tracing::debug!(url = %redact_url(&url), "Forwarding article search");

        // Errors are stripped of their URL so the credential never reaches a log line
        let response = self
            .http_client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| UpstreamError::Network(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Body(e.without_url()))?;

        serde_json::from_slice::<serde::de::IgnoredAny>(&body)?;
        Ok(body)
    }
}

/// Render a URL with the credential value masked
pub fn redact_url(url: &Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let value = if k == API_KEY_PARAM { "***".into() } else { v };
            (k.into_owned(), value.into_owned())
        })
        .collect();

    if !pairs.is_empty() {
        redacted.query_pairs_mut().clear().extend_pairs(pairs);
    }
    redacted.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    fn client_for(base_url: &str) -> UpstreamClient {
        UpstreamClient::new(&UpstreamConfig {
            base_url: base_url.to_string(),
            api_key: "secret-key".to_string(),
            timeout_secs: None,
        })
        .unwrap()
    }

    #[test]
    fn test_build_url_encodes_query_and_key() {
        let client = client_for("https://api.nytimes.com/svc/search/v2/articlesearch.json");
        let url = client.build_url("cats & dogs");
        assert_eq!(
            url.as_str(),
            "https://api.nytimes.com/svc/search/v2/articlesearch.json?q=cats+%26+dogs&api-key=secret-key"
        );
    }

    #[test]
    fn test_build_url_keeps_existing_query() {
        let client = client_for("https://news.example/search?fl=headline");
        let url = client.build_url("");
        assert_eq!(
            url.as_str(),
            "https://news.example/search?fl=headline&q=&api-key=secret-key"
        );
    }

    #[test]
    fn test_redact_url_masks_credential() {
        let client = client_for("https://news.example/search");
        let redacted = redact_url(&client.build_url("cats"));
        assert!(!redacted.contains("secret-key"));
        assert!(redacted.contains("q=cats"));
        assert!(redacted.contains("api-key=***") || redacted.contains("api-key=%2A%2A%2A"));
    }

    #[test]
    fn test_invalid_base_url() {
        let result = UpstreamClient::new(&UpstreamConfig {
            base_url: "::not a url::".to_string(),
            api_key: "k".to_string(),
            timeout_secs: None,
        });
        assert!(matches!(result, Err(UpstreamError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_search_sends_built_url() {
        let stub = test_support::spawn_stub(|_| (200, r#"{"docs":[]}"#.to_string())).await;
        let client = client_for(&stub.url());

        let body = client.search_articles("cats").await.unwrap();
        assert_eq!(&body[..], br#"{"docs":[]}"#);

        let seen = stub.requests();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].ends_with("?q=cats&api-key=secret-key"), "got: {}", seen[0]);
    }

    #[tokio::test]
    async fn test_search_maps_status_error() {
        let stub = test_support::spawn_stub(|_| (404, "{}".to_string())).await;
        let client = client_for(&stub.url());

        let err = client.search_articles("cats").await.unwrap_err();
        assert!(matches!(err, UpstreamError::Status { status: 404, .. }));
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn test_search_rejects_non_json_body() {
        let stub = test_support::spawn_stub(|_| (200, "<html>oops</html>".to_string())).await;
        let client = client_for(&stub.url());

        let err = client.search_articles("cats").await.unwrap_err();
        assert_eq!(err.kind(), "decode");
    }

    #[tokio::test]
    async fn test_network_error_hides_credential() {
        let client = client_for(&test_support::unreachable_url().await);

        let err = client.search_articles("cats").await.unwrap_err();
        assert_eq!(err.kind(), "network");
        assert!(!err.to_string().contains("secret-key"));
    }
}
