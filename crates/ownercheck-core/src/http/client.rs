//! GitHub REST API client for the approval search

use crate::config::{CheckConfig, TOKEN_VAR};
use crate::error::{Error, Result};
use crate::http::search::{SearchQuery, SearchResponse};
use crate::traits::ApprovalSearch;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use std::future::Future;
use std::pin::Pin;

/// GitHub issue search client
pub struct SearchClient {
    client: reqwest::Client,
    api_url: String,
}

impl std::fmt::Debug for SearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchClient")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

impl SearchClient {
    /// Create a client authenticated with the configured token
    pub fn new(config: &CheckConfig) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("token {}", config.token)).map_err(|_| {
            Error::Config(format!(
                "{} contains characters not allowed in an HTTP header",
                TOKEN_VAR
            ))
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        let client = reqwest::Client::builder()
            .user_agent(concat!("ownercheck/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Runtime(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
        })
    }

    /// Run an issue search and return the matching issue numbers
    ///
    /// Endpoint: GET /search/issues
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<u64>> {
        let url = format!("{}/search/issues", self.api_url);

        let response = self
            .client
            .get(&url)
            .query(&[("q", query.as_str())])
            .send()
            .await
            .map_err(|e| Error::Http(format!("GitHub search request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS {
            let header = |name: &str| {
                response
                    .headers()
                    .get(name)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string)
            };
            let remaining = header("x-ratelimit-remaining");
            if status == StatusCode::TOO_MANY_REQUESTS || remaining.as_deref() == Some("0") {
                let reset = header("x-ratelimit-reset").unwrap_or_else(|| "unknown".to_string());
                tracing::warn!(%status, reset = %reset, "GitHub search rate limited");
                return Err(Error::RateLimitExceeded(format!(
                    "GitHub search API rate limit exceeded, resets at {}",
                    reset
                )));
            }
        }

        if !status.is_success() {
            return Err(Error::Http(format!(
                "GitHub search returned error: {}",
                status
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Http(format!("Failed to read GitHub search response: {}", e)))?;

        let parsed: SearchResponse = serde_json::from_slice(&body)?;
        Ok(parsed.numbers())
    }
}

impl ApprovalSearch for SearchClient {
    type SearchFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<u64>>> + Send + 'a>>;

    fn approved_pulls<'a>(&'a self, query: &'a SearchQuery) -> Self::SearchFuture<'a> {
        Box::pin(self.search(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use httpmock::prelude::*;
    use serde_json::json;

    fn config(server: &MockServer) -> CheckConfig {
        CheckConfig::new(Some("t0ken".into()))
            .unwrap()
            .with_api_url(server.base_url())
    }

    #[tokio::test]
    async fn test_search_sends_expected_request() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/search/issues")
                .query_param("q", "acme/infra review:approved is:open is:pr")
                .header("authorization", "token t0ken")
                .header("accept", "application/vnd.github+json")
                .header_exists("user-agent");
            then.status(200)
                .json_body(json!({"total_count": 2, "items": [{"number": 3}, {"number": 7}]}));
        });

        let client = SearchClient::new(&config(&server)).unwrap();
        let query = SearchQuery::approved_open_pulls("acme", "infra");
        let numbers = client.search(&query).await.unwrap();

        mock.assert();
        assert_eq!(numbers, vec![3, 7]);
    }

    #[tokio::test]
    async fn test_non_success_status_is_http_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/search/issues");
            then.status(422).body("Validation Failed");
        });

        let client = SearchClient::new(&config(&server)).unwrap();
        let query = SearchQuery::approved_open_pulls("acme", "infra");
        assert_matches!(
            client.search(&query).await,
            Err(Error::Http(ref msg)) if msg.contains("422")
        );
    }

    #[tokio::test]
    async fn test_exhausted_rate_limit() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/search/issues");
            then.status(403)
                .header("x-ratelimit-remaining", "0")
                .header("x-ratelimit-reset", "1700000000")
                .body("API rate limit exceeded");
        });

        let client = SearchClient::new(&config(&server)).unwrap();
        let query = SearchQuery::approved_open_pulls("acme", "infra");
        assert_matches!(
            client.search(&query).await,
            Err(Error::RateLimitExceeded(ref msg)) if msg.contains("1700000000")
        );
    }

    #[tokio::test]
    async fn test_forbidden_without_rate_limit_is_http_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/search/issues");
            then.status(403)
                .header("x-ratelimit-remaining", "25")
                .body("Resource not accessible by integration");
        });

        let client = SearchClient::new(&config(&server)).unwrap();
        let query = SearchQuery::approved_open_pulls("acme", "infra");
        assert_matches!(client.search(&query).await, Err(Error::Http(_)));
    }

    #[tokio::test]
    async fn test_malformed_json_is_http_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/search/issues");
            then.status(200).body("<html>not json</html>");
        });

        let client = SearchClient::new(&config(&server)).unwrap();
        let query = SearchQuery::approved_open_pulls("acme", "infra");
        assert_matches!(
            client.search(&query).await,
            Err(Error::Http(ref msg)) if msg.starts_with("JSON error")
        );
    }

    #[test]
    fn test_token_with_newline_rejected() {
        let config = CheckConfig::new(Some("bad\ntoken".into())).unwrap();
        assert_matches!(SearchClient::new(&config), Err(Error::Config(_)));
    }

    #[test]
    fn test_debug_hides_token() {
        let config = CheckConfig::new(Some("ghp_secretvalue".into())).unwrap();
        let client = SearchClient::new(&config).unwrap();
        assert!(!format!("{:?}", client).contains("ghp_secretvalue"));
    }
}
