//! Check configuration

use crate::error::{Error, Result};
use crate::retry::RetryPolicy;
use std::time::Duration;

/// Public GitHub API
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Environment variable holding the GitHub token
pub const TOKEN_VAR: &str = "ATLANTIS_GH_TOKEN";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything the approval check needs besides the run step itself
#[derive(Clone)]
pub struct CheckConfig {
    /// GitHub API base URL, without trailing slash
    pub api_url: String,
    /// Token sent as `Authorization: token ...`
    pub token: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Search retry policy
    pub retry: RetryPolicy,
}

impl std::fmt::Debug for CheckConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckConfig")
            .field("api_url", &self.api_url)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("retry", &self.retry)
            .finish()
    }
}

impl CheckConfig {
    /// Create a config for the public GitHub API with default timeout and retry.
    ///
    /// Fails when `token` is missing or empty.
    pub fn new(token: Option<String>) -> Result<Self> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::Config(format!("environment variable {} must be set", TOKEN_VAR)))?;

        Ok(Self {
            api_url: DEFAULT_API_URL.to_string(),
            token,
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
        })
    }

    /// Override the API base URL (GitHub Enterprise, tests)
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into();
        self.api_url = api_url.trim_end_matches('/').to_string();
        self
    }

    /// Override the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the retry policy
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}
