//! Remote listing retrieval

use provider_codegen_common::{GeneratorError, Result};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("provider-codegen/", env!("CARGO_PKG_VERSION"));
const TIMEOUT: Duration = Duration::from_secs(30);

/// Where generators read their upstream listings from
pub trait ListingSource {
    /// Fetch the body at `url` as text
    fn fetch_text(&self, url: &str) -> Result<String>;
}

/// Blocking HTTP source, one GET per call
pub struct HttpSource {
    client: Client,
    token: Option<String>,
}

impl HttpSource {
    /// Create an unauthenticated HTTP source
    pub fn new() -> Result<Self> {
        Self::with_token(None)
    }

    /// Create an HTTP source sending `token` as a bearer token
    ///
    /// Authenticated requests get a much higher GitHub API rate limit.
    pub fn with_token(token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(TIMEOUT)
            .build()
            .map_err(|e| GeneratorError::Fetch(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            token: token.filter(|t| !t.is_empty()),
        })
    }
}

impl ListingSource for HttpSource {
    fn fetch_text(&self, url: &str) -> Result<String> {
        debug!(url, authenticated = self.token.is_some(), "GET");

        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .map_err(|e| GeneratorError::Fetch(format!("GET {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeneratorError::Fetch(format!(
                "GET {} returned {}",
                url, status
            )));
        }

        response
            .text()
            .map_err(|e| GeneratorError::Fetch(format!("Failed to read body of {}: {}", url, e)))
    }
}
