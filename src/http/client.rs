use anyhow::{Context, Result};
use log::warn;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, PRAGMA};
use reqwest::Client;
use std::time::Duration;

use crate::errors::fetch_context;
use crate::rate_limiter::RateLimiter;

/// HTTP client with built-in rate limiting and bounded retry
pub struct RateLimitedClient {
    client: Client,
    rate_limiter: RateLimiter,
    max_retries: u32,
}

impl RateLimitedClient {
    pub fn new(user_agent: &str, timeout_secs: u64, rate_limit_ms: u64, max_retries: u32) -> Result<Self> {
        let client = Self::build_client(user_agent, timeout_secs)?;
        let rate_limiter = RateLimiter::new(rate_limit_ms);

        Ok(Self {
            client,
            rate_limiter,
            max_retries,
        })
    }

    /// GET a page body, retrying transport errors and non-2xx statuses
    pub async fn get_text(&mut self, url: &str) -> Result<String> {
        let mut attempt = 0;
        loop {
            match self.try_get_text(url).await {
                Ok(body) => return Ok(body),
                Err(e) if attempt < self.max_retries => {
                    attempt += 1;
                    warn!("Attempt {} for {} failed: {:#}; retrying", attempt, url, e);
                }
                Err(e) => return Err(e.context(fetch_context(url))),
            }
        }
    }

    async fn try_get_text(&mut self, url: &str) -> Result<String> {
        self.rate_limiter.wait().await;
        let response = self.send_get_request(url).await?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP error: {}", response.status());
        }

        response.text().await.context("Failed to read response body")
    }

    fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .default_headers(Self::browser_headers())
            .timeout(Duration::from_secs(timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .context("Failed to build HTTP client")
    }

    fn browser_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
        headers
    }

    async fn send_get_request(&self, url: &str) -> Result<reqwest::Response> {
        self.client
            .get(url)
            .send()
            .await
            .context("Failed to send GET request")
    }
}
