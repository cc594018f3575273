//! Fetch client with rate limiting, retry, and user-agent rotation
//!
//! One logical "fetch a URL" operation: acquire a rate-limit token, build
//! headers with a rotated user agent, issue the GET, and apply the
//! retry/backoff policy to the outcome. Fetch failures degrade to a
//! `FetchResult` with `success: false`; they are never returned as errors,
//! so a run can keep going after any single URL gives up.

use crate::client::UserAgentRotator;
use crate::config::RetryConfig;
use crate::limiter::RateLimiter;
use crate::retry::{backoff_delay, is_retryable, retry_after};
use crate::{Result, ScrapeError};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{redirect::Policy, Client, StatusCode};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Outcome of one logical fetch, after all retries
#[derive(Debug)]
pub struct FetchResult {
    /// The requested URL
    pub url: String,

    /// Final HTTP status, or 0 when no response was obtained
    pub status_code: u16,

    /// Response body, or an error description on transport failure
    pub body: String,

    /// Response headers (empty when no response was obtained)
    pub headers: HeaderMap,

    /// True iff a 200 response was obtained
    pub success: bool,
}

/// HTTP fetch client
///
/// Holds no transport until `connect()` is called; fetching before that
/// fails with `ScrapeError::ClientNotConnected`. `close()` drops the
/// transport again.
pub struct FetchClient {
    limiter: Arc<RateLimiter>,
    rotator: UserAgentRotator,
    max_attempts: u32,
    backoff_base: f64,
    backoff_max: f64,
    timeout: Duration,
    extra_headers: HashMap<String, String>,
    client: Option<Client>,
}

impl FetchClient {
    /// Creates a fetch client; call `connect()` before fetching
    pub fn new(
        limiter: Arc<RateLimiter>,
        rotator: UserAgentRotator,
        retry: &RetryConfig,
        timeout: Duration,
        extra_headers: HashMap<String, String>,
    ) -> Self {
        Self {
            limiter,
            rotator,
            max_attempts: retry.max_attempts,
            backoff_base: retry.backoff_base,
            backoff_max: retry.backoff_max,
            timeout,
            extra_headers,
            client: None,
        }
    }

    /// Builds the underlying transport
    pub fn connect(&mut self) -> Result<()> {
        let client = Client::builder()
            .timeout(self.timeout)
            .connect_timeout(Duration::from_secs(10))
            .redirect(Policy::limited(10))
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(ScrapeError::ClientBuild)?;
        self.client = Some(client);
        Ok(())
    }

    /// Drops the underlying transport; subsequent fetches fail until reconnected
    pub fn close(&mut self) {
        self.client = None;
    }

    /// Builds per-request headers: a rotated User-Agent, then the configured
    /// extras. Extras use insert semantics, so an explicit User-Agent header
    /// in config wins over the rotation.
    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(self.rotator.next_agent()) {
            headers.insert(USER_AGENT, value);
        }
        for (name, value) in &self.extra_headers {
            let Ok(name) = HeaderName::from_bytes(name.as_bytes()) else {
                tracing::debug!("Skipping invalid header name: {}", name);
                continue;
            };
            let Ok(value) = HeaderValue::from_str(value) else {
                tracing::debug!("Skipping invalid header value for {}", name);
                continue;
            };
            headers.insert(name, value);
        }
        headers
    }

    /// Fetches a URL, retrying transient failures up to `max_attempts`
    ///
    /// Per attempt: acquire a token for the URL's domain (may suspend),
    /// send a GET with a rotated User-Agent plus the configured extra
    /// headers, then classify the outcome. 200 returns success right away.
    /// A retryable status honors Retry-After when present, otherwise the
    /// computed backoff. A non-retryable status returns failure without
    /// consuming remaining attempts. Connect/timeout errors back off and
    /// retry; anything left after the last attempt degrades to a
    /// `status 0` failure result.
    pub async fn fetch(&self, url: &Url) -> Result<FetchResult> {
        let client = self.client.as_ref().ok_or(ScrapeError::ClientNotConnected)?;

        let mut last_error: Option<reqwest::Error> = None;

        for attempt in 0..self.max_attempts {
            self.limiter.acquire(url).await;

            let request = client.get(url.clone()).headers(self.build_headers());

            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    let headers = response.headers().clone();

                    if status == StatusCode::OK {
                        return match response.text().await {
                            Ok(body) => Ok(FetchResult {
                                url: url.to_string(),
                                status_code: status.as_u16(),
                                body,
                                headers,
                                success: true,
                            }),
                            Err(err) => Ok(FetchResult {
                                url: url.to_string(),
                                status_code: 0,
                                body: err.to_string(),
                                headers: HeaderMap::new(),
                                success: false,
                            }),
                        };
                    }

                    if is_retryable(status.as_u16()) {
                        let delay = retry_after(&headers).unwrap_or_else(|| {
                            backoff_delay(attempt, self.backoff_base, self.backoff_max)
                        });
                        tracing::warn!(
                            "Retryable status {} for {}, attempt {}/{}, waiting {:.1}s",
                            status.as_u16(),
                            url,
                            attempt + 1,
                            self.max_attempts,
                            delay
                        );
                        tokio::time::sleep(Duration::from_secs_f64(delay)).await;
                        continue;
                    }

                    let body = response.text().await.unwrap_or_default();
                    return Ok(FetchResult {
                        url: url.to_string(),
                        status_code: status.as_u16(),
                        body,
                        headers,
                        success: false,
                    });
                }

                Err(err) if err.is_timeout() || err.is_connect() => {
                    let delay = backoff_delay(attempt, self.backoff_base, self.backoff_max);
                    tracing::warn!(
                        "Connection error for {}, attempt {}/{}: {}",
                        url,
                        attempt + 1,
                        self.max_attempts,
                        err
                    );
                    last_error = Some(err);
                    if attempt + 1 < self.max_attempts {
                        tokio::time::sleep(Duration::from_secs_f64(delay)).await;
                    }
                }

                Err(err) => {
                    // Not a connect/timeout condition: no retry will help
                    return Ok(FetchResult {
                        url: url.to_string(),
                        status_code: 0,
                        body: err.to_string(),
                        headers: HeaderMap::new(),
                        success: false,
                    });
                }
            }
        }

        Ok(FetchResult {
            url: url.to_string(),
            status_code: 0,
            body: last_error
                .map(|err| err.to_string())
                .unwrap_or_else(|| "max retries exceeded".to_string()),
            headers: HeaderMap::new(),
            success: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(connected: bool) -> FetchClient {
        let retry = RetryConfig {
            max_attempts: 3,
            backoff_base: 0.01,
            backoff_max: 0.05,
        };
        let mut client = FetchClient::new(
            Arc::new(RateLimiter::new(100.0, 100)),
            UserAgentRotator::new(),
            &retry,
            Duration::from_secs(5),
            HashMap::new(),
        );
        if connected {
            client.connect().unwrap();
        }
        client
    }

    #[tokio::test]
    async fn test_fetch_before_connect_fails() {
        let client = test_client(false);
        let url = Url::parse("https://example.com/").unwrap();
        let result = client.fetch(&url).await;
        assert!(matches!(result, Err(ScrapeError::ClientNotConnected)));
    }

    #[tokio::test]
    async fn test_fetch_after_close_fails() {
        let mut client = test_client(true);
        client.close();
        let url = Url::parse("https://example.com/").unwrap();
        let result = client.fetch(&url).await;
        assert!(matches!(result, Err(ScrapeError::ClientNotConnected)));
    }

    #[test]
    fn test_connect_builds_transport() {
        let client = test_client(true);
        assert!(client.client.is_some());
    }

    // Response handling (retry on 503, Retry-After, header rotation) is
    // exercised against wiremock servers in tests/scrape_tests.rs.
}
