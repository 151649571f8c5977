//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with the configured user agent and timeouts
//! - HEAD requests used as a liveness probe
//! - GET requests returning raw, binary-safe bodies
//! - Bounded retry with exponential backoff for transport failures
//! - Error classification

use crate::config::{CrawlerConfig, UserAgentConfig};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

/// Result of a liveness probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeResult {
    /// The server answered 200
    Alive,

    /// The server answered with any other status
    Dead {
        /// The HTTP status code
        status_code: u16,
    },

    /// The request failed before a status was received
    Error {
        /// Error description
        error: String,
    },
}

/// Result of a content fetch
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the resource
    Success {
        /// Final URL after transparent redirects
        final_url: Url,
        /// Content-Type header value, if any
        content_type: Option<String>,
        /// Raw response body
        body: Vec<u8>,
    },

    /// The server answered with a status other than 200
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (DNS, connection refused, TLS, timeout, truncated body)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// One-line description of a failed fetch, `None` on success
    pub fn failure_reason(&self) -> Option<String> {
        match self {
            Self::Success { .. } => None,
            Self::HttpError { status_code } => Some(format!("Status {}", status_code)),
            Self::NetworkError { error } => Some(error.clone()),
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// Redirects are followed transparently by the client (reqwest's default
/// limit of 10 hops).
///
/// # Example
///
/// ```no_run
/// use site_mirror::config::Config;
/// use site_mirror::crawler::build_http_client;
///
/// let config = Config::default();
/// let client = build_http_client(&config.crawler, &config.user_agent).unwrap();
/// ```
pub fn build_http_client(
    crawler: &CrawlerConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(crawler.request_timeout_secs))
        .connect_timeout(Duration::from_secs(crawler.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Issues probes and fetches, retrying transport failures
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    max_retries: u32,
    retry_backoff: Duration,
}

impl HttpFetcher {
    /// Creates a fetcher from an existing client
    pub fn new(client: Client, max_retries: u32, retry_backoff: Duration) -> Self {
        Self {
            client,
            max_retries,
            retry_backoff,
        }
    }

    /// Builds the client and the fetcher from configuration
    pub fn from_config(
        crawler: &CrawlerConfig,
        user_agent: &UserAgentConfig,
    ) -> Result<Self, reqwest::Error> {
        let client = build_http_client(crawler, user_agent)?;
        Ok(Self::new(
            client,
            crawler.max_retries,
            Duration::from_millis(crawler.retry_backoff_ms),
        ))
    }

    /// Sends a HEAD request and classifies the answer
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | HTTP 200 | Alive |
    /// | Any other status | Dead (never retried) |
    /// | Transport failure | retried up to `max_retries`, then Error |
    pub async fn probe(&self, url: &Url) -> ProbeResult {
        let mut attempt = 0;
        loop {
            match self.client.head(url.as_str()).send().await {
                Ok(response) if response.status() == StatusCode::OK => return ProbeResult::Alive,
                Ok(response) => {
                    return ProbeResult::Dead {
                        status_code: response.status().as_u16(),
                    }
                }
                Err(e) => {
                    let error = classify_error(&e);
                    if !self.wait_before_retry(url, attempt, &error).await {
                        return ProbeResult::Error { error };
                    }
                }
            }
            attempt += 1;
        }
    }

    /// Sends a GET request and returns the raw body on HTTP 200
    ///
    /// The body is read as bytes, so images, archives and any other content
    /// type survive untouched.
    pub async fn fetch(&self, url: &Url) -> FetchResult {
        let mut attempt = 0;
        loop {
            let error = match self.client.get(url.as_str()).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status != StatusCode::OK {
                        return FetchResult::HttpError {
                            status_code: status.as_u16(),
                        };
                    }

                    let final_url = response.url().clone();
                    let content_type = response
                        .headers()
                        .get(reqwest::header::CONTENT_TYPE)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);

                    match response.bytes().await {
                        Ok(body) => {
                            return FetchResult::Success {
                                final_url,
                                content_type,
                                body: body.to_vec(),
                            }
                        }
                        Err(e) => classify_error(&e),
                    }
                }
                Err(e) => classify_error(&e),
            };

            if !self.wait_before_retry(url, attempt, &error).await {
                return FetchResult::NetworkError { error };
            }
            attempt += 1;
        }
    }

    /// Sleeps before the next attempt; returns false once retries are spent
    async fn wait_before_retry(&self, url: &Url, attempt: u32, error: &str) -> bool {
        if attempt >= self.max_retries {
            return false;
        }

        let delay = backoff_delay(self.retry_backoff, attempt);
        tracing::debug!(
            "Transport error for {} ({}), retry {}/{} in {:?}",
            url,
            error,
            attempt + 1,
            self.max_retries,
            delay
        );
        tokio::time::sleep(delay).await;
        true
    }
}

/// Exponential backoff: `base * 2^attempt`, capped at 2^10 multiples
pub fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(1u32 << attempt.min(10))
}

/// Maps a reqwest error to a short description
fn classify_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        e.to_string()
    }
}
