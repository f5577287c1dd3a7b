//! HTTP client for scraping with rate limiting and error handling
//!
//! Provides the document-fetching collaborator used by the profile and the
//! search crawler. Bodies are returned as `String` so callers can parse them
//! synchronously; `scraper::Html` is never sent across an await point.

use std::num::NonZeroU32;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::InMemoryState;
use governor::state::direct::NotKeyed;
use governor::{Quota, RateLimiter};
use reqwest::Client;
use reqwest::header::{COOKIE, HeaderMap, HeaderValue, USER_AGENT};
use tracing::{debug, warn};

use crate::error::{ScrapeError, ScrapeResult};

/// HTTP client configuration for scraping.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct HttpClientConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_requests_per_second: u32,
    pub follow_redirects: bool,
    /// Raw `Cookie` header value sent with every request (the site requires
    /// an age-check cookie before serving product pages).
    pub cookie: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (compatible; mgscrape/0.2)".to_string(),
            timeout_seconds: 30,
            max_requests_per_second: 3,
            follow_redirects: true,
            cookie: None,
        }
    }
}

/// Source of fetched documents and existence probes.
///
/// The crawler and the profile depend on this seam instead of a concrete
/// client so tests can drive them from an in-memory page map.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Fetch a page body; non-success status is an error.
    async fn fetch_page(&self, url: &str) -> ScrapeResult<String>;

    /// Fetch a page body, tolerating non-success status codes as long as a
    /// body came back. Detail pages on the site occasionally answer 404 with
    /// usable markup.
    async fn fetch_page_lenient(&self, url: &str) -> ScrapeResult<String> {
        self.fetch_page(url).await
    }

    /// Probe whether a remote asset exists (HEAD-equivalent). Best effort:
    /// any failure reads as "does not exist".
    async fn asset_exists(&self, url: &str) -> bool;
}

/// HTTP client with a direct rate limiter for respectful crawling.
pub struct HttpClient {
    client: Client,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration.
    pub fn new(config: HttpClientConfig) -> ScrapeResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| ScrapeError::Config(format!("invalid user agent: {e}")))?,
        );
        if let Some(cookie) = &config.cookie {
            headers.insert(
                COOKIE,
                HeaderValue::from_str(cookie)
                    .map_err(|e| ScrapeError::Config(format!("invalid cookie value: {e}")))?,
            );
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .redirect(if config.follow_redirects {
                reqwest::redirect::Policy::limited(10)
            } else {
                reqwest::redirect::Policy::none()
            })
            .build()
            .map_err(|e| ScrapeError::Config(format!("failed to build HTTP client: {e}")))?;

        let quota = Quota::per_second(
            NonZeroU32::new(config.max_requests_per_second)
                .ok_or_else(|| ScrapeError::Config("rate limit must be greater than 0".into()))?,
        );
        let rate_limiter = RateLimiter::direct(quota);

        Ok(Self {
            client,
            rate_limiter,
            config,
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    async fn get(&self, url: &str) -> ScrapeResult<reqwest::Response> {
        self.rate_limiter.until_ready().await;

        debug!("fetching {}", url);
        self.client
            .get(url)
            .send()
            .await
            .map_err(|source| ScrapeError::Fetch {
                url: url.to_string(),
                source,
            })
    }

    async fn body_text(&self, url: &str, response: reqwest::Response) -> ScrapeResult<String> {
        let text = response
            .text()
            .await
            .map_err(|source| ScrapeError::Fetch {
                url: url.to_string(),
                source,
            })?;
        if text.is_empty() {
            return Err(ScrapeError::EmptyBody {
                url: url.to_string(),
            });
        }
        Ok(text)
    }
}

#[async_trait]
impl DocumentFetcher for HttpClient {
    async fn fetch_page(&self, url: &str) -> ScrapeResult<String> {
        let response = self.get(url).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        self.body_text(url, response).await
    }

    async fn fetch_page_lenient(&self, url: &str) -> ScrapeResult<String> {
        let response = self.get(url).await?;
        let status = response.status();
        if !status.is_success() {
            warn!("tolerating HTTP {} from {}", status, url);
        }
        self.body_text(url, response).await
    }

    async fn asset_exists(&self, url: &str) -> bool {
        self.rate_limiter.until_ready().await;

        match self.client.head(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("existence probe failed for {}: {}", url, e);
                false
            }
        }
    }
}
