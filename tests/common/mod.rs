//! Shared test fetcher: serves pages from an in-memory map.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use mgscrape::{DocumentFetcher, ScrapeError, ScrapeResult};

/// In-memory `DocumentFetcher`. Unknown URLs answer 404; fetched URLs are
/// recorded so tests can assert on traversal order.
pub struct StubFetcher {
    pages: HashMap<String, String>,
    pub asset_exists: bool,
    fetched: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            asset_exists: false,
            fetched: Mutex::new(Vec::new()),
        }
    }

    pub fn with_page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    pub fn fetched_urls(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentFetcher for StubFetcher {
    async fn fetch_page(&self, url: &str) -> ScrapeResult<String> {
        self.fetched.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| ScrapeError::HttpStatus {
                status: 404,
                url: url.to_string(),
            })
    }

    async fn asset_exists(&self, _url: &str) -> bool {
        self.asset_exists
    }
}
