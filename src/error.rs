//! Error types for scraping operations
//!
//! Field absence is never an error: extractors signal it with `None` or an
//! empty list. These types cover the failures that do propagate - fetching a
//! page, building the HTTP client, or compiling a selector.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("empty response body from {url}")]
    EmptyBody { url: String },

    #[error("invalid CSS selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("configuration error: {0}")]
    Config(String),
}

impl ScrapeError {
    pub fn invalid_selector(selector: &str, reason: impl std::fmt::Display) -> Self {
        Self::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type ScrapeResult<T> = Result<T, ScrapeError>;
