//! Translation collaborator
//!
//! Best-effort Japanese-to-target-language translation used by the field
//! extractors. The profile wraps every call in a timeout and falls back to
//! the untranslated text, so implementations are free to fail loudly.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::error::{ScrapeError, ScrapeResult};

/// Source-language text in, target-language text out.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate running text (titles, plot, genre labels).
    async fn translate(&self, text: &str) -> ScrapeResult<String>;

    /// Transliterate a personal name into the target script rather than
    /// translating it word by word.
    async fn transliterate_name(&self, name: &str) -> ScrapeResult<String> {
        self.translate(name).await
    }
}

/// Pass-through translator for Japanese output and for tests.
pub struct NoopTranslator;

#[async_trait]
impl Translator for NoopTranslator {
    async fn translate(&self, text: &str) -> ScrapeResult<String> {
        Ok(text.to_string())
    }
}

/// Translator backed by the public Google translate endpoint.
pub struct GoogleTranslator {
    client: reqwest::Client,
    source: String,
    target: String,
}

const TRANSLATE_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

impl GoogleTranslator {
    /// Japanese-to-English translator with a bounded per-request timeout.
    pub fn japanese_to_english(timeout: Duration) -> ScrapeResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ScrapeError::Config(format!("failed to build translate client: {e}")))?;

        Ok(Self {
            client,
            source: "ja".to_string(),
            target: "en".to_string(),
        })
    }

    async fn request(&self, text: &str, flavor: &str) -> ScrapeResult<Value> {
        let response = self
            .client
            .get(TRANSLATE_ENDPOINT)
            .query(&[
                ("client", "gtx"),
                ("sl", self.source.as_str()),
                ("tl", self.target.as_str()),
                ("dt", flavor),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|source| ScrapeError::Fetch {
                url: TRANSLATE_ENDPOINT.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::HttpStatus {
                status: status.as_u16(),
                url: TRANSLATE_ENDPOINT.to_string(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|source| ScrapeError::Fetch {
                url: TRANSLATE_ENDPOINT.to_string(),
                source,
            })
    }

    /// Concatenate the given index of each response segment.
    fn collect_segments(payload: &Value, index: usize) -> Option<String> {
        let segments = payload.get(0)?.as_array()?;
        let joined: String = segments
            .iter()
            .filter_map(|segment| segment.get(index)?.as_str())
            .collect();
        Some(joined.trim().to_string()).filter(|s| !s.is_empty())
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str) -> ScrapeResult<String> {
        let payload = self.request(text, "t").await?;
        match Self::collect_segments(&payload, 0) {
            Some(translated) => Ok(translated),
            None => {
                debug!("translation response had no text segments");
                Ok(text.to_string())
            }
        }
    }

    async fn transliterate_name(&self, name: &str) -> ScrapeResult<String> {
        // The "rm" flavor returns romanization in the fourth segment slot;
        // fall back to plain translation when it is missing.
        let payload = self.request(name, "rm").await?;
        match Self::collect_segments(&payload, 3) {
            Some(romaji) => Ok(romaji),
            None => self.translate(name).await,
        }
    }
}
