//! Configuration infrastructure
//!
//! Application settings persisted as JSON under the user config directory,
//! the immutable per-profile configuration derived from them at construction
//! time, and the MGStage site constants.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::info;

use super::http_client::HttpClientConfig;

/// MGStage site constants.
pub mod mgstage {
    /// Site base URL.
    pub const BASE_URL: &str = "https://www.mgstage.com";

    /// Search endpoint; the URL-encoded query token is appended.
    pub const SEARCH_ENDPOINT: &str = "https://www.mgstage.com/search/search.php?search_word=";

    /// Base of the sample trailer asset host. Trailer URLs follow
    /// `{SAMPLE_BASE}/{maker}/{prefix}/{number}/{code}_sample.mp4`.
    pub const SAMPLE_BASE: &str = "https://sample.mgstage.com/sample";

    /// Age-check cookie required before the site serves product pages.
    pub const AGE_CHECK_COOKIE: &str = "adc=1";

    /// Fixed content classification for everything on this site.
    pub const ADULT_CONTENT_RATING: &str = "XXX";

    /// Maximum of the site's review-star scale.
    pub const MAX_RATING: f32 = 5.0;

    /// Breadcrumb label marking a streaming-only release (no physical
    /// packaging, so cover images have no back side to crop away).
    pub const STREAMING_ONLY_BREADCRUMB: &str = "配信専用動画";

    /// URL fragment identifying physical-disc listings in search results.
    pub const DVD_LISTING_MARKER: &str = "/mono/dvd/";

    /// Taxonomy IDs that appear under the genre heading but are not genres.
    pub const EXCLUDED_GENRE_IDS: [&str; 2] = ["6529", "6102"];
}

/// Output language for extracted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Japanese,
}

/// Complete application configuration, persisted between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Target language for titles, plot, genres and names.
    pub language: Language,

    /// Probe for sample trailers and include them in the record.
    pub scrape_trailers: bool,

    /// Collect extra fanart beyond poster and fanart.
    pub scrape_extra_fanart: bool,

    /// Per-call budget for the translation collaborator.
    pub translation_timeout_seconds: u64,

    /// HTTP transport settings.
    pub http: HttpClientConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            language: Language::English,
            scrape_trailers: true,
            scrape_extra_fanart: false,
            translation_timeout_seconds: 10,
            http: HttpClientConfig {
                cookie: Some(mgstage::AGE_CHECK_COOKIE.to_string()),
                ..HttpClientConfig::default()
            },
        }
    }
}

/// Immutable per-profile configuration, fixed at construction.
///
/// The profile never mutates these flags afterwards, so every extractor's
/// behavior is fully determined by the document it is handed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileConfig {
    /// Funnel extracted Japanese text through the translation collaborator.
    pub translate: bool,
    pub scrape_trailers: bool,
    pub scrape_extra_fanart: bool,
    pub translation_timeout: Duration,
}

impl From<&AppConfig> for ProfileConfig {
    fn from(app: &AppConfig) -> Self {
        Self {
            translate: app.language == Language::English,
            scrape_trailers: app.scrape_trailers,
            scrape_extra_fanart: app.scrape_extra_fanart,
            translation_timeout: Duration::from_secs(app.translation_timeout_seconds),
        }
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

/// Loads and saves the application configuration file.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Get the application configuration directory.
    pub fn get_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get user config directory")?
            .join("mgscrape");

        Ok(config_dir)
    }

    /// Create a new configuration manager.
    pub fn new() -> Result<Self> {
        let config_path = Self::get_config_dir()?.join("config.json");
        Ok(Self { config_path })
    }

    /// Create a manager over an explicit config file path.
    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Load the configuration, writing defaults on first run.
    pub async fn load_config(&self) -> Result<AppConfig> {
        if !self.config_path.exists() {
            info!("first run - writing default configuration to {:?}", self.config_path);
            let default_config = AppConfig::default();
            self.save_config(&default_config).await?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(&self.config_path)
            .await
            .with_context(|| format!("Failed to read config file: {:?}", self.config_path))?;
        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", self.config_path))?;

        Ok(config)
    }

    /// Save the configuration to disk.
    pub async fn save_config(&self, config: &AppConfig) -> Result<()> {
        if let Some(config_dir) = self.config_path.parent() {
            if !config_dir.exists() {
                fs::create_dir_all(config_dir)
                    .await
                    .context("Failed to create config directory")?;
            }
        }

        let content =
            serde_json::to_string_pretty(config).context("Failed to serialize configuration")?;
        fs::write(&self.config_path, content)
            .await
            .with_context(|| format!("Failed to write config file: {:?}", self.config_path))?;

        Ok(())
    }
}
