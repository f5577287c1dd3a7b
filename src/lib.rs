//! mgscrape - catalog metadata extraction for MGStage
//!
//! This crate extracts structured metadata (title, release date, cast,
//! artwork, identifiers) from MGStage product pages and discovers candidate
//! items by crawling the site's paginated search listings. The extraction
//! capability set is defined by the site-pluggable [`profile::SiteProfile`]
//! trait; MGStage is the one concrete profile shipped here.

// Module declarations
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod profile;

// Re-export commonly used items
pub use domain::metadata::{Actor, ArtworkRef, CatalogRecord, Rating, SearchHit};
pub use error::{ScrapeError, ScrapeResult};
pub use infrastructure::config::{AppConfig, ConfigManager, ProfileConfig};
pub use infrastructure::http_client::{DocumentFetcher, HttpClient, HttpClientConfig};
pub use profile::SiteProfile;
pub use profile::mgstage::MgstageProfile;
