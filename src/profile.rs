//! Site profile layer - the extraction capability set
//!
//! A profile binds one site's markup conventions to the generic capability
//! set: build a search query, crawl search results, fetch a result's
//! document, and extract a full metadata record. Shared helpers that every
//! profile needs (URL resolution) live here instead of a base type.

pub mod crawler;
pub mod mgstage;

use async_trait::async_trait;

use crate::domain::metadata::{CatalogRecord, SearchHit};
use crate::error::ScrapeResult;

// Re-export commonly used items
pub use crawler::{ListingSelectors, SearchCrawler};
pub use mgstage::MgstageProfile;

/// Capability set implemented per site.
#[async_trait]
pub trait SiteProfile: Send + Sync {
    /// Human-readable site name.
    fn site_name(&self) -> &'static str;

    /// Build the search URL for a query token.
    fn search_url(&self, token: &str) -> String;

    /// Crawl the paginated search listings for a query token.
    ///
    /// Fails if the first listing page cannot be fetched; otherwise returns
    /// the accumulated (possibly empty) results in listing order.
    async fn search(&self, token: &str) -> ScrapeResult<Vec<SearchHit>>;

    /// Fetch the product document behind a search result.
    async fn fetch_document(&self, hit: &SearchHit) -> ScrapeResult<String>;

    /// Extract a full metadata record from a fetched product page.
    ///
    /// Always completes: fields whose elements are missing come back blank,
    /// and best-effort collaborators (translation, trailer probe) degrade
    /// instead of failing the record.
    async fn extract(&self, page_html: &str, page_url: &str) -> CatalogRecord;
}

/// Resolve an href against the page it appeared on. Absolute links pass
/// through; anything unresolvable is dropped rather than propagated.
pub(crate) fn resolve_url(base: &str, href: &str) -> Option<String> {
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }
    url::Url::parse(base)
        .ok()?
        .join(href)
        .ok()
        .map(|u| u.to_string())
}
