//! Paginated search crawler
//!
//! Walks a site's search listings page by page: collect result entries in
//! document order, follow the "next page" link, and stop when there is no
//! unvisited next page. The visited set is the cycle guard - sites link
//! pagination back to earlier pages, and a URL is never fetched twice within
//! one crawl.

use std::collections::HashSet;

use scraper::{Html, Selector};
use tracing::{debug, info};

use crate::domain::metadata::{ArtworkRef, SearchHit};
use crate::error::{ScrapeError, ScrapeResult};
use crate::infrastructure::http_client::DocumentFetcher;
use crate::profile::resolve_url;

/// Compiled selectors describing one site's listing markup.
pub struct ListingSelectors {
    /// Anchors of individual result entries.
    pub result_link: Selector,
    /// Thumbnail image inside a result anchor.
    pub thumbnail: Selector,
    /// Candidate "next page" anchors; the last match is followed.
    pub next_page: Selector,
}

impl ListingSelectors {
    pub fn new(result_link: &str, thumbnail: &str, next_page: &str) -> ScrapeResult<Self> {
        Ok(Self {
            result_link: compile(result_link)?,
            thumbnail: compile(thumbnail)?,
            next_page: compile(next_page)?,
        })
    }
}

fn compile(selector: &str) -> ScrapeResult<Selector> {
    Selector::parse(selector).map_err(|e| ScrapeError::invalid_selector(selector, e))
}

/// Mutable state of one crawl; owned by `crawl` and dropped when it returns.
#[derive(Default)]
struct CrawlState {
    visited: HashSet<String>,
    results: Vec<SearchHit>,
}

/// Crawls paginated search listings through a [`DocumentFetcher`].
pub struct SearchCrawler<'a> {
    fetcher: &'a dyn DocumentFetcher,
    selectors: &'a ListingSelectors,
}

impl<'a> SearchCrawler<'a> {
    pub fn new(fetcher: &'a dyn DocumentFetcher, selectors: &'a ListingSelectors) -> Self {
        Self { fetcher, selectors }
    }

    /// Crawl from the first listing page until no unvisited next page
    /// remains.
    ///
    /// The first fetch failing fails the whole crawl - a partial result set
    /// without even one page is meaningless. Later fetch failures propagate
    /// the same way; a crawl either yields its full accumulated list or a
    /// single error.
    pub async fn crawl(&self, start_url: &str) -> ScrapeResult<Vec<SearchHit>> {
        let mut state = CrawlState::default();
        let mut current_url = start_url.to_string();
        let mut body = self.fetcher.fetch_page(&current_url).await?;

        loop {
            let (hits, next_url) = self.parse_listing(&body, &current_url);
            debug!("{}: {} result entries", current_url, hits.len());
            state.visited.insert(current_url.clone());
            state.results.extend(hits);

            let Some(next_url) = next_url else { break };
            if state.visited.contains(&next_url) {
                debug!("next page {} already visited, stopping", next_url);
                break;
            }

            body = self.fetcher.fetch_page(&next_url).await?;
            current_url = next_url;
        }

        info!(
            "crawl finished: {} results across {} pages",
            state.results.len(),
            state.visited.len()
        );
        Ok(state.results)
    }

    /// Same traversal, then drop any result whose URL contains the excluded
    /// fragment. A post-filter, not a different crawl strategy.
    pub async fn crawl_filtered(
        &self,
        start_url: &str,
        excluded_fragment: &str,
    ) -> ScrapeResult<Vec<SearchHit>> {
        let hits = self.crawl(start_url).await?;
        Ok(hits
            .into_iter()
            .filter(|hit| !hit.url.contains(excluded_fragment))
            .collect())
    }

    /// Extract result entries and the next-page target from one listing
    /// page. Synchronous: the parsed document never crosses an await.
    fn parse_listing(&self, body: &str, page_url: &str) -> (Vec<SearchHit>, Option<String>) {
        let document = Html::parse_document(body);

        let hits = document
            .select(&self.selectors.result_link)
            .filter_map(|anchor| {
                let href = anchor.value().attr("href")?;
                let url = resolve_url(page_url, href)?;
                let label = Some(
                    anchor
                        .text()
                        .collect::<String>()
                        .split_whitespace()
                        .collect::<Vec<_>>()
                        .join(" "),
                )
                .filter(|text| !text.is_empty());
                let thumbnail = anchor
                    .select(&self.selectors.thumbnail)
                    .next()
                    .and_then(|img| img.value().attr("src"))
                    .and_then(|src| resolve_url(page_url, src))
                    .map(ArtworkRef::new);

                Some(SearchHit {
                    url,
                    label,
                    thumbnail,
                })
            })
            .collect();

        let next_url = document
            .select(&self.selectors.next_page)
            .last()
            .and_then(|anchor| anchor.value().attr("href"))
            .and_then(|href| resolve_url(page_url, href));

        (hits, next_url)
    }
}
