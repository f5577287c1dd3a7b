//! MGStage site profile
//!
//! Field extractors, artwork resolution and search crawling for
//! www.mgstage.com product pages. Each extractor is a selector plus a small
//! cleanup step; a missing element yields the blank sentinel and never fails
//! the record. Detail fields live in label/value table rows, so lookups walk
//! the rows and match the `th` label text instead of relying on a
//! `:contains` pseudo-class.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tokio::time::timeout;
use tracing::warn;

use crate::domain::identifier::normalize_id;
use crate::domain::metadata::{Actor, ArtworkRef, CatalogRecord, Rating, SearchHit};
use crate::error::{ScrapeError, ScrapeResult};
use crate::infrastructure::config::{ProfileConfig, mgstage};
use crate::infrastructure::http_client::DocumentFetcher;
use crate::infrastructure::translation::Translator;
use crate::profile::crawler::{ListingSelectors, SearchCrawler};
use crate::profile::{SiteProfile, resolve_url};

// Detail table row labels (the trailing ： is left off so both full-width
// and half-width colons match).
const RELEASE_DATE_LABEL: &str = "配信開始日";
const RUNTIME_LABEL: &str = "収録時間";
const MAKER_LABEL: &str = "メーカー";
const CODE_LABEL: &str = "品番";
const SERIES_LABEL: &str = "シリーズ";
const GENRE_LABEL: &str = "ジャンル";
const CAST_LABEL: &str = "出演";
const STUDIO_LABEL: &str = "レーベル";

static RATING_VALUE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+(?:\.\d+)?)").expect("rating pattern"));
static VOTE_COUNT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\((\d+)[^)]*\)").expect("vote pattern"));
static AGE_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\(\d{2}\)").expect("age pattern"));
static TAXONOMY_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:image_word_ids\[\]=|id=)(\d+)").expect("taxonomy pattern"));

/// Hand-curated genre ID -> English label table; a hit here beats the
/// generic translator.
static GENRE_OVERRIDES: Lazy<HashMap<String, String>> = Lazy::new(|| {
    serde_json::from_str(include_str!("../assets/genre_overrides.json"))
        .expect("bundled genre override table is valid JSON")
});

/// Hand-curated performer ID -> romanized name table.
static ACTOR_OVERRIDES: Lazy<HashMap<String, String>> = Lazy::new(|| {
    serde_json::from_str(include_str!("../assets/actor_overrides.json"))
        .expect("bundled actor override table is valid JSON")
});

/// Artwork derivation mode. All three run through the same routine with
/// different crop behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtworkMode {
    /// Front cover; requests a crop of the combined case image.
    Poster,
    /// Full case image, uncropped.
    Fanart,
    /// Extra art pass. Currently always empty: the site's full-size extra
    /// images are only reachable through JavaScript, and the thumbnail
    /// upscaling fallback was never wired in.
    ExtraFanart,
}

/// Compiled selectors for the product detail page.
struct DetailSelectors {
    title: Selector,
    review: Selector,
    plot_primary: Selector,
    plot_fallback: Selector,
    detail_row: Selector,
    row_label: Selector,
    row_value: Selector,
    cell_link: Selector,
    cell_search_link: Selector,
    trailer_button: Selector,
    enlarge_anchor: Selector,
    image: Selector,
    breadcrumb_item: Selector,
}

impl DetailSelectors {
    fn compile() -> ScrapeResult<Self> {
        Ok(Self {
            title: sel(".tag")?,
            review: sel(".review")?,
            plot_primary: sel("p.txt.introduction")?,
            plot_fallback: sel("tbody .mg-b20.lh4")?,
            detail_row: sel("tr")?,
            row_label: sel("th")?,
            row_value: sel("td")?,
            cell_link: sel("a[href]")?,
            cell_search_link: sel("a[href*='/search']")?,
            trailer_button: sel("p.sample_movie_btn a")?,
            enlarge_anchor: sel("a#EnlargeImage")?,
            image: sel("img")?,
            breadcrumb_item: sel("ul.Bread_crumb li")?,
        })
    }
}

fn sel(selector: &str) -> ScrapeResult<Selector> {
    Selector::parse(selector).map_err(|e| ScrapeError::invalid_selector(selector, e))
}

fn collapse_ws<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// A taxonomy link from a detail row: the site-assigned ID embedded in the
/// href (when present) plus the display text.
struct TaxonomyEntry {
    id: Option<String>,
    text: String,
}

/// Untranslated extraction output; translation and the trailer probe run
/// afterwards so the parsed document never crosses an await point.
#[derive(Default)]
struct RawExtraction {
    title: Option<String>,
    series: Option<String>,
    rating: Option<Rating>,
    votes: Option<u32>,
    release_date: Option<String>,
    year: Option<i32>,
    runtime_minutes: Option<u32>,
    plot: Option<String>,
    raw_id: Option<String>,
    genres: Vec<TaxonomyEntry>,
    actors: Vec<TaxonomyEntry>,
    studio: Option<String>,
    maker_code: Option<String>,
    has_sample_button: bool,
    poster: Option<ArtworkRef>,
    fanart: Vec<ArtworkRef>,
    extra_fanart: Vec<ArtworkRef>,
}

/// The MGStage extraction profile.
pub struct MgstageProfile {
    config: ProfileConfig,
    fetcher: Arc<dyn DocumentFetcher>,
    translator: Arc<dyn Translator>,
    selectors: DetailSelectors,
    listing: ListingSelectors,
}

impl MgstageProfile {
    pub fn new(
        config: ProfileConfig,
        fetcher: Arc<dyn DocumentFetcher>,
        translator: Arc<dyn Translator>,
    ) -> ScrapeResult<Self> {
        Ok(Self {
            config,
            fetcher,
            translator,
            selectors: DetailSelectors::compile()?,
            listing: ListingSelectors::new(
                "div.search_list li a[href*='/product']",
                "img",
                "div.list-boxcaptside.list-boxpagenation ul li:not(.terminal) a",
            )?,
        })
    }

    pub fn config(&self) -> &ProfileConfig {
        &self.config
    }

    /// Search variant that drops physical-disc listings from the results.
    pub async fn search_excluding_dvd(&self, token: &str) -> ScrapeResult<Vec<SearchHit>> {
        let crawler = SearchCrawler::new(self.fetcher.as_ref(), &self.listing);
        crawler
            .crawl_filtered(&self.search_url(token), mgstage::DVD_LISTING_MARKER)
            .await
    }

    // ---- detail table helpers ------------------------------------------

    /// All `td` cells whose row label contains the given text.
    fn detail_cells<'a>(&self, document: &'a Html, label: &str) -> Vec<ElementRef<'a>> {
        document
            .select(&self.selectors.detail_row)
            .filter(|row| {
                row.select(&self.selectors.row_label)
                    .next()
                    .is_some_and(|th| th.text().collect::<String>().contains(label))
            })
            .filter_map(|row| row.select(&self.selectors.row_value).next())
            .collect()
    }

    fn detail_cell<'a>(&self, document: &'a Html, label: &str) -> Option<ElementRef<'a>> {
        self.detail_cells(document, label).into_iter().next()
    }

    fn cell_text(&self, document: &Html, label: &str) -> Option<String> {
        self.detail_cell(document, label)
            .map(|cell| collapse_ws(cell.text()))
            .filter(|text| !text.is_empty())
    }

    // ---- field extractors ----------------------------------------------

    fn extract_title(&self, document: &Html) -> Option<String> {
        document
            .select(&self.selectors.title)
            .next()
            .map(|el| collapse_ws(el.text()))
            .filter(|text| !text.is_empty())
    }

    fn extract_series(&self, document: &Html) -> Option<String> {
        let cell = self.detail_cell(document, SERIES_LABEL)?;
        cell.select(&self.selectors.cell_search_link)
            .next()
            .map(|link| collapse_ws(link.text()))
            .filter(|text| !text.is_empty())
    }

    /// Star rating from the review element. The vote count lives in the
    /// same text node but is extracted independently - a rating without a
    /// parenthetical count is still a rating.
    fn extract_rating(&self, document: &Html) -> Option<Rating> {
        let text = document
            .select(&self.selectors.review)
            .next()
            .map(|el| collapse_ws(el.text()))?;
        let without_votes = VOTE_COUNT.replace(&text, "");
        let value = RATING_VALUE
            .captures(&without_votes)?
            .get(1)?
            .as_str()
            .parse::<f32>()
            .ok()?;
        Some(Rating::new(value, mgstage::MAX_RATING))
    }

    fn extract_votes(&self, document: &Html) -> Option<u32> {
        let text = document
            .select(&self.selectors.review)
            .next()
            .map(|el| collapse_ws(el.text()))?;
        VOTE_COUNT
            .captures(&text)?
            .get(1)?
            .as_str()
            .parse::<u32>()
            .ok()
    }

    /// `YYYY/MM/DD` from the release-date row, re-rendered as ISO
    /// `YYYY-MM-DD`.
    fn extract_release_date(&self, document: &Html) -> Option<String> {
        let text = self.cell_text(document, RELEASE_DATE_LABEL)?;
        NaiveDate::parse_from_str(text.trim(), "%Y/%m/%d")
            .ok()
            .map(|date| date.format("%Y-%m-%d").to_string())
    }

    fn extract_year(release_date: Option<&str>) -> Option<i32> {
        release_date?.get(0..4)?.parse::<i32>().ok()
    }

    fn extract_runtime(&self, document: &Html) -> Option<u32> {
        let text = self.cell_text(document, RUNTIME_LABEL)?;
        // "90分" - drop the unit, keep the number.
        let digits: String = text.chars().filter(char::is_ascii_digit).collect();
        digits.parse::<u32>().ok()
    }

    fn extract_plot(&self, document: &Html, page_url: &str) -> Option<String> {
        let primary = document.select(&self.selectors.plot_primary).next();
        // Rental-layout pages keep the synopsis in a different block.
        let element = if primary.is_none() || page_url.contains("/digital/video") {
            document
                .select(&self.selectors.plot_fallback)
                .next()
                .or(primary)
        } else {
            primary
        };
        element
            .map(|el| collapse_ws(el.text()))
            .filter(|text| !text.is_empty())
    }

    fn extract_raw_id(&self, document: &Html) -> Option<String> {
        self.cell_text(document, CODE_LABEL)
    }

    fn extract_genres(&self, document: &Html) -> Vec<TaxonomyEntry> {
        let Some(cell) = self.detail_cell(document, GENRE_LABEL) else {
            return Vec::new();
        };
        cell.select(&self.selectors.cell_search_link)
            .filter_map(|link| {
                let text = collapse_ws(link.text());
                if text.is_empty() {
                    return None;
                }
                let id = link
                    .value()
                    .attr("href")
                    .and_then(|href| TAXONOMY_ID.captures(href))
                    .map(|caps| caps[1].to_string());
                Some(TaxonomyEntry { id, text })
            })
            .collect()
    }

    /// Performer credits. Web releases often list bare names with no page
    /// of their own; those come through as the cell text. Names carry an
    /// occasional `(NN)` age suffix that gets stripped.
    fn extract_actors(&self, document: &Html) -> Vec<TaxonomyEntry> {
        let mut actors = Vec::new();
        for cell in self.detail_cells(document, CAST_LABEL) {
            let links: Vec<_> = cell.select(&self.selectors.cell_search_link).collect();
            if links.is_empty() {
                let name = AGE_SUFFIX.replace_all(&collapse_ws(cell.text()), "").trim().to_string();
                if !name.is_empty() {
                    actors.push(TaxonomyEntry { id: None, text: name });
                }
                continue;
            }
            for link in links {
                let name = AGE_SUFFIX.replace_all(&collapse_ws(link.text()), "").trim().to_string();
                if name.is_empty() {
                    continue;
                }
                let id = link
                    .value()
                    .attr("href")
                    .and_then(|href| TAXONOMY_ID.captures(href))
                    .map(|caps| caps[1].to_string());
                actors.push(TaxonomyEntry { id, text: name });
            }
        }
        actors
    }

    fn extract_studio(&self, document: &Html) -> Option<String> {
        let cell = self.detail_cell(document, STUDIO_LABEL)?;
        cell.select(&self.selectors.cell_search_link)
            .next()
            .map(|link| collapse_ws(link.text()))
            .filter(|text| !text.is_empty())
    }

    /// Maker code from the maker search link's query parameter; feeds the
    /// trailer URL template.
    fn extract_maker_code(&self, document: &Html) -> Option<String> {
        let cell = self.detail_cell(document, MAKER_LABEL)?;
        let href = cell
            .select(&self.selectors.cell_link)
            .next()?
            .value()
            .attr("href")?;
        let (_, rest) = href.split_once("image_word_ids[]=")?;
        let code = rest.split('&').next().unwrap_or(rest).trim();
        Some(code.to_string()).filter(|c| !c.is_empty())
    }

    fn has_sample_button(&self, document: &Html) -> bool {
        document.select(&self.selectors.trailer_button).next().is_some()
    }

    /// Streaming-only releases have no physical packaging, so the cover
    /// image is a plain front cover with nothing to crop away.
    fn is_streaming_only(&self, document: &Html) -> bool {
        document
            .select(&self.selectors.breadcrumb_item)
            .any(|li| {
                li.text()
                    .collect::<String>()
                    .contains(mgstage::STREAMING_ONLY_BREADCRUMB)
            })
    }

    /// Shared artwork derivation for all three modes.
    fn resolve_artwork(
        &self,
        document: &Html,
        page_url: &str,
        mode: ArtworkMode,
    ) -> Vec<ArtworkRef> {
        if mode == ArtworkMode::ExtraFanart {
            return Vec::new();
        }

        let Some(anchor) = document.select(&self.selectors.enlarge_anchor).next() else {
            return Vec::new();
        };
        let link = anchor
            .value()
            .attr("href")
            .filter(|href| !href.is_empty())
            .map(str::to_string)
            .or_else(|| {
                anchor
                    .select(&self.selectors.image)
                    .next()
                    .and_then(|img| img.value().attr("src"))
                    .map(str::to_string)
            });
        let Some(url) = link.and_then(|href| resolve_url(page_url, &href)) else {
            return Vec::new();
        };

        let crop = mode == ArtworkMode::Poster && !self.is_streaming_only(document);
        if crop {
            vec![ArtworkRef::with_crop(url)]
        } else {
            vec![ArtworkRef::new(url)]
        }
    }

    fn extract_raw(&self, document: &Html, page_url: &str) -> RawExtraction {
        let release_date = self.extract_release_date(document);
        let year = Self::extract_year(release_date.as_deref());
        let extra_fanart = if self.config.scrape_extra_fanart {
            self.resolve_artwork(document, page_url, ArtworkMode::ExtraFanart)
        } else {
            Vec::new()
        };

        RawExtraction {
            title: self.extract_title(document),
            series: self.extract_series(document),
            rating: self.extract_rating(document),
            votes: self.extract_votes(document),
            release_date,
            year,
            runtime_minutes: self.extract_runtime(document),
            plot: self.extract_plot(document, page_url),
            raw_id: self.extract_raw_id(document),
            genres: self.extract_genres(document),
            actors: self.extract_actors(document),
            studio: self.extract_studio(document),
            maker_code: self.extract_maker_code(document),
            has_sample_button: self.has_sample_button(document),
            poster: self
                .resolve_artwork(document, page_url, ArtworkMode::Poster)
                .into_iter()
                .next(),
            fanart: self.resolve_artwork(document, page_url, ArtworkMode::Fanart),
            extra_fanart,
        }
    }

    // ---- best-effort collaborators -------------------------------------

    /// Translate, falling back to the untranslated text on failure or
    /// timeout. Translation is never fatal to a record.
    async fn best_effort_translate(&self, text: String) -> String {
        if !self.config.translate {
            return text;
        }
        match timeout(self.config.translation_timeout, self.translator.translate(&text)).await {
            Ok(Ok(translated)) if !translated.trim().is_empty() => translated,
            Ok(Ok(_)) => text,
            Ok(Err(e)) => {
                warn!("translation failed, keeping original text: {e}");
                text
            }
            Err(_) => {
                warn!("translation timed out after {:?}", self.config.translation_timeout);
                text
            }
        }
    }

    async fn best_effort_transliterate(&self, name: String) -> String {
        if !self.config.translate {
            return name;
        }
        match timeout(
            self.config.translation_timeout,
            self.translator.transliterate_name(&name),
        )
        .await
        {
            Ok(Ok(romanized)) if !romanized.trim().is_empty() => romanized,
            Ok(Ok(_)) => name,
            Ok(Err(e)) => {
                warn!("name transliteration failed, keeping original: {e}");
                name
            }
            Err(_) => {
                warn!("name transliteration timed out");
                name
            }
        }
    }

    async fn translate_opt(&self, value: Option<String>) -> Option<String> {
        match value {
            Some(text) => Some(self.best_effort_translate(text).await),
            None => None,
        }
    }

    /// Known non-genre taxonomy entries are dropped; curated overrides beat
    /// the generic translator; everything else passes through translation.
    async fn finalize_genres(&self, entries: Vec<TaxonomyEntry>) -> Vec<String> {
        let mut genres = Vec::with_capacity(entries.len());
        for entry in entries {
            if let Some(id) = &entry.id {
                if mgstage::EXCLUDED_GENRE_IDS.contains(&id.as_str()) {
                    continue;
                }
                if self.config.translate {
                    if let Some(curated) = GENRE_OVERRIDES.get(id) {
                        genres.push(curated.clone());
                        continue;
                    }
                }
            }
            genres.push(self.best_effort_translate(entry.text).await);
        }
        genres
    }

    async fn finalize_actors(&self, entries: Vec<TaxonomyEntry>) -> Vec<Actor> {
        let mut actors = Vec::with_capacity(entries.len());
        for entry in entries {
            if self.config.translate {
                if let Some(id) = &entry.id {
                    if let Some(curated) = ACTOR_OVERRIDES.get(id) {
                        actors.push(Actor::named(curated.clone()));
                        continue;
                    }
                }
            }
            actors.push(Actor::named(self.best_effort_transliterate(entry.text).await));
        }
        actors
    }

    /// Derive the sample trailer URL and probe it for existence. Every
    /// failure path degrades to `None`.
    async fn derive_trailer(&self, raw: &RawExtraction) -> Option<String> {
        if !self.config.scrape_trailers || !raw.has_sample_button {
            return None;
        }
        let maker = raw.maker_code.as_deref()?;
        let code = normalize_id(raw.raw_id.as_deref()?);
        let (prefix, number) = code.split_once('-')?;
        if prefix.is_empty() || number.is_empty() {
            return None;
        }

        let url = format!(
            "{}/{}/{}/{}/{}_sample.mp4",
            mgstage::SAMPLE_BASE,
            maker,
            prefix.to_lowercase(),
            number,
            code
        );
        if self.fetcher.asset_exists(&url).await {
            Some(url)
        } else {
            warn!("sample button present but no trailer at {}", url);
            None
        }
    }
}

#[async_trait]
impl SiteProfile for MgstageProfile {
    fn site_name(&self) -> &'static str {
        "MGStage.com"
    }

    fn search_url(&self, token: &str) -> String {
        format!("{}{}", mgstage::SEARCH_ENDPOINT, urlencoding::encode(token))
    }

    async fn search(&self, token: &str) -> ScrapeResult<Vec<SearchHit>> {
        let crawler = SearchCrawler::new(self.fetcher.as_ref(), &self.listing);
        crawler.crawl(&self.search_url(token)).await
    }

    async fn fetch_document(&self, hit: &SearchHit) -> ScrapeResult<String> {
        self.fetcher.fetch_page_lenient(&hit.url).await
    }

    async fn extract(&self, page_html: &str, page_url: &str) -> CatalogRecord {
        let raw = {
            let document = Html::parse_document(page_html);
            self.extract_raw(&document, page_url)
        };

        let trailer_url = self.derive_trailer(&raw).await;
        let title = self.translate_opt(raw.title.clone()).await;
        let set = self.translate_opt(raw.series).await;
        let plot = self.translate_opt(raw.plot).await;
        let studio = self.translate_opt(raw.studio).await;
        let genres = self.finalize_genres(raw.genres).await;
        let actors = self.finalize_actors(raw.actors).await;

        CatalogRecord {
            title,
            original_title: raw.title,
            sort_title: None,
            set,
            rating: raw.rating,
            votes: raw.votes,
            release_date: raw.release_date,
            year: raw.year,
            runtime_minutes: raw.runtime_minutes,
            outline: None,
            plot,
            tagline: None,
            trailer_url,
            poster: raw.poster,
            fanart: raw.fanart,
            extra_fanart: raw.extra_fanart,
            content_rating: Some(mgstage::ADULT_CONTENT_RATING.to_string()),
            id: raw.raw_id.as_deref().map(normalize_id),
            genres,
            actors,
            directors: Vec::new(),
            studio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::translation::NoopTranslator;

    struct StubFetcher {
        trailer_exists: bool,
    }

    #[async_trait]
    impl DocumentFetcher for StubFetcher {
        async fn fetch_page(&self, url: &str) -> ScrapeResult<String> {
            Err(ScrapeError::HttpStatus {
                status: 404,
                url: url.to_string(),
            })
        }

        async fn asset_exists(&self, _url: &str) -> bool {
            self.trailer_exists
        }
    }

    fn profile_with(config: ProfileConfig, trailer_exists: bool) -> MgstageProfile {
        MgstageProfile::new(
            config,
            Arc::new(StubFetcher { trailer_exists }),
            Arc::new(NoopTranslator),
        )
        .unwrap()
    }

    fn profile() -> MgstageProfile {
        profile_with(ProfileConfig::default(), true)
    }

    const DETAIL_PAGE: &str = r##"
        <html><body>
        <ul class="Bread_crumb"><li>MGS</li><li>シロウトTV</li></ul>
        <h1 class="tag">初撮り。ある日の午後</h1>
        <div class="review">4.20 (135 件) のレビュー</div>
        <div class="detail_data"><table class="mg-b20">
          <tr><th>出演：</th><td>さくら (23)</td></tr>
          <tr><th>メーカー：</th><td><a href="/search/search.php?image_word_ids[]=shirouto">シロウト</a></td></tr>
          <tr><th>収録時間：</th><td>90分</td></tr>
          <tr><th>品番：</th><td>siro00123</td></tr>
          <tr><th>配信開始日：</th><td>2015/04/25</td></tr>
          <tr><th>シリーズ：</th><td><a href="/search/cSearch.php?series_id=99">シロウトTV</a></td></tr>
          <tr><th>レーベル：</th><td><a href="/search/search.php?image_word_ids[]=1">シロウトTVレーベル</a></td></tr>
          <tr><th>ジャンル：</th><td>
            <a href="/search/search.php?id=5001">中出し</a>
            <a href="/search/search.php?id=6102">サンプル動画</a>
            <a href="/search/search.php?id=4025">ハメ撮り</a>
          </td></tr>
        </table></div>
        <p class="txt introduction">彼女の初めての撮影。</p>
        <p class="sample_movie_btn"><a href="#">サンプル動画</a></p>
        <a id="EnlargeImage" href="/images/shirouto/siro/123/pb_e_siro-123.jpg"><img src="/images/t.jpg"></a>
        </body></html>
    "##;

    const PAGE_URL: &str = "https://www.mgstage.com/product/product_detail/SIRO-123/";

    #[test]
    fn rating_and_votes_come_from_the_same_element_independently() {
        let profile = profile();
        let doc = Html::parse_document(DETAIL_PAGE);
        assert_eq!(
            profile.extract_rating(&doc),
            Some(Rating::new(4.20, mgstage::MAX_RATING))
        );
        assert_eq!(profile.extract_votes(&doc), Some(135));

        let no_votes = Html::parse_document(r#"<div class="review">4.20</div>"#);
        assert_eq!(
            profile.extract_rating(&no_votes),
            Some(Rating::new(4.20, mgstage::MAX_RATING))
        );
        assert_eq!(profile.extract_votes(&no_votes), None);
    }

    #[test]
    fn release_date_is_rendered_iso_and_year_derived() {
        let profile = profile();
        let doc = Html::parse_document(DETAIL_PAGE);
        let date = profile.extract_release_date(&doc);
        assert_eq!(date.as_deref(), Some("2015-04-25"));
        assert_eq!(MgstageProfile::extract_year(date.as_deref()), Some(2015));
    }

    #[test]
    fn runtime_strips_the_minutes_unit() {
        let profile = profile();
        let doc = Html::parse_document(DETAIL_PAGE);
        assert_eq!(profile.extract_runtime(&doc), Some(90));
    }

    #[test]
    fn missing_elements_yield_blank_sentinels_not_errors() {
        let profile = profile();
        let doc = Html::parse_document("<html><body><p>nothing here</p></body></html>");
        assert_eq!(profile.extract_title(&doc), None);
        assert_eq!(profile.extract_rating(&doc), None);
        assert_eq!(profile.extract_votes(&doc), None);
        assert_eq!(profile.extract_release_date(&doc), None);
        assert_eq!(profile.extract_runtime(&doc), None);
        assert_eq!(profile.extract_raw_id(&doc), None);
        assert_eq!(profile.extract_studio(&doc), None);
        assert_eq!(profile.extract_maker_code(&doc), None);
        assert!(profile.extract_genres(&doc).is_empty());
        assert!(profile.extract_actors(&doc).is_empty());
        assert!(profile.resolve_artwork(&doc, PAGE_URL, ArtworkMode::Poster).is_empty());
    }

    #[test]
    fn actor_names_lose_their_age_suffix() {
        let profile = profile();
        let doc = Html::parse_document(DETAIL_PAGE);
        let actors = profile.extract_actors(&doc);
        assert_eq!(actors.len(), 1);
        assert_eq!(actors[0].text, "さくら");
    }

    #[test]
    fn maker_code_comes_from_the_search_link_query() {
        let profile = profile();
        let doc = Html::parse_document(DETAIL_PAGE);
        assert_eq!(profile.extract_maker_code(&doc).as_deref(), Some("shirouto"));
    }

    #[test]
    fn poster_requests_crop_for_packaged_releases() {
        let profile = profile();
        let doc = Html::parse_document(DETAIL_PAGE);
        let poster = profile.resolve_artwork(&doc, PAGE_URL, ArtworkMode::Poster);
        assert_eq!(poster.len(), 1);
        assert!(poster[0].crop_cover);
        assert_eq!(
            poster[0].url,
            "https://www.mgstage.com/images/shirouto/siro/123/pb_e_siro-123.jpg"
        );

        let fanart = profile.resolve_artwork(&doc, PAGE_URL, ArtworkMode::Fanart);
        assert_eq!(fanart.len(), 1);
        assert!(!fanart[0].crop_cover);
    }

    #[test]
    fn streaming_only_release_never_gets_a_crop_flag() {
        let profile = profile();
        let streaming = DETAIL_PAGE.replace("シロウトTV</li>", "配信専用動画</li>");
        let doc = Html::parse_document(&streaming);
        let poster = profile.resolve_artwork(&doc, PAGE_URL, ArtworkMode::Poster);
        assert_eq!(poster.len(), 1);
        assert!(!poster[0].crop_cover);
    }

    #[test]
    fn extra_fanart_pass_is_a_noop() {
        let profile = profile();
        let doc = Html::parse_document(DETAIL_PAGE);
        assert!(profile.resolve_artwork(&doc, PAGE_URL, ArtworkMode::ExtraFanart).is_empty());
    }

    #[test]
    fn artwork_falls_back_to_the_image_source() {
        let profile = profile();
        let doc = Html::parse_document(
            r#"<a id="EnlargeImage"><img src="/images/cover.jpg"></a>"#,
        );
        let fanart = profile.resolve_artwork(&doc, PAGE_URL, ArtworkMode::Fanart);
        assert_eq!(fanart.len(), 1);
        assert_eq!(fanart[0].url, "https://www.mgstage.com/images/cover.jpg");
    }

    #[test]
    fn search_url_is_percent_encoded() {
        let profile = profile();
        assert_eq!(
            profile.search_url("SIRO-3334"),
            "https://www.mgstage.com/search/search.php?search_word=SIRO-3334"
        );
        assert_eq!(
            profile.search_url("初 撮り"),
            "https://www.mgstage.com/search/search.php?search_word=%E5%88%9D%20%E6%92%AE%E3%82%8A"
        );
    }

    #[tokio::test]
    async fn full_extraction_produces_a_complete_record() {
        let profile = profile();
        let record = profile.extract(DETAIL_PAGE, PAGE_URL).await;

        assert_eq!(record.title.as_deref(), Some("初撮り。ある日の午後"));
        assert_eq!(record.original_title.as_deref(), Some("初撮り。ある日の午後"));
        assert_eq!(record.sort_title, None);
        assert_eq!(record.outline, None);
        assert_eq!(record.tagline, None);
        assert_eq!(record.id.as_deref(), Some("SIRO-123"));
        assert_eq!(record.release_date.as_deref(), Some("2015-04-25"));
        assert_eq!(record.year, Some(2015));
        assert_eq!(record.runtime_minutes, Some(90));
        assert_eq!(record.set.as_deref(), Some("シロウトTV"));
        assert_eq!(record.studio.as_deref(), Some("シロウトTVレーベル"));
        assert_eq!(record.content_rating.as_deref(), Some("XXX"));
        assert!(record.directors.is_empty());
        assert!(record.extra_fanart.is_empty());

        // 6102 ("sample video") is not a genre; 5001 has a curated override.
        assert_eq!(record.genres, vec!["Creampie", "ハメ撮り"]);

        // Trailer template combines maker code with the canonical ID parts.
        assert_eq!(
            record.trailer_url.as_deref(),
            Some("https://sample.mgstage.com/sample/shirouto/siro/123/SIRO-123_sample.mp4")
        );
    }

    #[tokio::test]
    async fn failed_existence_probe_degrades_to_no_trailer() {
        let profile = profile_with(ProfileConfig::default(), false);
        let record = profile.extract(DETAIL_PAGE, PAGE_URL).await;
        assert_eq!(record.trailer_url, None);
        // The rest of the record is unaffected.
        assert_eq!(record.id.as_deref(), Some("SIRO-123"));
    }

    #[tokio::test]
    async fn trailer_probe_is_skipped_when_disabled() {
        let config = ProfileConfig {
            scrape_trailers: false,
            ..ProfileConfig::default()
        };
        let profile = profile_with(config, true);
        let record = profile.extract(DETAIL_PAGE, PAGE_URL).await;
        assert_eq!(record.trailer_url, None);
    }

    #[tokio::test]
    async fn japanese_output_skips_overrides_and_translation() {
        let config = ProfileConfig {
            translate: false,
            ..ProfileConfig::default()
        };
        let profile = profile_with(config, true);
        let record = profile.extract(DETAIL_PAGE, PAGE_URL).await;
        // 6102 is still filtered, but 5001 keeps its Japanese label.
        assert_eq!(record.genres, vec!["中出し", "ハメ撮り"]);
    }
}
