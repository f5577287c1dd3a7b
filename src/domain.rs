//! Domain module - core metadata types and pure algorithms
//!
//! Everything in here is synchronous and side-effect free: the metadata
//! record assembled from a product page, the search result stub produced by
//! the crawler, and the catalog identifier normalization algorithm.

pub mod identifier;
pub mod metadata;

// Re-export commonly used items
pub use identifier::{normalize_id, search_token};
pub use metadata::{Actor, ArtworkRef, CatalogRecord, Rating, SearchHit};
