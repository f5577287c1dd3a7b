//! Infrastructure layer for HTTP transport, configuration, logging, and the
//! translation collaborator
//!
//! Everything here is an external-facing collaborator of the extraction
//! core: the core only ever talks to these through their traits or config
//! values.

pub mod config;
pub mod http_client;
pub mod logging;
pub mod translation;

// Re-export commonly used items
pub use config::{AppConfig, ConfigManager, Language, ProfileConfig, mgstage};
pub use http_client::{DocumentFetcher, HttpClient, HttpClientConfig};
pub use logging::init_logging;
pub use translation::{GoogleTranslator, NoopTranslator, Translator};
