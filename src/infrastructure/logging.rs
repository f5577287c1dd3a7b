//! Logging initialization
//!
//! Console tracing with env-filter control (`RUST_LOG=mgscrape=debug` etc).

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber for console output.
///
/// Defaults to `info` when `RUST_LOG` is unset. Returns an error if a
/// subscriber was already installed.
pub fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {e}"))?;

    Ok(())
}
