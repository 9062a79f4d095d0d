//! Logging initialization
//!
//! Sets up a `tracing` subscriber for console output. Log verbosity is
//! controlled through `RUST_LOG`; without it the service logs at `info`
//! for its own crate and for tower-http request traces.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// # Errors
/// Returns an error if a global subscriber has already been installed.
pub fn init_logger() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("fbgrab=info,tower_http=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}
