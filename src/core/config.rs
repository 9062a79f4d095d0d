use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

/// Configuration constants for the service

/// Listening port for the HTTP server
/// Read from FBGRAB_PORT environment variable, defaults to 8080
/// A `--port` CLI flag overrides this value
pub static PORT: Lazy<u16> = Lazy::new(|| {
    env::var("FBGRAB_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8080)
});

/// Timeout for outbound page fetches (in seconds)
/// Read from FBGRAB_FETCH_TIMEOUT_SECS, defaults to 30
pub static FETCH_TIMEOUT: Lazy<Duration> = Lazy::new(|| {
    let secs = env::var("FBGRAB_FETCH_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(30);
    Duration::from_secs(secs)
});

/// Whether to rewrite media links through the TinyURL shortener
/// Read from FBGRAB_SHORTEN_LINKS ("1" or "true" to enable), defaults to off
/// Shortening is best-effort: a failed shorten call never blocks a request
pub static SHORTEN_LINKS: Lazy<bool> = Lazy::new(|| {
    env::var("FBGRAB_SHORTEN_LINKS")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
});

/// Cache TTL configuration
///
/// HD media URLs from Facebook embed short-lived signed parameters, so
/// entries carrying an HD link expire sooner than SD-only or generic ones.
pub mod cache_ttl {
    use super::{env, Duration, Lazy};

    /// TTL for cache entries that contain a high-quality link (in seconds)
    pub const HD_TTL_SECONDS: u64 = 5 * 60;

    /// TTL for all other cache entries (in seconds)
    pub const DEFAULT_TTL_SECONDS: u64 = 10 * 60;

    /// TTL for entries with an HD link, overridable via FBGRAB_HD_TTL_SECS
    pub static HD_TTL: Lazy<Duration> = Lazy::new(|| {
        let secs = env::var("FBGRAB_HD_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(HD_TTL_SECONDS);
        Duration::from_secs(secs)
    });

    /// TTL for everything else, overridable via FBGRAB_TTL_SECS
    pub static DEFAULT_TTL: Lazy<Duration> = Lazy::new(|| {
        let secs = env::var("FBGRAB_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TTL_SECONDS);
        Duration::from_secs(secs)
    });
}
