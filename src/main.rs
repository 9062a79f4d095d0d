use anyhow::Result;
use dotenvy::dotenv;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;

use fbgrab::cli::Cli;
use fbgrab::core::{config, init_logger};
use fbgrab::download::{HttpFetcher, LinkShortener, NoopShortener, Pipeline, TinyUrlShortener};
use fbgrab::storage::ResultCache;
use fbgrab::web::{serve, AppState};

/// How often the background sweep evicts expired cache entries
const CACHE_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env if present
    let _ = dotenv();

    init_logger()?;

    let cli = Cli::parse_args();
    let port = cli.port.unwrap_or(*config::PORT);

    let fetcher = Arc::new(HttpFetcher::new(*config::FETCH_TIMEOUT)?);

    let shortener: Arc<dyn LinkShortener> = if *config::SHORTEN_LINKS {
        tracing::info!("Link shortening enabled (TinyURL)");
        Arc::new(TinyUrlShortener::new())
    } else {
        Arc::new(NoopShortener)
    };

    // The cache lives for the whole process; created here, never reset
    let cache = Arc::new(ResultCache::from_config());

    // Background sweep so long-idle entries don't pile up between reads
    let sweep_cache = cache.clone();
    tokio::spawn(async move {
        let mut ticker = interval(CACHE_SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            sweep_cache.cleanup().await;
        }
    });

    let pipeline = Arc::new(Pipeline::new(fetcher, shortener, cache));

    serve(port, AppState { pipeline }).await
}
