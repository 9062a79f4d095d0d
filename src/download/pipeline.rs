//! The extraction pipeline
//!
//! One place wires the whole flow together: validate → cache lookup →
//! fetch → extract → normalize → shorten → cache store. Collaborators are
//! injected as trait objects so tests can swap in mocks, and the cache is
//! an explicit instance passed in at construction — created once at
//! process start, never ambient global state.

use std::sync::Arc;

use crate::core::error::AppResult;
use crate::core::validation::validate_source_url;
use crate::download::fetch::PageFetcher;
use crate::download::shorten::LinkShortener;
use crate::extract::{self, ExtractionResult};
use crate::storage::cache::ResultCache;

pub struct Pipeline {
    fetcher: Arc<dyn PageFetcher>,
    shortener: Arc<dyn LinkShortener>,
    cache: Arc<ResultCache>,
}

impl Pipeline {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        shortener: Arc<dyn LinkShortener>,
        cache: Arc<ResultCache>,
    ) -> Self {
        Self {
            fetcher,
            shortener,
            cache,
        }
    }

    /// Run the full pipeline for one source URL.
    ///
    /// Validation failures and fetch failures come back as errors for the
    /// HTTP layer to map to 400/500; everything extraction-related
    /// degrades inside the record instead. Only successful records (at
    /// least one media link) are cached, so a transient upstream hiccup
    /// is never memoized.
    ///
    /// Concurrent requests for the same uncached URL each fetch
    /// independently; there is no single-flight deduplication.
    pub async fn run(&self, raw_url: &str) -> AppResult<ExtractionResult> {
        let url = validate_source_url(raw_url)?;
        let key = url.as_str();

        if let Some(cached) = self.cache.get(key).await {
            tracing::debug!("Cache hit for {}", key);
            return Ok(cached);
        }

        let body = self.fetcher.fetch(&url).await?;
        let mut record = extract::extract_record(&url, &body);

        for link in &mut record.links {
            link.url = self.shortener.shorten(&link.url).await;
        }

        if record.success {
            self.cache.put(key, record.clone()).await;
        } else {
            tracing::info!(
                "Extraction found no media links for {}: {:?}",
                key,
                record.message
            );
        }

        Ok(record)
    }
}
