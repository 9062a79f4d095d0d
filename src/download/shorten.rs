//! Best-effort link shortening
//!
//! A cosmetic step over the final media URLs. The contract is strict:
//! `shorten` never fails — any transport error, non-2xx response, or
//! garbage body falls back to the original URL unchanged, so pipeline
//! correctness never depends on the shortening service being up.

use async_trait::async_trait;

const TINYURL_ENDPOINT: &str = "https://tinyurl.com/api-create.php";

#[async_trait]
pub trait LinkShortener: Send + Sync {
    /// Rewrite `long_url` through the shortening service; on any failure
    /// the original URL is returned unchanged.
    async fn shorten(&self, long_url: &str) -> String;
}

/// Shortener backed by the TinyURL create endpoint.
pub struct TinyUrlShortener {
    client: reqwest::Client,
    endpoint: String,
}

impl TinyUrlShortener {
    pub fn new() -> Self {
        Self::with_endpoint(TINYURL_ENDPOINT)
    }

    /// Point at a different create endpoint (used by tests).
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    async fn try_shorten(&self, long_url: &str) -> Option<String> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("url", long_url)])
            .send()
            .await
            .ok()?;

        if !response.status().is_success() {
            return None;
        }

        let body = response.text().await.ok()?;
        let short = body.trim();
        // The create endpoint answers with a bare URL; anything else is an
        // error page and gets discarded.
        if short.starts_with("http://") || short.starts_with("https://") {
            Some(short.to_string())
        } else {
            None
        }
    }
}

impl Default for TinyUrlShortener {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkShortener for TinyUrlShortener {
    async fn shorten(&self, long_url: &str) -> String {
        match self.try_shorten(long_url).await {
            Some(short) => short,
            None => {
                tracing::warn!("Link shortening failed, keeping original URL");
                long_url.to_string()
            }
        }
    }
}

/// Pass-through shortener used when shortening is disabled.
pub struct NoopShortener;

#[async_trait]
impl LinkShortener for NoopShortener {
    async fn shorten(&self, long_url: &str) -> String {
        long_url.to_string()
    }
}
