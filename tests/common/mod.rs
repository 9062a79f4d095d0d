//! Shared fixtures and mock collaborators for integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use fbgrab::download::{FetchError, LinkShortener, PageFetcher};
use url::Url;

/// A page body carrying every extractable field, in the inline-state
/// shape the real pages use (JSON-escaped URLs included).
pub fn full_page_body() -> &'static str {
    r#"<!DOCTYPE html><html><head>
<title>Cats doing backflips</title>
<meta property="og:image" content="https://scontent.cdn/thumb.jpg" />
</head><body>
<script>{"ownerName":"Cat Channel","publish_time":1700000000,"length_in_second":95,
"like_count":120,"comment_count":45,"share_count":17,
"browser_native_sd_url":"https:\/\/video.cdn\/sd.mp4?filesize=2097152",
"browser_native_hd_url":"https:\/\/video.cdn\/hd.mp4?sz=400000"}</script>
</body></html>"#
}

/// A page with descriptive metadata but no media link patterns at all.
pub fn linkless_page_body() -> &'static str {
    r#"<title>Removed Video</title><script>{"ownerName":"Someone"}</script>"#
}

/// Fetcher double: serves a canned body (or a canned upstream failure)
/// and counts how many times it was called.
pub struct MockFetcher {
    response: Option<String>,
    calls: AtomicUsize,
}

impl MockFetcher {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            response: Some(body.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            response: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, _url: &Url) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            Some(body) => Ok(body.clone()),
            None => Err(FetchError::Status(reqwest::StatusCode::BAD_GATEWAY)),
        }
    }
}

/// Shortener double that visibly rewrites every URL, for asserting the
/// pipeline routes links through the shortening step.
pub struct PrefixShortener;

#[async_trait]
impl LinkShortener for PrefixShortener {
    async fn shorten(&self, long_url: &str) -> String {
        format!("https://sho.rt/?u={}", long_url)
    }
}
