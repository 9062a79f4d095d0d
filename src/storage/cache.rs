//! Result cache with per-entry TTL
//!
//! Key is the validated source URL (exact string match, no further
//! canonicalization). Entries carrying an HD link get a shorter TTL than
//! the rest: Facebook's HD media URLs embed signed parameters that expire
//! sooner upstream. Expiry is checked lazily on read, with a `cleanup`
//! sweep for proactive eviction. Nothing survives a process restart.

use std::collections::HashMap;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

use crate::core::config::cache_ttl;
use crate::extract::ExtractionResult;

/// A stored record with its expiry deadline. Owned exclusively by the
/// cache; lookups hand out clones.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: ExtractionResult,
    expires_at: Instant,
}

/// Process-wide cache of extraction results, keyed by source URL.
///
/// Explicitly constructed and injected into the pipeline (never a
/// global), so tests get a fresh cache per case. Safe for concurrent
/// reads and writes from independently scheduled requests; entries are
/// independent by key, no cross-entry semantics.
pub struct ResultCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    hd_ttl: Duration,
    default_ttl: Duration,
    hit_count: Mutex<u64>,
    miss_count: Mutex<u64>,
}

impl ResultCache {
    /// Create a cache with explicit TTLs for HD-bearing and other entries.
    pub fn new(hd_ttl: Duration, default_ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            hd_ttl,
            default_ttl,
            hit_count: Mutex::new(0),
            miss_count: Mutex::new(0),
        }
    }

    /// Create a cache using the environment-driven TTL configuration.
    pub fn from_config() -> Self {
        Self::new(*cache_ttl::HD_TTL, *cache_ttl::DEFAULT_TTL)
    }

    /// Look up a record; expired entries are removed and count as a miss.
    pub async fn get(&self, key: &str) -> Option<ExtractionResult> {
        let mut entries = self.entries.lock().await;

        if let Some(entry) = entries.get(key) {
            if Instant::now() < entry.expires_at {
                *self.hit_count.lock().await += 1;
                return Some(entry.value.clone());
            }
            entries.remove(key);
        }

        *self.miss_count.lock().await += 1;
        None
    }

    /// Store a record. TTL depends on content: entries with an HD link
    /// expire after the shorter `hd_ttl`.
    pub async fn put(&self, key: &str, value: ExtractionResult) {
        let ttl = if value.has_hd_link() {
            self.hd_ttl
        } else {
            self.default_ttl
        };

        let mut entries = self.entries.lock().await;
        entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    /// Proactively evict expired entries, returning how many were removed.
    pub async fn cleanup(&self) -> usize {
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        let now = Instant::now();
        entries.retain(|_, entry| now < entry.expires_at);
        let removed = before - entries.len();
        if removed > 0 {
            tracing::debug!("Cleaned up {} expired cache entries", removed);
        }
        removed
    }

    /// Current cache statistics.
    pub async fn stats(&self) -> CacheStats {
        let entries = self.entries.lock().await;
        let hits = *self.hit_count.lock().await;
        let misses = *self.miss_count.lock().await;
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        CacheStats {
            size: entries.len(),
            hits,
            misses,
            hit_rate,
        }
    }

    /// Drop every entry and reset the counters.
    pub async fn clear(&self) {
        let mut entries = self.entries.lock().await;
        entries.clear();
        *self.hit_count.lock().await = 0;
        *self.miss_count.lock().await = 0;
    }
}

/// Cache statistics snapshot
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub size: usize,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
}
