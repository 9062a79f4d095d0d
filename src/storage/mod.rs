//! In-process storage: the result cache

pub mod cache;

// Re-exports for convenience
pub use cache::{CacheStats, ResultCache};
