//! Page fetching, link shortening, and the request pipeline

pub mod fetch;
pub mod pipeline;
pub mod shorten;

// Re-exports for convenience
pub use fetch::{FetchError, HttpFetcher, PageFetcher};
pub use pipeline::Pipeline;
pub use shorten::{LinkShortener, NoopShortener, TinyUrlShortener};
