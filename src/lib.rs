//! fbgrab - HTTP API for pulling downloadable media links out of Facebook pages
//!
//! This library provides the full extraction pipeline behind the service:
//! URL validation, page fetching, field extraction, normalization,
//! result caching, and response rendering.
//!
//! # Module Structure
//!
//! - `core`: Configuration, errors, logging, and URL validation
//! - `extract`: Field extraction rules and normalization
//! - `download`: Page fetcher, link shortener, and the request pipeline
//! - `storage`: In-process result cache
//! - `web`: HTTP surface and response rendering

pub mod cli;
pub mod core;
pub mod download;
pub mod extract;
pub mod storage;
pub mod web;

// Re-export commonly used types for convenience
pub use crate::core::{config, AppError, AppResult};
pub use crate::download::{HttpFetcher, LinkShortener, PageFetcher, Pipeline, TinyUrlShortener};
pub use crate::extract::{ExtractionResult, QualityLink, Resolution};
pub use crate::storage::ResultCache;
