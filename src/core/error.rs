use thiserror::Error;

use crate::core::validation::ValidationError;
use crate::download::fetch::FetchError;

/// Centralized error types for the application
///
/// Everything that can abort a request converges here for consistent
/// handling: validation failures (the web layer maps them to 400) and
/// fetch failures (mapped to 500). Field-level extraction problems never
/// become errors — they degrade inside the record. Uses `thiserror` for
/// automatic error conversion and display formatting.
#[derive(Error, Debug)]
pub enum AppError {
    /// URL validation errors (missing, malformed, wrong domain)
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Outbound fetch errors (transport failure or non-2xx upstream status)
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
