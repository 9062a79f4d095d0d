//! HTTP surface and response rendering

pub mod render;
pub mod server;

// Re-exports for convenience
pub use render::{render, OutputFormat};
pub use server::{router, serve, AppState};
