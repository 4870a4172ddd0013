//! Quotewise Core Library
//!
//! Shared plumbing for the quotewise crates:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Configuration management

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::{AppConfig, ChunkingSettings, ComparisonSettings};
pub use error::{AppError, AppResult};
