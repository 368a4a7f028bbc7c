//! Shared library for the meownime scraper workspace.
//!
//! This crate provides common functionality used across all binary crates:
//! - Configuration management
//! - Scraped record models
//! - Export path utilities
//! - Logging infrastructure

pub mod config;
pub mod logging;
pub mod models;
pub mod paths;

// Re-export commonly used types
pub use config::Config;
pub use logging::LogConfig;
pub use models::*;
pub use paths::ExportPaths;

/// Common result type using anyhow::Error
pub type Result<T> = anyhow::Result<T>;
