//! Kumo: a wiki-style breadth-first crawler with a persistent inverted index
//!
//! This crate walks a hyperlink graph breadth-first, counts the terms on each
//! page, and records a term→URL inverted index plus per-URL term counts in a
//! key-value store, using atomic write batches for consistency.

pub mod config;
pub mod counter;
pub mod crawler;
pub mod index;
pub mod store;

use thiserror::Error;

/// Main error type for Kumo operations
#[derive(Debug, Error)]
pub enum KumoError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] crawler::FetchError),

    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Kumo operations
pub type Result<T> = std::result::Result<T, KumoError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use counter::TermCounter;
pub use crawler::{CrawlOutcome, Crawler, FetchedPage, HttpFetcher, PageFetcher, SiteScope};
pub use index::{Index, MemoryIndex, PersistentIndex};
pub use store::{MemoryStore, SqliteStore, Store, StoreError};
