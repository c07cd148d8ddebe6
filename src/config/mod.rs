//! Configuration module for Kumo
//!
//! Handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use kumo::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("kumo.toml")).unwrap();
//! println!("Seeding crawl from: {}", config.crawl.seed_url);
//! ```

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{Config, CrawlConfig, StoreConfig, UserAgentConfig};
