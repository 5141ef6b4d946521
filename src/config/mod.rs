//! Configuration module for asin-probe
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional, so an empty file (or no file at all) yields the
//! defaults.
//!
//! # Example
//!
//! ```no_run
//! use asin_probe::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("probe.toml")).unwrap();
//! println!("Caching under: {}", config.cache.directory);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CacheConfig, Config, CooldownConfig, FetcherConfig, DEFAULT_CACHE_DIR, DEFAULT_COOLDOWN_SECS,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
