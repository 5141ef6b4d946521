//! asin-probe: a cache-first product page probe
//!
//! This crate resolves a product identifier or URL to a canonical product page,
//! fetches it at most once, extracts a structured product record and keeps a
//! local cache that also remembers robot-check challenges so the remote site is
//! not hammered while it is suspicious of us.

pub mod cache;
pub mod config;
pub mod cooldown;
pub mod extract;
pub mod output;
pub mod probe;
pub mod target;

use thiserror::Error;

/// Main error type for asin-probe operations
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] TargetError),

    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ProbeError {
    /// Returns true if the error was caused by the caller's input rather than
    /// by the environment
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

/// Errors produced while resolving a raw input into a canonical target
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
    #[error("no asin")]
    NoAsin,

    #[error("unknown market: {0}")]
    UnknownMarket(String),
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
}

/// Result type alias for asin-probe operations
pub type Result<T> = std::result::Result<T, ProbeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for target resolution
pub type TargetResult<T> = std::result::Result<T, TargetError>;

// Re-export commonly used types
pub use cache::{CacheEntry, CacheFingerprint, CacheStore, ProductRecord, Stars};
pub use config::Config;
pub use cooldown::{ChallengeOutcome, Cooldown, CooldownDecision};
pub use probe::{Fetcher, HttpFetcher, ProbeOutcome, Prober};
pub use target::{resolve_target, CanonicalTarget, Market};
