//! Probe module for cache-first product retrieval
//!
//! This module contains:
//! - The `Fetcher` seam and its reqwest implementation
//! - The coordinator that resolves, consults the cache and cooldown, fetches,
//!   extracts, and caches

mod coordinator;
mod fetcher;

pub use coordinator::{ProbeOutcome, Prober};
pub use fetcher::{Fetcher, HttpFetcher};
