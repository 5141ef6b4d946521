//! Cache module for persisting probe results
//!
//! This module handles:
//! - Fingerprinting canonical URLs into cache keys
//! - The cached payload types (robot-check markers and product records)
//! - The write-once, file-backed store

mod entry;
mod fingerprint;
mod store;

pub use entry::{CacheEntry, ProductRecord, Stars, NOT_RATED};
pub use fingerprint::CacheFingerprint;
pub use store::{CacheStore, StorageError, StorageResult};
