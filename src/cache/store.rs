//! File-backed cache store
//!
//! One JSON file per fingerprint under a root directory. Writes are
//! create-only: a readable entry is never replaced, so the first writer of a
//! slot wins and a later writer is a no-op. A file that does not parse is
//! treated as a free slot.

use crate::cache::{CacheEntry, CacheFingerprint};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while writing to the cache
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Write-once key-value store rooted at a directory
#[derive(Debug, Clone)]
pub struct CacheStore {
    root: PathBuf,
}

impl CacheStore {
    /// Creates a store rooted at `root`
    ///
    /// The directory is not touched until the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the cache root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the file backing a fingerprint
    pub fn path_for(&self, fingerprint: &CacheFingerprint) -> PathBuf {
        self.root.join(fingerprint.as_str())
    }

    /// Reads the entry for a fingerprint
    ///
    /// A missing, unreadable, or corrupt file reads as absent.
    pub fn get(&self, fingerprint: &CacheFingerprint) -> Option<CacheEntry> {
        let path = self.path_for(fingerprint);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("Unreadable cache entry {}: {}", path.display(), e);
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Corrupt cache entry {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Returns true if a file exists for the fingerprint
    pub fn contains(&self, fingerprint: &CacheFingerprint) -> bool {
        self.path_for(fingerprint).exists()
    }

    /// Writes an entry unless one already exists
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The entry was written
    /// * `Ok(false)` - A readable entry was already present and was left untouched
    /// * `Err(StorageError)` - The entry could not be serialized or written
    pub fn put(&self, fingerprint: &CacheFingerprint, entry: &CacheEntry) -> StorageResult<bool> {
        let bytes = serde_json::to_vec_pretty(entry)?;
        self.ensure_root()?;

        let path = self.path_for(fingerprint);
        let mut file = match create_new(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                if self.get(fingerprint).is_some() {
                    tracing::debug!("Cache entry {} already present, keeping it", fingerprint);
                    return Ok(false);
                }

                // An unreadable file counts as absent, so it must not hold the slot
                tracing::warn!("Replacing unreadable cache entry {}", fingerprint);
                self.delete(fingerprint)?;
                match create_new(&path) {
                    Ok(file) => file,
                    Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
                    Err(e) => return Err(e.into()),
                }
            }
            Err(e) => return Err(e.into()),
        };

        if let Err(e) = file.write_all(&bytes).and_then(|_| file.sync_all()) {
            // A truncated file would read as corrupt and block later writes
            let _ = fs::remove_file(&path);
            return Err(e.into());
        }

        Ok(true)
    }

    /// Removes the entry for a fingerprint; absent entries are fine
    pub fn delete(&self, fingerprint: &CacheFingerprint) -> StorageResult<()> {
        match fs::remove_file(self.path_for(fingerprint)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn ensure_root(&self) -> io::Result<()> {
        if !self.root.is_dir() {
            tracing::debug!("Creating cache directory {}", self.root.display());
            fs::create_dir_all(&self.root)?;
        }
        Ok(())
    }
}

fn create_new(path: &Path) -> io::Result<fs::File> {
    OpenOptions::new().write(true).create_new(true).open(path)
}
