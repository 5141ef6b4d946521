use sha2::{Digest, Sha256};
use std::fmt;

/// Cache key derived from a canonical URL
///
/// Hex-encoded SHA-256 of the URL string, so it doubles as a safe file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheFingerprint(String);

impl CacheFingerprint {
    /// Fingerprints a URL
    ///
    /// # Examples
    ///
    /// ```
    /// use asin_probe::cache::CacheFingerprint;
    ///
    /// let a = CacheFingerprint::of("https://www.amazon.com/product/dp/B00ZLJ1QGC");
    /// let b = CacheFingerprint::of("https://www.amazon.com/product/dp/B00ZLJ1QGC");
    /// assert_eq!(a, b);
    /// assert_eq!(a.as_str().len(), 64);
    /// ```
    pub fn of(url: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
