//! Robot-check cooldown
//!
//! When the remote site answers with a robot-check page, a detection marker is
//! written to the page's cache slot. While the marker is younger than the
//! cooldown window every probe of that page is refused with the remaining wait
//! and no fetch is attempted. Once the window has elapsed the marker is removed
//! and the caller is told to retry.
//!
//! ```text
//!   Clear --robot check--> Cooling --window elapsed--> (marker removed) Clear
//! ```

mod state;

pub use state::{CooldownDecision, CooldownState};

use crate::cache::{CacheEntry, CacheFingerprint, CacheStore, ProductRecord};
use crate::config::CooldownConfig;
use chrono::{DateTime, Duration, Utc};

/// What a slot holds after a robot-check response was recorded
#[derive(Debug, Clone, PartialEq)]
pub enum ChallengeOutcome {
    /// A marker is in place; report this decision
    Cooldown(CooldownDecision),

    /// Another writer cached a product record first
    Cached(ProductRecord),
}

/// Cooldown policy over a cache store
#[derive(Debug, Clone, Copy)]
pub struct Cooldown {
    window: Duration,
}

impl Cooldown {
    /// Creates a policy with the given window
    pub fn new(window: Duration) -> Self {
        Self { window }
    }

    /// Creates a policy from configuration
    pub fn from_config(config: &CooldownConfig) -> Self {
        Self::new(Duration::seconds(config.window_secs as i64))
    }

    /// Returns the cooldown window
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Reads the cooldown state of a slot without modifying it
    pub fn state(
        &self,
        store: &CacheStore,
        fingerprint: &CacheFingerprint,
        now: DateTime<Utc>,
    ) -> CooldownState {
        match store.get(fingerprint).and_then(|entry| entry.detected_at()) {
            Some(detected_at) => CooldownState::of_marker(detected_at, self.window, now),
            None => CooldownState::Clear,
        }
    }

    /// Applies the cooldown to a slot before any fetch
    ///
    /// # Returns
    ///
    /// * `None` - No marker present, fetching may proceed
    /// * `Some(MustWait)` - A marker is present and still cooling
    /// * `Some(Expired)` - A marker was present, its window elapsed, and it has
    ///   been removed
    pub fn check(
        &self,
        store: &CacheStore,
        fingerprint: &CacheFingerprint,
        now: DateTime<Utc>,
    ) -> Option<CooldownDecision> {
        match self.state(store, fingerprint, now) {
            CooldownState::Clear => None,
            state => Some(self.settle(store, fingerprint, state)),
        }
    }

    /// Records a robot-check response for a slot and decides what to report
    ///
    /// The first observation starts the clock; an existing marker keeps its
    /// original detection time. A product record cached by another writer in
    /// the meantime is handed back instead of a wait.
    pub fn record_challenge(
        &self,
        store: &CacheStore,
        fingerprint: &CacheFingerprint,
        now: DateTime<Utc>,
    ) -> ChallengeOutcome {
        match store.put(fingerprint, &CacheEntry::marker(now)) {
            Ok(true) => tracing::warn!("Detected as robot, cooling down {}", fingerprint),
            Ok(false) => tracing::debug!("Slot {} already holds an entry", fingerprint),
            Err(e) => tracing::warn!("Failed to write robot-check marker for {}: {}", fingerprint, e),
        }

        let detected_at = match store.get(fingerprint) {
            Some(CacheEntry::DetectionMarker { detected_at }) => detected_at,
            Some(CacheEntry::Product(record)) => {
                tracing::info!("{} was cached meanwhile, ignoring the robot check", fingerprint);
                return ChallengeOutcome::Cached(record);
            }
            // Unstorable marker: still wait out a full window from now
            None => now,
        };

        let state = CooldownState::of_marker(detected_at, self.window, now);
        ChallengeOutcome::Cooldown(self.settle(store, fingerprint, state))
    }

    /// Turns a marker state into a decision, removing elapsed markers
    fn settle(
        &self,
        store: &CacheStore,
        fingerprint: &CacheFingerprint,
        state: CooldownState,
    ) -> CooldownDecision {
        match state {
            CooldownState::Cooling { remaining_secs } => CooldownDecision::MustWait {
                seconds: remaining_secs,
            },
            CooldownState::Elapsed | CooldownState::Clear => {
                if let Err(e) = store.delete(fingerprint) {
                    tracing::warn!("Failed to remove expired marker {}: {}", fingerprint, e);
                }
                tracing::info!("Cooldown expired for {}", fingerprint);
                CooldownDecision::Expired
            }
        }
    }
}

impl Default for Cooldown {
    fn default() -> Self {
        Self::from_config(&CooldownConfig::default())
    }
}
