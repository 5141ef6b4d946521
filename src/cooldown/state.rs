use chrono::{DateTime, Duration, Utc};
use std::fmt;

/// Where a cache slot stands with respect to robot-check back-off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownState {
    /// No marker; fetching is allowed
    Clear,

    /// A marker is present and the window is still open
    Cooling { remaining_secs: u64 },

    /// A marker is present but the window has elapsed; it is due for removal
    Elapsed,
}

impl CooldownState {
    /// Computes the state of a marker detected at `detected_at`
    ///
    /// A detection time in the future counts as just detected.
    pub fn of_marker(detected_at: DateTime<Utc>, window: Duration, now: DateTime<Utc>) -> Self {
        let elapsed = (now - detected_at).max(Duration::zero());
        let remaining = window.num_seconds() - elapsed.num_seconds();

        if remaining > 0 {
            Self::Cooling {
                remaining_secs: remaining as u64,
            }
        } else {
            Self::Elapsed
        }
    }

    /// Returns true if a fetch may be attempted
    pub fn is_clear(&self) -> bool {
        matches!(self, Self::Clear)
    }
}

/// Outcome reported when a marker governs the current probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownDecision {
    /// Do not retry before this many seconds have passed
    MustWait { seconds: u64 },

    /// The window has passed and the marker was removed; retry now
    Expired,
}

impl fmt::Display for CooldownDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MustWait { seconds } => write!(f, "must wait {} seconds", seconds),
            Self::Expired => f.write_str("cooldown expired"),
        }
    }
}
