//! Throttling rule for session refreshes.
use std::time::Duration;

use super::clock::{duration_millis, Millis};

/// Default minimum time between two refreshes of one session.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(10);

/// Decides whether a session is stale enough to be refreshed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshPolicy {
    interval_ms: Millis,
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_REFRESH_INTERVAL)
    }
}

impl RefreshPolicy {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval_ms: duration_millis(interval),
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(0) as u64)
    }

    /// True when no baseline exists yet, or when strictly more than the
    /// interval has elapsed since `last_refresh_at`.
    ///
    /// A `now` earlier than the baseline never triggers a refresh, so the
    /// stored timestamp cannot move backwards.
    pub fn should_refresh(&self, now: Millis, last_refresh_at: Option<Millis>) -> bool {
        match last_refresh_at {
            None => true,
            Some(last) => now.saturating_sub(last) > self.interval_ms,
        }
    }
}
