//! Idle tracking for the pre-emptive reconnect.

use std::time::{Duration, Instant};

/// Remembers the last time the socket was used.
#[derive(Debug, Clone)]
pub struct Liveness {
    threshold: Duration,
    last_activity: Instant,
}

impl Liveness {
    pub fn new(threshold: Duration, now: Instant) -> Self {
        Self {
            threshold,
            last_activity: now,
        }
    }

    /// Whether a call issued at `now` must reconnect first.
    pub fn is_stale(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_activity) >= self.threshold
    }

    pub fn touch(&mut self, now: Instant) {
        self.last_activity = now;
    }

    pub fn idle_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_activity)
    }

    pub fn threshold(&self) -> Duration {
        self.threshold
    }
}
