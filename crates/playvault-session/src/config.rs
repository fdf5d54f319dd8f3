//! Session configuration.

use std::time::Duration;

/// Configuration for session behavior.
///
/// One copy is shared by every session actor the directory spawns.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How long a session survives without activity. Every successful
    /// resolve restarts this window (sliding expiration).
    ///
    /// Default: 30 days.
    pub ttl: Duration,
}

impl SessionConfig {
    pub(crate) fn ttl_millis(&self) -> u64 {
        self.ttl.as_millis() as u64
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(30 * 24 * 60 * 60),
        }
    }
}
