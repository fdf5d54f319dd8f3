//! Clock seam: wall-clock time as a swappable provider.
//!
//! Timestamps throughout the backend are unix milliseconds, and every
//! expiry decision (session TTL, verification-token expiry) compares
//! against a [`Clock`] rather than calling the system clock directly.
//! Tests substitute [`ManualClock`] and move time by hand — forward or
//! backward — instead of sleeping.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// A source of "now" in unix milliseconds.
pub trait Clock: Clone + Send + Sync + 'static {
    fn now_millis(&self) -> u64;
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// A hand-driven clock for deterministic tests.
///
/// Clones share the same instant, so the clock handed to a backend and
/// the copy kept by the test observe the same timeline.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    /// Starts the clock at the given unix-millis instant.
    pub fn new(start_millis: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start_millis)),
        }
    }

    /// Moves time forward.
    pub fn advance(&self, millis: u64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }

    /// Jumps to an absolute instant — earlier instants are allowed, so
    /// tests can model a clock that moved backward.
    pub fn set(&self, millis: u64) {
        self.now.store(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances_and_rewinds() {
        let clock = ManualClock::new(1_000);
        assert_eq!(clock.now_millis(), 1_000);

        clock.advance(500);
        assert_eq!(clock.now_millis(), 1_500);

        clock.set(200);
        assert_eq!(clock.now_millis(), 200);
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::new(0);
        let copy = clock.clone();
        clock.advance(42);
        assert_eq!(copy.now_millis(), 42);
    }

    #[test]
    fn test_system_clock_is_monotonic_enough() {
        let clock = SystemClock;
        let a = clock.now_millis();
        let b = clock.now_millis();
        assert!(b >= a);
        // Sanity: after 2020-01-01 in millis.
        assert!(a > 1_577_836_800_000);
    }
}
