//! Authoritative server clock.
//!
//! Every deadline comparison and every `serverTime` field on the wire
//! routes through [`Clock`], so no component reads wall-clock time in a
//! way that could drift from what is broadcast to clients. Clients use
//! the broadcast value to compute a display-only offset; client-supplied
//! time is never trusted for any decision.

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{TimeZone, Utc};

/// Source of the current server time in epoch milliseconds.
///
/// The abstraction exists so time-dependent logic (deadline checks,
/// regeneration) can run against a deterministic clock in tests.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Returns the current time as epoch milliseconds.
    fn now_millis(&self) -> i64;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Creates the system clock.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Manually driven clock for deterministic tests.
///
/// Starts at zero; advance or pin it explicitly.
#[derive(Debug, Default)]
pub struct ManualClock {
    millis: AtomicI64,
}

impl ManualClock {
    /// Creates a manual clock pinned at the given instant.
    #[must_use]
    pub fn at(millis: i64) -> Self {
        Self {
            millis: AtomicI64::new(millis),
        }
    }

    /// Pins the clock to the given instant.
    pub fn set(&self, millis: i64) {
        self.millis.store(millis, Ordering::SeqCst);
    }

    /// Moves the clock forward by `delta` milliseconds.
    pub fn advance(&self, delta: i64) {
        self.millis.fetch_add(delta, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }
}

/// Renders an epoch-millisecond instant as an RFC 3339 string.
///
/// Out-of-range instants render as an empty string; the valid range
/// covers every timestamp the clock can realistically produce.
#[must_use]
pub fn millis_to_rfc3339(millis: i64) -> String {
    Utc.timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_returns_reasonable_value() {
        let clock = SystemClock::new();
        let now = clock.now_millis();
        // After 2020, before 2100.
        assert!(now > 1_577_836_800_000);
        assert!(now < 4_102_444_800_000);
    }

    #[test]
    fn system_clock_does_not_go_backwards() {
        let clock = SystemClock::new();
        let t1 = clock.now_millis();
        let t2 = clock.now_millis();
        assert!(t2 >= t1);
    }

    #[test]
    fn manual_clock_is_settable() {
        let clock = ManualClock::at(1_000);
        assert_eq!(clock.now_millis(), 1_000);
        clock.advance(500);
        assert_eq!(clock.now_millis(), 1_500);
        clock.set(10);
        assert_eq!(clock.now_millis(), 10);
    }

    #[test]
    fn rfc3339_rendering() {
        let s = millis_to_rfc3339(0);
        assert!(s.starts_with("1970-01-01T00:00:00"));
    }
}
