//! Monotonic time base for the controller core.
//!
//! The core never reads a clock on its own.  Every operation that cares
//! about time (timer arming, expiry, remaining-seconds) takes an
//! [`Instant`] argument supplied by a [`TimePort`], so host tests can
//! drive a simulated clock one millisecond at a time.

use core::time::Duration;

/// Milliseconds since boot.  Monotonic; never wraps in practice (u64 ms
/// covers ~584 million years).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Instant(u64);

impl Instant {
    /// Boot time.
    pub const ZERO: Self = Self(0);

    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    pub const fn from_secs(secs: u64) -> Self {
        Self(secs.saturating_mul(1000))
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// `self + d`, clamped at the end of representable time.
    pub fn saturating_add(self, d: Duration) -> Self {
        let ms = u64::try_from(d.as_millis()).unwrap_or(u64::MAX);
        Self(self.0.saturating_add(ms))
    }

    /// Time elapsed from `earlier` to `self`, or zero if `earlier` is later.
    pub fn saturating_duration_since(self, earlier: Self) -> Duration {
        Duration::from_millis(self.0.saturating_sub(earlier.0))
    }
}

/// Source of the current monotonic time.
pub trait TimePort {
    fn now(&self) -> Instant;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturating_duration_since_never_goes_negative() {
        let a = Instant::from_millis(1_000);
        let b = Instant::from_millis(4_500);
        assert_eq!(b.saturating_duration_since(a), Duration::from_millis(3_500));
        assert_eq!(a.saturating_duration_since(b), Duration::ZERO);
    }

    #[test]
    fn saturating_add_clamps() {
        let t = Instant::from_millis(u64::MAX - 1);
        assert_eq!(t.saturating_add(Duration::from_secs(10)).as_millis(), u64::MAX);
    }

    #[test]
    fn from_secs_scales() {
        assert_eq!(Instant::from_secs(600).as_millis(), 600_000);
    }
}
