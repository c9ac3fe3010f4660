//! Auto-off timer.
//!
//! Two states:
//!
//! ```text
//!            arm(now, N > 0)
//!   Idle ───────────────────▶ Armed { deadline = now + N min }
//!    ▲                          │
//!    │  cancel() | now > deadline (poll_expired)
//!    └──────────────────────────┘
//! ```
//!
//! The deadline is absolute.  It is set, cleared or overwritten, never
//! counted down, so a late or skipped tick cannot extend the burn time.

use core::time::Duration;

use crate::clock::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerState {
    #[default]
    Idle,
    Armed { deadline: Instant },
}

impl TimerState {
    /// Arm (or re-arm) for `minutes` from `now`.  Returns the new deadline.
    pub fn arm(&mut self, now: Instant, minutes: u32) -> Instant {
        let deadline = now.saturating_add(Duration::from_secs(u64::from(minutes) * 60));
        *self = Self::Armed { deadline };
        deadline
    }

    /// Back to `Idle`.  Returns `true` if a timer was pending.
    pub fn cancel(&mut self) -> bool {
        let was_armed = self.is_armed();
        *self = Self::Idle;
        was_armed
    }

    /// Fire the timer if `now` is strictly past the deadline.
    ///
    /// Returns `true` exactly once per arming; the state is `Idle`
    /// afterwards.
    pub fn poll_expired(&mut self, now: Instant) -> bool {
        match *self {
            Self::Armed { deadline } if now > deadline => {
                *self = Self::Idle;
                true
            }
            _ => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        matches!(self, Self::Armed { .. })
    }

    pub fn deadline(&self) -> Option<Instant> {
        match *self {
            Self::Armed { deadline } => Some(deadline),
            Self::Idle => None,
        }
    }

    /// Whole seconds left, floored.  Zero when idle or overdue.
    pub fn remaining_secs(&self, now: Instant) -> u64 {
        self.deadline()
            .map_or(0, |d| d.saturating_duration_since(now).as_secs())
    }
}
