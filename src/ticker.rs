//! Fixed-rate tick scheduling for the control thread.
//!
//! Sleeping a constant delay after each cycle lets the period drift by
//! however long the cycle took.  [`FixedRateTicker`] instead keeps an
//! absolute next-deadline and sleeps only the remainder.  If a cycle
//! overruns a whole period the schedule is re-anchored to `now` rather
//! than firing a burst of catch-up ticks.

use core::time::Duration;

use log::warn;

use crate::clock::{Instant, TimePort};

pub struct FixedRateTicker {
    period: Duration,
    next: Instant,
    overruns: u32,
}

impl FixedRateTicker {
    /// First deadline is one `period` after `start`.
    pub fn new(period: Duration, start: Instant) -> Self {
        Self {
            period,
            next: start.saturating_add(period),
            overruns: 0,
        }
    }

    /// How long to sleep before the next tick, given the time `now`.
    /// Advances the schedule.
    pub fn next_delay(&mut self, now: Instant) -> Duration {
        if now < self.next {
            let delay = self.next.saturating_duration_since(now);
            self.next = self.next.saturating_add(self.period);
            return delay;
        }

        // Late.  Run immediately; re-anchor if a whole period was lost.
        let late_by = now.saturating_duration_since(self.next);
        if late_by >= self.period {
            self.overruns = self.overruns.saturating_add(1);
            if self.overruns.is_power_of_two() {
                warn!(
                    "control loop overrun by {}ms (total {})",
                    late_by.as_millis(),
                    self.overruns
                );
            }
            self.next = now.saturating_add(self.period);
        } else {
            self.next = self.next.saturating_add(self.period);
        }
        Duration::ZERO
    }

    /// Block the calling thread until the next tick is due.
    pub fn wait(&mut self, clock: &impl TimePort) {
        let delay = self.next_delay(clock.now());
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Number of times the schedule was re-anchored.
    pub fn overruns(&self) -> u32 {
        self.overruns
    }
}
