//! Controller state blackboard.
//!
//! [`ControllerState`] is the single piece of mutable shared data.  The
//! per-tick pipeline (safety → timer → arbiter → actuators) and the
//! command path both read and write it, always under the lock held by
//! [`SharedController`](crate::app::shared::SharedController).

use crate::clock::Instant;
use crate::timer::TimerState;

// ───────────────────────────────────────────────────────────────
// Input snapshot (written by InputPort once per tick)
// ───────────────────────────────────────────────────────────────

/// Raw inputs sampled at the start of a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    /// Thermocouple reading in millivolts.
    pub safety_mv: i32,
    /// Wall switch level (HIGH = true).
    pub wall_switch: bool,
    /// Master bypass level (HIGH = true).
    pub bypass: bool,
}

// ───────────────────────────────────────────────────────────────
// Output levels (read back from ActuatorPort after each write)
// ───────────────────────────────────────────────────────────────

/// Physical output levels as last observed on the pins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputLevels {
    pub valve: bool,
    pub indicator: bool,
}

// ───────────────────────────────────────────────────────────────
// ControllerState
// ───────────────────────────────────────────────────────────────

/// Everything the controller knows.  Created once with every flag false
/// and every number zero; lives for the whole process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerState {
    /// Operator intent from remote commands or the timer.
    pub desired_on: bool,
    /// Auto-off timer.
    pub timer: TimerState,
    /// Last sampled thermocouple reading (mV).
    pub safety_mv: i32,
    /// Derived from `safety_mv`; never assigned by commands.
    pub is_safe: bool,
    pub wall_switch_active: bool,
    pub bypass_active: bool,
    /// Arbiter output for the current tick.
    pub valve_energized: bool,
    pub outputs: OutputLevels,
}

impl ControllerState {
    /// Absolute auto-off deadline, if the timer is armed.
    pub fn timer_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }
}
