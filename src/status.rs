//! Read-only status projection served on `GET /status`.

use serde::Serialize;

use crate::clock::Instant;
use crate::state::ControllerState;

/// Wire shape of the status document.  Field order and names are fixed;
/// the landing page parses them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Status {
    /// The valve is open (arbiter output).
    pub active: bool,
    pub safety: bool,
    pub thermo_mv: i32,
    pub wall_switch: bool,
    pub valve_state: u8,
    pub led_state: u8,
    pub bypass_state: u8,
    pub timer_left: u64,
}

impl Status {
    /// Project `state` at time `now`.  Borrows immutably; calling it any
    /// number of times changes nothing.
    pub fn snapshot(state: &ControllerState, now: Instant) -> Self {
        Self {
            active: state.valve_energized,
            safety: state.is_safe,
            thermo_mv: state.safety_mv,
            wall_switch: state.wall_switch_active,
            valve_state: u8::from(state.outputs.valve),
            led_state: u8::from(state.outputs.indicator),
            bypass_state: u8::from(state.bypass_active),
            timer_left: state.timer.remaining_secs(now),
        }
    }

    /// Render as a compact JSON object.
    pub fn to_json(&self) -> String {
        // A struct of plain scalars cannot fail to serialise.
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }
}
