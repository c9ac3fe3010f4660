//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port, on edges only.  A steady
//! 100 Hz loop with nothing changing emits nothing.

use crate::arbiter::DecisionReason;
use crate::clock::Instant;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The service has started; carries the configured safety band.
    Started { min_mv: i32, max_mv: i32 },

    /// The thermocouple reading entered (`safe = true`) or left the band.
    SafetyChanged { safe: bool, mv: i32 },

    /// The master bypass input changed level.
    BypassChanged(bool),

    /// The wall switch changed level.
    WallSwitchChanged(bool),

    /// The valve output changed.
    ValveChanged { energized: bool, reason: DecisionReason },

    /// Operator intent changed through a command.
    DesiredChanged(bool),

    /// A timer was armed or re-armed.
    TimerArmed { minutes: u32, deadline: Instant },

    /// A pending timer was cancelled by a command.
    TimerCancelled,

    /// The timer deadline passed; intent forced off.
    TimerExpired,
}
