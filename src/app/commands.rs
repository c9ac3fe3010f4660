//! Inbound commands to the application service.
//!
//! A [`ControlRequest`] is what arrives on `GET /control?state=..&timer=..`.
//! [`ControlRequest::apply`] is the one transition function for remote
//! intent: the state token is applied first, the timer second, so a single
//! request carrying `state=off&timer=5` leaves the fireplace requested on
//! with a five-minute timer.
//!
//! Unknown state tokens and non-numeric timer values change nothing.  They
//! are logged and listed in [`CommandOutcome::ignored`]; the caller still
//! gets the normal acknowledgement.

use core::fmt;

use log::warn;

use crate::clock::Instant;
use crate::state::ControllerState;

/// Longest unrecognised token kept for diagnostics; longer ones are cut.
const TOKEN_CAPACITY: usize = 16;

// ───────────────────────────────────────────────────────────────
// Parameters
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateToken {
    On,
    Off,
    Unrecognized(heapless::String<TOKEN_CAPACITY>),
}

impl StateToken {
    /// Case-sensitive: only `on` and `off` are understood.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "on" => Self::On,
            "off" => Self::Off,
            other => Self::Unrecognized(truncated(other)),
        }
    }
}

impl fmt::Display for StateToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On => f.write_str("on"),
            Self::Off => f.write_str("off"),
            Self::Unrecognized(s) => write!(f, "{s:?}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerArg {
    /// Signed so that `timer=0` and `timer=-3` both mean "cancel".
    Minutes(i64),
    /// Not a decimal integer (or out of `i64` range).
    Malformed,
}

impl TimerArg {
    pub fn parse(raw: &str) -> Self {
        raw.trim()
            .parse::<i64>()
            .map_or(Self::Malformed, Self::Minutes)
    }
}

// ───────────────────────────────────────────────────────────────
// Request
// ───────────────────────────────────────────────────────────────

/// One remote control request.  Either field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlRequest {
    pub state: Option<StateToken>,
    pub timer: Option<TimerArg>,
}

impl ControlRequest {
    pub fn new(state: Option<StateToken>, timer: Option<TimerArg>) -> Self {
        Self { state, timer }
    }

    /// Build from already-extracted raw parameter values.
    pub fn from_params(state: Option<&str>, timer: Option<&str>) -> Self {
        Self {
            state: state.map(StateToken::parse),
            timer: timer.map(TimerArg::parse),
        }
    }

    /// Parse a URL query string (`state=on&timer=10`, no leading `?`).
    ///
    /// The first occurrence of each key wins; unknown keys are skipped.
    pub fn from_query(query: &str) -> Self {
        Self::from_params(
            query_param(query, "state").as_deref(),
            query_param(query, "timer").as_deref(),
        )
    }

    /// Apply to `state` at time `now`.  State token first, timer second.
    pub fn apply(&self, state: &mut ControllerState, now: Instant) -> CommandOutcome {
        let mut outcome = CommandOutcome {
            desired_before: state.desired_on,
            desired_after: state.desired_on,
            timer: TimerChange::Unchanged,
            ignored: heapless::Vec::new(),
        };

        // 1. State token.
        match &self.state {
            Some(StateToken::On) => {
                state.desired_on = true;
                outcome.note_cancel(state.timer.cancel());
            }
            Some(StateToken::Off) => {
                state.desired_on = false;
                outcome.note_cancel(state.timer.cancel());
            }
            Some(StateToken::Unrecognized(token)) => {
                warn!("control: ignoring unknown state token {:?}", token.as_str());
                outcome.ignore(Ignored::State(token.clone()));
            }
            None => {}
        }

        // 2. Timer.
        match self.timer {
            Some(TimerArg::Minutes(n)) if n > 0 => {
                let minutes = u32::try_from(n).unwrap_or(u32::MAX);
                let deadline = state.timer.arm(now, minutes);
                state.desired_on = true;
                outcome.timer = TimerChange::Armed { minutes, deadline };
            }
            Some(TimerArg::Minutes(_)) => {
                outcome.note_cancel(state.timer.cancel());
            }
            Some(TimerArg::Malformed) => {
                warn!("control: ignoring non-numeric timer value");
                outcome.ignore(Ignored::Timer);
            }
            None => {}
        }

        outcome.desired_after = state.desired_on;
        outcome
    }
}

impl fmt::Display for ControlRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("control")?;
        if let Some(s) = &self.state {
            write!(f, " [state: {s}]")?;
        }
        match self.timer {
            Some(TimerArg::Minutes(n)) => write!(f, " [timer: {n}m]")?,
            Some(TimerArg::Malformed) => f.write_str(" [timer: ?]")?,
            None => {}
        }
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// Outcome
// ───────────────────────────────────────────────────────────────

/// Net effect of a request on the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerChange {
    Unchanged,
    Armed { minutes: u32, deadline: Instant },
    /// A pending timer was discarded and none re-armed.
    Cancelled,
}

/// A parameter that was present but not understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ignored {
    State(heapless::String<TOKEN_CAPACITY>),
    Timer,
}

/// What [`ControlRequest::apply`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub desired_before: bool,
    pub desired_after: bool,
    pub timer: TimerChange,
    pub ignored: heapless::Vec<Ignored, 2>,
}

impl CommandOutcome {
    pub fn desired_changed(&self) -> bool {
        self.desired_before != self.desired_after
    }

    fn note_cancel(&mut self, was_armed: bool) {
        if was_armed {
            self.timer = TimerChange::Cancelled;
        }
    }

    fn ignore(&mut self, what: Ignored) {
        // At most one state and one timer parameter per request.
        let _ = self.ignored.push(what);
    }
}

// ───────────────────────────────────────────────────────────────
// Query string helpers
// ───────────────────────────────────────────────────────────────

/// First value for `key` in `query`, with `+` decoded to a space.
pub fn query_param(query: &str, key: &str) -> Option<String> {
    query
        .split('&')
        .filter_map(|pair| {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            (name == key).then(|| value.replace('+', " "))
        })
        .next()
}

fn truncated(s: &str) -> heapless::String<TOKEN_CAPACITY> {
    let mut out = heapless::String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
