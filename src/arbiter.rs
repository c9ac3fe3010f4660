//! Control arbiter.
//!
//! ```text
//! energize = bypass || (desired_on && is_safe)
//! ```
//!
//! A pure function of three booleans, recomputed every tick.  No
//! hysteresis, no debounce: the valve follows the inputs of the current
//! tick.  The [`DecisionReason`] exists so the service can tell "open
//! because requested" from "open only because bypass is held".

/// Why the arbiter chose what it chose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionReason {
    /// Bypass held and the valve would otherwise be closed.
    Bypass,
    /// Requested on and the flame is proven.
    Requested,
    /// Nobody asked for heat.
    NotRequested,
    /// Requested on but the flame is not proven.
    Unsafe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub energize: bool,
    pub reason: DecisionReason,
}

/// Combine operator intent, the safety interlock and the bypass override.
pub fn decide(desired_on: bool, is_safe: bool, bypass_active: bool) -> Decision {
    let reason = match (desired_on, is_safe) {
        (true, true) => DecisionReason::Requested,
        _ if bypass_active => DecisionReason::Bypass,
        (true, false) => DecisionReason::Unsafe,
        (false, _) => DecisionReason::NotRequested,
    };
    Decision {
        energize: bypass_active || (desired_on && is_safe),
        reason,
    }
}
