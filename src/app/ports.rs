//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (input sensors, valve/indicator outputs, event sinks)
//! implement these traits.  The [`AppService`](super::service::AppService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.  Time comes in through [`TimePort`](crate::clock::TimePort).

pub use crate::state::{InputSnapshot, OutputLevels};

// ───────────────────────────────────────────────────────────────
// Input port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: sampled once per tick, before the safety evaluator.
pub trait InputPort {
    /// Read the thermocouple and both discrete inputs.
    fn read_inputs(&mut self) -> InputSnapshot;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the gas valve and its indicator.
///
/// There is no error return.  Implementations log a failed pin write and
/// carry on; the next tick rewrites the same level.
pub trait ActuatorPort {
    /// Drive the valve to `energize` and mirror it on the indicator.
    fn apply(&mut self, energize: bool);

    /// Levels currently present on the output pins (read back, not
    /// remembered).
    fn output_levels(&mut self) -> OutputLevels;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
