//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the controller state and the safety evaluator.
//! It exposes a clean, hardware-agnostic API.  All I/O flows through
//! port traits injected at call sites, and time is passed in, so the
//! entire service is testable with mock adapters and a simulated clock.
//!
//! ```text
//!    InputPort ──▶ ┌───────────────────────────────┐ ──▶ EventSink
//!                  │          AppService            │
//! ActuatorPort ◀── │ Safety · Timer · Arbiter       │
//!                  └───────────────────────────────┘
//!                         ▲ ControlRequest  │ Status
//! ```

use log::{info, warn};

use crate::arbiter::{self, Decision, DecisionReason};
use crate::clock::Instant;
use crate::config::ControllerConfig;
use crate::safety::SafetyEvaluator;
use crate::state::ControllerState;
use crate::status::Status;

use super::commands::{CommandOutcome, ControlRequest, TimerChange};
use super::events::AppEvent;
use super::ports::{ActuatorPort, EventSink, InputPort};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    config: ControllerConfig,
    state: ControllerState,
    safety: SafetyEvaluator,
    /// Reason behind the previous tick's decision, for edge detection.
    last_reason: Option<DecisionReason>,
    tick_count: u64,
}

impl AppService {
    /// Construct the service from configuration.
    ///
    /// The state starts all-off.  Call [`start`](Self::start) before the
    /// first tick.
    pub fn new(config: ControllerConfig) -> Self {
        let safety = SafetyEvaluator::new(config.safety_band());
        Self {
            config,
            state: ControllerState::default(),
            safety,
            last_reason: None,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        let band = self.safety.band();
        sink.emit(&AppEvent::Started {
            min_mv: band.min_mv(),
            max_mv: band.max_mv(),
        });
        info!(
            "AppService started (safety band {}..={} mV)",
            band.min_mv(),
            band.max_mv()
        );
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle: inputs → safety → timer → arbiter → actuators.
    ///
    /// The `hw` parameter satisfies **both** [`InputPort`] and
    /// [`ActuatorPort`], which avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn tick(
        &mut self,
        now: Instant,
        hw: &mut (impl InputPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) -> Decision {
        self.tick_count += 1;

        // 1. Sample inputs
        let inputs = hw.read_inputs();

        // 2. Safety evaluation
        let verdict = self.safety.evaluate(&mut self.state, &inputs);
        if let Some(safe) = verdict.safety_edge {
            sink.emit(&AppEvent::SafetyChanged {
                safe,
                mv: inputs.safety_mv,
            });
        }
        if let Some(level) = verdict.bypass_edge {
            sink.emit(&AppEvent::BypassChanged(level));
        }
        if let Some(level) = verdict.wall_switch_edge {
            sink.emit(&AppEvent::WallSwitchChanged(level));
        }

        // 3. Timer expiry
        if self.state.timer.poll_expired(now) {
            self.state.desired_on = false;
            info!("Timer expired, turning off");
            sink.emit(&AppEvent::TimerExpired);
        }

        // 4. Arbiter
        let decision = arbiter::decide(
            self.state.desired_on,
            self.state.is_safe,
            self.state.bypass_active,
        );
        let was_energized = self.state.valve_energized;
        self.state.valve_energized = decision.energize;

        if decision.reason == DecisionReason::Bypass
            && self.last_reason != Some(DecisionReason::Bypass)
        {
            warn!(
                "BYPASS OVERRIDE: valve held open (desired_on={}, is_safe={}, {} mV)",
                self.state.desired_on, self.state.is_safe, self.state.safety_mv
            );
        }
        self.last_reason = Some(decision.reason);

        // 5. Actuators
        hw.apply(decision.energize);
        self.state.outputs = hw.output_levels();

        if decision.energize != was_energized || self.tick_count == 1 {
            sink.emit(&AppEvent::ValveChanged {
                energized: decision.energize,
                reason: decision.reason,
            });
        }

        decision
    }

    // ── Command handling ──────────────────────────────────────

    /// Apply a remote control request.
    ///
    /// Only intent and timer change here; the valve follows on the next
    /// tick.
    pub fn handle_command(
        &mut self,
        req: &ControlRequest,
        now: Instant,
        sink: &mut impl EventSink,
    ) -> CommandOutcome {
        info!("Web: {req}");
        let outcome = req.apply(&mut self.state, now);

        match outcome.timer {
            TimerChange::Armed { minutes, deadline } => {
                sink.emit(&AppEvent::TimerArmed { minutes, deadline });
            }
            TimerChange::Cancelled => sink.emit(&AppEvent::TimerCancelled),
            TimerChange::Unchanged => {}
        }
        if outcome.desired_changed() {
            sink.emit(&AppEvent::DesiredChanged(outcome.desired_after));
        }
        outcome
    }

    // ── Queries ───────────────────────────────────────────────

    /// Status projection at `now`.
    pub fn status(&self, now: Instant) -> Status {
        Status::snapshot(&self.state, now)
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
