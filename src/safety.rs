//! Safety evaluator.
//!
//! Runs **every tick before the timer and arbiter**.  It copies the raw
//! inputs into [`ControllerState`] and recomputes `is_safe` from the
//! thermocouple reading.  There is no error path: a reading outside the
//! band is the signal that the pilot flame is not proven, and the arbiter
//! acts on it like any other input.
//!
//! ## Band
//!
//! The band is closed on both ends.  Below `min_mv` the pilot is out; above
//! `max_mv` the reading is implausible for a thermopile and is treated as a
//! wiring fault.  Either way the valve stays closed unless bypass is held.
//!
//! Edges (band entered/left, bypass engaged/released, wall switch toggled)
//! are logged once and reported in the returned [`SafetyVerdict`]; steady
//! state is silent.

use log::{error, info, warn};

use crate::state::{ControllerState, InputSnapshot};

/// Closed millivolt interval that proves a lit pilot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafetyBand {
    min_mv: i32,
    max_mv: i32,
}

impl SafetyBand {
    pub const fn new(min_mv: i32, max_mv: i32) -> Self {
        Self { min_mv, max_mv }
    }

    pub const fn min_mv(&self) -> i32 {
        self.min_mv
    }

    pub const fn max_mv(&self) -> i32 {
        self.max_mv
    }

    /// `min_mv <= mv <= max_mv`
    pub const fn contains(&self, mv: i32) -> bool {
        mv >= self.min_mv && mv <= self.max_mv
    }
}

impl Default for SafetyBand {
    fn default() -> Self {
        Self::new(150, 500)
    }
}

/// What changed during one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SafetyVerdict {
    pub is_safe: bool,
    /// `Some(new)` when `is_safe` flipped this tick.
    pub safety_edge: Option<bool>,
    /// `Some(new)` when the bypass input flipped this tick.
    pub bypass_edge: Option<bool>,
    /// `Some(new)` when the wall switch flipped this tick.
    pub wall_switch_edge: Option<bool>,
}

/// Safety evaluator.
#[derive(Debug, Clone)]
pub struct SafetyEvaluator {
    band: SafetyBand,
}

impl SafetyEvaluator {
    pub fn new(band: SafetyBand) -> Self {
        Self { band }
    }

    pub fn band(&self) -> SafetyBand {
        self.band
    }

    /// Copy `inputs` into `state` and recompute `is_safe`.
    ///
    /// Idempotent for a given snapshot: a second call with the same inputs
    /// reports no edges.
    pub fn evaluate(&mut self, state: &mut ControllerState, inputs: &InputSnapshot) -> SafetyVerdict {
        let is_safe = self.band.contains(inputs.safety_mv);

        let safety_edge = edge(state.is_safe, is_safe);
        let bypass_edge = edge(state.bypass_active, inputs.bypass);
        let wall_switch_edge = edge(state.wall_switch_active, inputs.wall_switch);

        state.safety_mv = inputs.safety_mv;
        state.is_safe = is_safe;
        state.bypass_active = inputs.bypass;
        state.wall_switch_active = inputs.wall_switch;

        // ── Edge logging ──────────────────────────────────────────
        match safety_edge {
            Some(true) => info!(
                "SAFETY: thermocouple in band ({} mV, {}..={})",
                inputs.safety_mv, self.band.min_mv, self.band.max_mv
            ),
            Some(false) => error!(
                "SAFETY: thermocouple out of band ({} mV, {}..={}), valve interlocked",
                inputs.safety_mv, self.band.min_mv, self.band.max_mv
            ),
            None => {}
        }
        match bypass_edge {
            Some(true) => warn!("SAFETY: master bypass ENGAGED"),
            Some(false) => info!("SAFETY: master bypass released"),
            None => {}
        }
        if let Some(level) = wall_switch_edge {
            info!("Wall switch {}", if level { "ON" } else { "OFF" });
        }

        SafetyVerdict {
            is_safe,
            safety_edge,
            bypass_edge,
            wall_switch_edge,
        }
    }
}

impl Default for SafetyEvaluator {
    fn default() -> Self {
        Self::new(SafetyBand::default())
    }
}

fn edge(prev: bool, now: bool) -> Option<bool> {
    (prev != now).then_some(now)
}
