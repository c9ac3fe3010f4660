//! Mock hardware adapter for integration tests.
//!
//! Inputs are plain fields the test sets before each tick.  Every
//! actuator call is recorded so tests can assert on the full command
//! history without touching real GPIO registers.

use fireplace::app::events::AppEvent;
use fireplace::app::ports::{ActuatorPort, EventSink, InputPort, InputSnapshot, OutputLevels};

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    Apply(bool),
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub inputs: InputSnapshot,
    pub calls: Vec<ActuatorCall>,
    levels: OutputLevels,
    /// When set, the valve pin reads back this level whatever was written.
    stuck_valve: Option<bool>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            inputs: InputSnapshot::default(),
            calls: Vec::new(),
            levels: OutputLevels::default(),
            stuck_valve: None,
        }
    }

    /// Pilot lit at a comfortable reading, switches open.
    pub fn lit() -> Self {
        let mut hw = Self::new();
        hw.inputs.safety_mv = 300;
        hw
    }

    pub fn stuck_valve(mut self, level: bool) -> Self {
        self.stuck_valve = Some(level);
        self
    }

    pub fn set_mv(&mut self, mv: i32) {
        self.inputs.safety_mv = mv;
    }

    pub fn set_bypass(&mut self, high: bool) {
        self.inputs.bypass = high;
    }

    pub fn set_wall_switch(&mut self, high: bool) {
        self.inputs.wall_switch = high;
    }

    /// Level most recently commanded to the valve.
    pub fn valve_on(&self) -> bool {
        match self.calls.last() {
            Some(ActuatorCall::Apply(on)) => *on,
            None => false,
        }
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl InputPort for MockHardware {
    fn read_inputs(&mut self) -> InputSnapshot {
        self.inputs
    }
}

impl ActuatorPort for MockHardware {
    fn apply(&mut self, energize: bool) {
        self.calls.push(ActuatorCall::Apply(energize));
        self.levels = OutputLevels {
            valve: energize,
            indicator: energize,
        };
    }

    fn output_levels(&mut self) -> OutputLevels {
        OutputLevels {
            valve: self.stuck_valve.unwrap_or(self.levels.valve),
            indicator: self.levels.indicator,
        }
    }
}

// ── CollectSink ───────────────────────────────────────────────

pub struct CollectSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl CollectSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Default for CollectSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for CollectSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
