//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`] and both output drivers, exposing them through
//! [`InputPort`] and [`ActuatorPort`].  On non-espidf targets the sensors
//! read simulation atomics and the outputs are [`SimPin`]s.

use embedded_hal::digital::StatefulOutputPin;

use crate::app::ports::{ActuatorPort, InputPort, InputSnapshot, OutputLevels};
use crate::drivers::indicator::Indicator;
use crate::drivers::sim_pin::SimPin;
use crate::drivers::valve::Valve;
use crate::sensors::SensorHub;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<V: StatefulOutputPin, L: StatefulOutputPin> {
    sensor_hub: SensorHub,
    valve: Valve<V>,
    indicator: Indicator<L>,
}

impl<V: StatefulOutputPin, L: StatefulOutputPin> HardwareAdapter<V, L> {
    pub fn new(sensor_hub: SensorHub, valve: Valve<V>, indicator: Indicator<L>) -> Self {
        Self {
            sensor_hub,
            valve,
            indicator,
        }
    }
}

/// Host build: simulated inputs and in-memory output pins.
pub type SimHardware = HardwareAdapter<SimPin, SimPin>;

impl SimHardware {
    pub fn simulated() -> Self {
        Self::new(
            SensorHub::from_pins(),
            Valve::new(SimPin::new()),
            Indicator::new(SimPin::new()),
        )
    }
}

// ── InputPort implementation ──────────────────────────────────

impl<V: StatefulOutputPin, L: StatefulOutputPin> InputPort for HardwareAdapter<V, L> {
    fn read_inputs(&mut self) -> InputSnapshot {
        self.sensor_hub.read_inputs()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<V: StatefulOutputPin, L: StatefulOutputPin> ActuatorPort for HardwareAdapter<V, L> {
    fn apply(&mut self, energize: bool) {
        self.valve.set(energize);
        self.indicator.set(energize);
    }

    fn output_levels(&mut self) -> OutputLevels {
        OutputLevels {
            valve: self.valve.is_energized(),
            indicator: self.indicator.is_lit(),
        }
    }
}
