//! Input subsystem: individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns every input driver and produces an [`InputSnapshot`] each
//! tick, which the safety evaluator copies into the controller state.

pub mod discrete;
pub mod thermocouple;

#[cfg(not(target_os = "espidf"))]
pub use discrete::{sim_set_bypass, sim_set_wall_switch};
#[cfg(not(target_os = "espidf"))]
pub use thermocouple::sim_set_thermocouple_mv;

use crate::pins;
use crate::state::InputSnapshot;
use discrete::{DiscreteInput, DiscreteSensor};
use thermocouple::Thermocouple;

/// Aggregates all input drivers.
pub struct SensorHub {
    pub thermocouple: Thermocouple,
    pub wall_switch: DiscreteSensor,
    pub bypass: DiscreteSensor,
}

impl SensorHub {
    pub fn new(
        thermocouple: Thermocouple,
        wall_switch: DiscreteSensor,
        bypass: DiscreteSensor,
    ) -> Self {
        Self {
            thermocouple,
            wall_switch,
            bypass,
        }
    }

    /// Hub wired to the board's pin map.
    pub fn from_pins() -> Self {
        Self::new(
            Thermocouple::new(pins::THERMOCOUPLE_ADC1_CHANNEL),
            DiscreteSensor::new(DiscreteInput::WallSwitch),
            DiscreteSensor::new(DiscreteInput::MasterBypass),
        )
    }

    /// Sample every input once.
    pub fn read_inputs(&mut self) -> InputSnapshot {
        InputSnapshot {
            safety_mv: self.thermocouple.read_mv(),
            wall_switch: self.wall_switch.is_high(),
            bypass: self.bypass.is_high(),
        }
    }
}
