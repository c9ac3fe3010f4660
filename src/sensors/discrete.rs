//! Active-HIGH discrete inputs: the wall switch and the master bypass.
//!
//! Both are configured with internal pull-downs, so an unplugged wire
//! reads LOW (switch off, bypass released).
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads real GPIO levels via hw_init helpers.
//! On host/test: reads per-input atomics set with `sim_set_*`.

use core::sync::atomic::{AtomicBool, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
use crate::pins;

static SIM_WALL_SWITCH: AtomicBool = AtomicBool::new(false);
static SIM_BYPASS: AtomicBool = AtomicBool::new(false);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_wall_switch(high: bool) {
    SIM_WALL_SWITCH.store(high, Ordering::Relaxed);
}

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_bypass(high: bool) {
    SIM_BYPASS.store(high, Ordering::Relaxed);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscreteInput {
    WallSwitch,
    MasterBypass,
}

impl DiscreteInput {
    pub const fn gpio(self) -> i32 {
        match self {
            Self::WallSwitch => pins::WALL_SWITCH_GPIO,
            Self::MasterBypass => pins::MASTER_BYPASS_GPIO,
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn sim_cell(self) -> &'static AtomicBool {
        match self {
            Self::WallSwitch => &SIM_WALL_SWITCH,
            Self::MasterBypass => &SIM_BYPASS,
        }
    }
}

pub struct DiscreteSensor {
    input: DiscreteInput,
}

impl DiscreteSensor {
    pub fn new(input: DiscreteInput) -> Self {
        Self { input }
    }

    /// `true` when the pin is HIGH.
    #[cfg(target_os = "espidf")]
    pub fn is_high(&self) -> bool {
        hw_init::gpio_read(self.input.gpio())
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn is_high(&self) -> bool {
        self.input.sim_cell().load(Ordering::Relaxed)
    }
}
