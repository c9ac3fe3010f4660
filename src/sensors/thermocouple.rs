//! Pilot thermocouple / thermopile.
//!
//! A lit pilot produces a few hundred millivolts across the thermopile;
//! the ESP32 reads it on ADC1 with calibration and reports millivolts.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: calibrated ADC1 oneshot read via hw_init.
//! On host/test: returns the value set with [`sim_set_thermocouple_mv`]
//! (defaults to 0 mV, i.e. no flame).

use core::sync::atomic::{AtomicI32, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

static SIM_MV: AtomicI32 = AtomicI32::new(0);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_thermocouple_mv(mv: i32) {
    SIM_MV.store(mv, Ordering::Relaxed);
}

pub struct Thermocouple {
    _channel: u32,
    last_mv: i32,
}

impl Thermocouple {
    pub fn new(adc1_channel: u32) -> Self {
        Self {
            _channel: adc1_channel,
            last_mv: 0,
        }
    }

    /// Sample once and return millivolts.
    pub fn read_mv(&mut self) -> i32 {
        self.last_mv = self.sample();
        self.last_mv
    }

    pub fn last_mv(&self) -> i32 {
        self.last_mv
    }

    #[cfg(target_os = "espidf")]
    fn sample(&self) -> i32 {
        hw_init::adc1_read_mv(self._channel)
    }

    #[cfg(not(target_os = "espidf"))]
    fn sample(&self) -> i32 {
        SIM_MV.load(Ordering::Relaxed)
    }
}
