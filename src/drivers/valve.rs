//! Gas valve driver.
//!
//! A single digital output: HIGH energises the solenoid and gas flows.
//! The constructor drives the pin LOW before anything else touches it, so
//! the valve is closed from the moment the driver exists.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: wraps an `esp_idf_hal::gpio::PinDriver` in output mode.
//! On host/test: wraps a [`SimPin`](super::sim_pin::SimPin) or a mock.

use embedded_hal::digital::StatefulOutputPin;
use log::info;

use super::{read_level, write_level};

pub struct Valve<P: StatefulOutputPin> {
    pin: P,
    /// Last level the HAL accepted.
    commanded: bool,
}

impl<P: StatefulOutputPin> Valve<P> {
    pub fn new(mut pin: P) -> Self {
        write_level(&mut pin, false, "valve");
        info!("Valve driver ready (closed)");
        Self {
            pin,
            commanded: false,
        }
    }

    /// Open (`true`) or close the valve.
    pub fn set(&mut self, energize: bool) {
        if write_level(&mut self.pin, energize, "valve") {
            self.commanded = energize;
        }
    }

    /// Level currently latched on the pin.
    pub fn is_energized(&mut self) -> bool {
        read_level(&mut self.pin, self.commanded, "valve")
    }
}
