//! Output drivers, hardware initialisation, and peripheral helpers.

pub mod hw_init;
pub mod indicator;
pub mod sim_pin;
pub mod task_pin;
pub mod valve;
pub mod watchdog;

use embedded_hal::digital::{OutputPin, StatefulOutputPin};
use log::error;

/// Drive `pin` to `high`.  A HAL error is logged and swallowed; returns
/// whether the write was accepted.
pub(crate) fn write_level<P: OutputPin>(pin: &mut P, high: bool, label: &str) -> bool {
    let res = if high { pin.set_high() } else { pin.set_low() };
    match res {
        Ok(()) => true,
        Err(e) => {
            error!(
                "{label}: write {} failed: {e:?}",
                if high { "HIGH" } else { "LOW" }
            );
            false
        }
    }
}

/// Read back the level latched on an output pin, or `fallback` if the
/// HAL cannot report it.
pub(crate) fn read_level<P: StatefulOutputPin>(pin: &mut P, fallback: bool, label: &str) -> bool {
    match pin.is_set_high() {
        Ok(level) => level,
        Err(e) => {
            error!("{label}: readback failed: {e:?}");
            fallback
        }
    }
}
