//! Onboard indicator LED.
//!
//! Mirrors the valve: lit while gas is allowed to flow.  Driven LOW at
//! construction.

use embedded_hal::digital::StatefulOutputPin;

use super::{read_level, write_level};

pub struct Indicator<P: StatefulOutputPin> {
    pin: P,
    commanded: bool,
}

impl<P: StatefulOutputPin> Indicator<P> {
    pub fn new(mut pin: P) -> Self {
        write_level(&mut pin, false, "indicator");
        Self {
            pin,
            commanded: false,
        }
    }

    pub fn set(&mut self, lit: bool) {
        if write_level(&mut self.pin, lit, "indicator") {
            self.commanded = lit;
        }
    }

    pub fn is_lit(&mut self) -> bool {
        read_level(&mut self.pin, self.commanded, "indicator")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::sim_pin::SimPin;

    #[test]
    fn starts_dark_and_follows_commands() {
        let mut pin = SimPin::new();
        pin.force(true);
        let mut led = Indicator::new(pin);
        assert!(!led.is_lit());
        led.set(true);
        assert!(led.is_lit());
    }
}
