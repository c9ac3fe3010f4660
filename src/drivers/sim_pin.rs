//! In-memory output pin for host builds.
//!
//! Implements the embedded-hal 1.0 digital output traits over a plain
//! `bool`, so the valve and indicator drivers run unchanged on x86_64.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin, StatefulOutputPin};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SimPin {
    high: bool,
}

impl SimPin {
    pub const fn new() -> Self {
        Self { high: false }
    }

    /// Set the level without going through the driver (power-on glitch,
    /// test setup).
    pub fn force(&mut self, high: bool) {
        self.high = high;
    }

    pub fn level(&self) -> bool {
        self.high
    }
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        Ok(())
    }
}

impl StatefulOutputPin for SimPin {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.high)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.high)
    }
}
