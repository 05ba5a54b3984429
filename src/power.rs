//! Power supply and reset line capabilities
//!
//! The panel needs one supply rail switched on before anything else, and an
//! optional reset line. Both are modelled as small capabilities so the driver
//! can run on anything from a PMIC-controlled regulator to a plain GPIO.
//!
//! ## Example
//!
//! ```
//! use core::convert::Infallible;
//! use embedded_hal::digital::{ErrorType, OutputPin};
//! use am4001280::{GpioSupply, PowerSupply, ResetLine};
//!
//! struct Pin;
//! impl ErrorType for Pin { type Error = Infallible; }
//! impl OutputPin for Pin {
//!     fn set_low(&mut self) -> Result<(), Infallible> { Ok(()) }
//!     fn set_high(&mut self) -> Result<(), Infallible> { Ok(()) }
//! }
//!
//! let mut supply = GpioSupply::new(Pin);
//! assert!(supply.enable().is_ok());
//!
//! let mut reset = ResetLine::new(Pin);
//! reset.assert();
//! assert!(reset.is_asserted());
//! ```

use core::convert::Infallible;
use core::fmt::Debug;

use embedded_hal::digital::{ErrorType, OutputPin};
use log::warn;

/// A switchable supply rail (or a bundle of rails switched together)
pub trait PowerSupply {
    /// Error type for supply operations
    type Error: Debug;

    /// Switch the supply on
    fn enable(&mut self) -> Result<(), Self::Error>;

    /// Switch the supply off
    fn disable(&mut self) -> Result<(), Self::Error>;
}

/// A regulator controlled through an enable GPIO
pub struct GpioSupply<P> {
    /// Enable pin
    pin: P,
    /// Enable pin polarity (true = active high)
    active_high: bool,
}

impl<P: OutputPin> GpioSupply<P> {
    /// Create a supply with an active-high enable pin
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            active_high: true,
        }
    }

    /// Set enable pin polarity
    ///
    /// Default is active-high. Set to false for active-low enables.
    pub fn set_active_high(&mut self, active_high: bool) -> &mut Self {
        self.active_high = active_high;
        self
    }

    /// Release the enable pin
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> PowerSupply for GpioSupply<P> {
    type Error = P::Error;

    fn enable(&mut self) -> Result<(), Self::Error> {
        self.pin.set_state(self.active_high.into())
    }

    fn disable(&mut self) -> Result<(), Self::Error> {
        self.pin.set_state((!self.active_high).into())
    }
}

/// Placeholder pin for panels without a wired reset line
///
/// Use as the reset type parameter when no reset line exists; it is never
/// driven.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPin;

impl ErrorType for NoPin {
    type Error = Infallible;
}

impl OutputPin for NoPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Panel reset line
///
/// Tracks the logical level so the driver knows whether the panel is
/// currently held in reset. Pin errors are logged and otherwise ignored:
/// a reset GPIO that cannot be driven leaves nothing to roll back to.
pub struct ResetLine<P> {
    /// Reset pin
    pin: P,
    /// Reset polarity (true = asserted when high)
    active_high: bool,
    /// Whether reset is currently asserted
    asserted: bool,
}

impl<P: OutputPin> ResetLine<P> {
    /// Create a reset line with the usual active-low polarity
    ///
    /// The line starts out deasserted as far as tracking goes; call
    /// [`ResetLine::assert`] to put the pin into a known level.
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            active_high: false,
            asserted: false,
        }
    }

    /// Set reset polarity
    pub fn set_active_high(&mut self, active_high: bool) -> &mut Self {
        self.active_high = active_high;
        self
    }

    /// Get reset polarity (true = active high)
    pub fn active_high(&self) -> bool {
        self.active_high
    }

    /// Hold the panel in reset
    pub fn assert(&mut self) {
        self.set(true);
    }

    /// Release the panel from reset
    pub fn deassert(&mut self) {
        self.set(false);
    }

    /// Whether reset is currently asserted
    pub fn is_asserted(&self) -> bool {
        self.asserted
    }

    /// Release the pin
    pub fn release(self) -> P {
        self.pin
    }

    fn set(&mut self, asserted: bool) {
        let high = asserted == self.active_high;
        if let Err(e) = self.pin.set_state(high.into()) {
            warn!("Failed to drive reset line (asserted={}): {:?}", asserted, e);
        }
        self.asserted = asserted;
    }
}
