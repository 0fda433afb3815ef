//! Output abstraction for the indicator LED.

use embedded_hal::digital::OutputPin;

/// Trait for abstracting the LED output.
///
/// Implement this for your LED hardware to allow the sequencer to drive it.
/// Writes cannot fail; handle hardware errors internally.
pub trait OutputPort {
    /// Prepares the pin for driving the LED. Called once by the sequencer.
    fn configure_as_output(&mut self) {}

    /// Turns the LED on (`true`) or off (`false`).
    fn set_level(&mut self, on: bool);
}

/// Electrical polarity of the LED connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// LED lights when the pin is high.
    #[default]
    ActiveHigh,

    /// LED lights when the pin is low (LED wired to the supply rail).
    ActiveLow,
}

/// [`OutputPort`] for any `embedded-hal` output pin.
///
/// The pin is expected to already be in output mode, as HAL pin types are
/// typestate-configured before they implement [`OutputPin`].
pub struct PinLed<P: OutputPin> {
    pin: P,
    polarity: Polarity,
}

impl<P: OutputPin> PinLed<P> {
    /// Wraps an active-high pin.
    pub fn new(pin: P) -> Self {
        Self::with_polarity(pin, Polarity::ActiveHigh)
    }

    /// Wraps a pin with explicit polarity.
    pub fn with_polarity(pin: P, polarity: Polarity) -> Self {
        Self { pin, polarity }
    }

    /// Returns the wrapped pin.
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> OutputPort for PinLed<P> {
    fn set_level(&mut self, on: bool) {
        let high = match self.polarity {
            Polarity::ActiveHigh => on,
            Polarity::ActiveLow => !on,
        };
        let result = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if result.is_err() {
            warn!("LED pin write failed");
        }
    }
}
