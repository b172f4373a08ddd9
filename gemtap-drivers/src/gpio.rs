//! Adapters from `embedded-hal` pins to gemtap-hal pins
//!
//! Board HALs implement the `embedded-hal` 1.0 digital traits; the drivers
//! are written against the simpler gemtap-hal traits.

use embedded_hal::digital::{InputPin as EhInputPin, OutputPin as EhOutputPin};
use gemtap_hal::{InputPin, OutputPin};

/// Output pin backed by an `embedded-hal` output
///
/// The last commanded level is tracked locally so reading it back never
/// touches the hardware.
pub struct HalOutput<P> {
    pin: P,
    high: bool,
}

impl<P: EhOutputPin> HalOutput<P> {
    /// Wrap a pin and drive it low
    pub fn new(pin: P) -> Self {
        let mut output = Self { pin, high: true };
        output.set_low();
        output
    }

    /// Release the wrapped pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: EhOutputPin> OutputPin for HalOutput<P> {
    fn set_high(&mut self) {
        // GPIO writes on the supported boards are infallible
        let _ = self.pin.set_high();
        self.high = true;
    }

    fn set_low(&mut self) {
        let _ = self.pin.set_low();
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Input pin backed by an `embedded-hal` input
pub struct HalInput<P> {
    pin: P,
}

impl<P: EhInputPin> HalInput<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: EhInputPin> InputPin for HalInput<P> {
    /// A failed read reports high, i.e. a released pulled-up button
    fn is_high(&mut self) -> bool {
        self.pin.is_high().unwrap_or(true)
    }
}
