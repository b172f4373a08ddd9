//! Solenoid tap output
//!
//! A push solenoid switched by a logic-level MOSFET on a GPIO pin.

use gemtap_core::traits::Actuator;
use gemtap_hal::OutputPin;

/// Solenoid output
///
/// The gate can be active-high (default) or active-low. The solenoid is
/// released on construction, before anything else can energize it.
pub struct Solenoid<P> {
    pin: P,
    /// If true, solenoid ON = pin LOW
    inverted: bool,
    /// Current logical state (true = energized)
    on: bool,
}

impl<P: OutputPin> Solenoid<P> {
    /// Create a new solenoid output
    ///
    /// # Arguments
    /// - `pin`: The gate pin
    /// - `inverted`: If true, the solenoid is energized when the pin is LOW
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut solenoid = Self {
            pin,
            inverted,
            on: false,
        };
        solenoid.set_on(false);
        solenoid
    }

    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }

    /// Access the gate pin
    pub fn pin(&self) -> &P {
        &self.pin
    }
}

impl<P: OutputPin> Actuator for Solenoid<P> {
    fn set_on(&mut self, on: bool) {
        self.on = on;
        self.pin.set_state(on != self.inverted);
    }

    fn is_on(&self) -> bool {
        self.on
    }
}
