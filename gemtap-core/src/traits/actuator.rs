//! Tap actuator trait

/// A single tap actuator (solenoid, relay, ...)
///
/// Implementations control the physical output via GPIO, usually through a
/// MOSFET gate. "On" means the plunger is pressed against the screen.
pub trait Actuator {
    /// Energize or release the actuator
    fn set_on(&mut self, on: bool);

    /// Check if the actuator is currently energized
    fn is_on(&self) -> bool;
}

impl<T: Actuator + ?Sized> Actuator for &mut T {
    fn set_on(&mut self, on: bool) {
        (**self).set_on(on)
    }

    fn is_on(&self) -> bool {
        (**self).is_on()
    }
}
