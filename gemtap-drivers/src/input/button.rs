//! Debounced push button
//!
//! Buttons are wired to ground with the internal pull-up enabled, so a
//! press reads low.

use gemtap_hal::InputPin;

/// Debounce window for the panel buttons (ms)
pub const BUTTON_DEBOUNCE_MS: u32 = 40;

/// Debounce window for the encoder push switch (ms)
pub const SWITCH_DEBOUNCE_MS: u32 = 30;

/// Falling-edge detector with debounce
///
/// A level change is accepted only if at least `debounce_ms` have passed
/// since the last accepted change; anything sooner is treated as bounce
/// and ignored. Time arithmetic wraps with the millisecond counter.
pub struct Button<P> {
    pin: P,
    debounce_ms: u32,
    /// Last accepted level
    pressed: bool,
    /// Time of the last accepted change
    changed_ms: u32,
}

impl<P: InputPin> Button<P> {
    /// Create a button, sampling its current level as the stable state
    pub fn new(mut pin: P, debounce_ms: u32, now_ms: u32) -> Self {
        let pressed = pin.is_low();
        Self {
            pin,
            debounce_ms,
            pressed,
            changed_ms: now_ms,
        }
    }

    /// Panel button with the standard debounce window
    pub fn panel(pin: P, now_ms: u32) -> Self {
        Self::new(pin, BUTTON_DEBOUNCE_MS, now_ms)
    }

    /// Sample the pin
    ///
    /// Returns `true` exactly once per press, on the accepted high-to-low
    /// transition. Releases are tracked but never reported.
    pub fn poll(&mut self, now_ms: u32) -> bool {
        let pressed = self.pin.is_low();
        if pressed == self.pressed {
            return false;
        }
        if now_ms.wrapping_sub(self.changed_ms) < self.debounce_ms {
            return false;
        }

        self.pressed = pressed;
        self.changed_ms = now_ms;
        pressed
    }

    /// Debounced level
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Pin whose level is controlled from the test
    #[derive(Clone)]
    struct MockPin(Rc<Cell<bool>>);

    impl MockPin {
        fn released() -> Self {
            Self(Rc::new(Cell::new(true)))
        }

        fn set(&self, high: bool) {
            self.0.set(high);
        }
    }

    impl InputPin for MockPin {
        fn is_high(&mut self) -> bool {
            self.0.get()
        }
    }

    #[test]
    fn test_press_reported_once() {
        let pin = MockPin::released();
        let mut button = Button::panel(pin.clone(), 0);

        assert!(!button.poll(100));
        pin.set(false);
        assert!(button.poll(110));
        assert!(button.is_pressed());
        // Held down: no repeat
        assert!(!button.poll(200));
        assert!(!button.poll(1000));
    }

    #[test]
    fn test_release_not_reported() {
        let pin = MockPin::released();
        let mut button = Button::panel(pin.clone(), 0);
        pin.set(false);
        assert!(button.poll(100));
        pin.set(true);
        assert!(!button.poll(200));
        assert!(!button.is_pressed());
    }

    #[test]
    fn test_bounce_ignored() {
        let pin = MockPin::released();
        let mut button = Button::panel(pin.clone(), 0);

        pin.set(false);
        assert!(button.poll(100));

        // Contact bounce inside the window
        pin.set(true);
        assert!(!button.poll(105));
        pin.set(false);
        assert!(!button.poll(110));
        pin.set(true);
        assert!(!button.poll(120));

        // Release accepted after the window, next press after another
        assert!(!button.poll(145));
        assert!(!button.is_pressed());
        pin.set(false);
        assert!(!button.poll(160));
        assert!(button.poll(185));
    }

    #[test]
    fn test_held_at_boot_is_not_a_press() {
        let pin = MockPin::released();
        pin.set(false);
        let mut button = Button::panel(pin.clone(), 0);
        assert!(!button.poll(100));
        assert!(button.is_pressed());
    }

    #[test]
    fn test_switch_window() {
        let pin = MockPin::released();
        let mut button = Button::new(pin.clone(), SWITCH_DEBOUNCE_MS, 0);
        pin.set(false);
        assert!(!button.poll(29));
        assert!(button.poll(30));
    }

    #[test]
    fn test_debounce_across_rollover() {
        let pin = MockPin::released();
        let start = u32::MAX - 10;
        let mut button = Button::panel(pin.clone(), start);
        pin.set(false);
        assert!(!button.poll(start.wrapping_add(20)));
        assert!(button.poll(start.wrapping_add(40)));
    }
}
