//! Front panel buttons

use gemtap_core::device::ButtonEvents;
use gemtap_hal::InputPin;

use super::button::Button;

/// The five dedicated panel buttons
pub struct Panel<P> {
    on_off: Button<P>,
    test_mode: Button<P>,
    tap_up: Button<P>,
    tap_down: Button<P>,
    override_sleep: Button<P>,
}

impl<P: InputPin> Panel<P> {
    pub fn new(
        on_off: P,
        test_mode: P,
        tap_up: P,
        tap_down: P,
        override_sleep: P,
        now_ms: u32,
    ) -> Self {
        Self {
            on_off: Button::panel(on_off, now_ms),
            test_mode: Button::panel(test_mode, now_ms),
            tap_up: Button::panel(tap_up, now_ms),
            tap_down: Button::panel(tap_down, now_ms),
            override_sleep: Button::panel(override_sleep, now_ms),
        }
    }

    /// Sample all buttons and collect this tick's press edges
    pub fn poll(&mut self, now_ms: u32) -> ButtonEvents {
        ButtonEvents {
            on_off: self.on_off.poll(now_ms),
            test_mode: self.test_mode.poll(now_ms),
            tap_up: self.tap_up.poll(now_ms),
            tap_down: self.tap_down.poll(now_ms),
            override_sleep: self.override_sleep.poll(now_ms),
        }
    }

    /// On/off and test mode both held down (checked at boot for a factory reset)
    pub fn factory_reset_held(&self) -> bool {
        self.on_off.is_pressed() && self.test_mode.is_pressed()
    }
}
