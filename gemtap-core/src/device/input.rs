//! Per-tick input snapshot

/// Press edges from the physical buttons, gathered once per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEvents {
    pub on_off: bool,
    pub test_mode: bool,
    pub tap_up: bool,
    pub tap_down: bool,
    pub override_sleep: bool,
}

impl ButtonEvents {
    /// Check if any button was pressed
    pub fn any(&self) -> bool {
        self.on_off || self.test_mode || self.tap_up || self.tap_down || self.override_sleep
    }
}

/// Rotary encoder movement and switch edge since the last tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderInput {
    /// Signed detent count, positive clockwise
    pub delta: i32,
    /// Switch press edge
    pub pressed: bool,
}

impl EncoderInput {
    pub const fn new(delta: i32, pressed: bool) -> Self {
        Self { delta, pressed }
    }

    /// Check if this tick carries no input at all
    pub fn is_idle(&self) -> bool {
        self.delta == 0 && !self.pressed
    }
}
