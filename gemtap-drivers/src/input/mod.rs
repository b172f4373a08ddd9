//! Operator inputs: panel buttons and the rotary encoder

pub mod button;
pub mod encoder;
pub mod panel;

pub use button::{Button, BUTTON_DEBOUNCE_MS, SWITCH_DEBOUNCE_MS};
pub use encoder::{Encoder, QuadratureDecoder};
pub use panel::Panel;
