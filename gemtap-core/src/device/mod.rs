//! Device controller and its runtime helpers

pub mod cadence;
pub mod controller;
pub mod input;
pub mod overlay;

pub use cadence::{Cadence, Jitter};
pub use controller::{Device, DeviceStatus};
pub use input::{ButtonEvents, EncoderInput};
pub use overlay::{Overlay, OverlayKind, OverlaySlot};
