//! Display abstraction and shared renderer for Gemtap
//!
//! This crate provides:
//! - `DisplayBackend` trait for text-capable displays
//! - `Screen`, a character buffer sized for a 128x64 OLED with a 6x10 font
//! - `Renderer`, which turns the menu view, the device status and the active
//!   overlay into screen lines
//! - Number and time formatting helpers
//!
//! # Architecture
//!
//! The renderer never touches hardware and never mutates core state. The
//! firmware renders every tick and only pushes the screen to the display
//! when its content changed.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod backend;
pub mod format;
pub mod render;
pub mod screen;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use render::Renderer;
pub use screen::{Screen, SCREEN_COLS, SCREEN_ROWS};
