//! Board-agnostic core logic for the tap automation firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (actuator, wall clock)
//! - Sleep window evaluation
//! - Two-stage tap sequencer
//! - Wear-leveled lifetime counter and settings persistence
//! - Menu engine (navigation, number and time editors)
//! - Device controller wiring menu actions into the components
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod device;
pub mod menu;
pub mod schedule;
pub mod store;
pub mod tapper;
pub mod traits;
