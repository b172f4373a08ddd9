//! Gemtap Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits that the board-agnostic
//! core and the drivers are written against. Board crates (the RP2040
//! firmware, host simulators, tests) provide the implementations.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (gemtap-firmware)          │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  gemtap-core  │       │gemtap-drivers │
//! └───────────────┘       └───────────────┘
//!         │                       │
//!         └───────────┬───────────┘
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  gemtap-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`eeprom::EepromStorage`] - Byte-addressable non-volatile storage

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod eeprom;
pub mod gpio;

// Re-export key traits at crate root for convenience
pub use eeprom::{EepromStorage, StorageError, ERASED_BYTE};
pub use gpio::{InputPin, OutputPin};
