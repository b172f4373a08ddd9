//! Configuration types and compile-time limits
//!
//! Runtime settings are persisted in the EEPROM settings region as a
//! postcard-serialized record; everything else is fixed at build time.

pub mod types;

pub use types::*;
