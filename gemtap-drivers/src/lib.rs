//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in gemtap-core and gemtap-hal for the tapper hardware:
//!
//! - GPIO adapters from `embedded-hal` pins to gemtap-hal pins
//! - Solenoid outputs (MOSFET gate, active-high or active-low)
//! - Debounced buttons and a quadrature rotary encoder
//! - DS1307 real-time clock
//! - AT24Cxx I2C EEPROM and a RAM-backed EEPROM for tests and simulation
//! - Shared I2C bus for several devices on one peripheral

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bus;
pub mod eeprom;
pub mod gpio;
pub mod input;
pub mod rtc;
pub mod solenoid;

pub use bus::{SharedI2c, SharedI2cError};
pub use eeprom::{At24c, At24cConfig, RamStorage};
pub use gpio::{HalInput, HalOutput};
pub use input::{Button, Encoder, Panel, QuadratureDecoder};
pub use rtc::Ds1307;
pub use solenoid::Solenoid;
