//! EEPROM storage implementations

pub mod at24c;
pub mod ram;

pub use at24c::{At24c, At24cConfig};
pub use ram::RamStorage;
