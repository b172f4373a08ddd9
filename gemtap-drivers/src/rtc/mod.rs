//! Real-time clocks

pub mod ds1307;

pub use ds1307::{Ds1307, DS1307_ADDR};
