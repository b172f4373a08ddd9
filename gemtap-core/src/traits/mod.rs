//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod actuator;
pub mod clock;

pub use actuator::Actuator;
pub use clock::WallClock;
