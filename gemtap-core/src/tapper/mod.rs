//! Two-stage tap sequencer
//!
//! Drives the two actuators in timed bursts: every tap is a low pause
//! followed by a high pulse. Stage A runs to completion before stage B.

pub mod sequencer;

pub use sequencer::{Phase, Stage, TapCycleSpec, Tapper};
