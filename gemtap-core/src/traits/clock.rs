//! Wall clock trait

use crate::schedule::TimeOfDay;

/// Source of the current time of day
///
/// Typically a battery-backed RTC. A missing, unpowered or halted clock
/// reports `None`; callers treat that as "asleep".
pub trait WallClock {
    /// Read the current time of day
    fn now(&mut self) -> Option<TimeOfDay>;

    /// Read the current time as minutes since midnight
    fn now_minutes(&mut self) -> Option<u16> {
        self.now().map(|t| t.minutes())
    }
}
