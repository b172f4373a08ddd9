//! Time-of-day handling and the daily sleep window
//!
//! The device is only allowed to tap while the wall clock is inside the
//! configured wake window. Without a clock the answer is always "asleep".

pub mod time;
pub mod window;

pub use time::{TimeOfDay, MINUTES_PER_DAY};
pub use window::{is_awake, SleepSchedule};
