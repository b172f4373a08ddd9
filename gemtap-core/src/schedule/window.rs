//! Sleep window evaluation
//!
//! A schedule is a wake time and a sleep time. The awake interval is
//! `[wake, sleep)` and may cross midnight. Equal times mean "always awake",
//! since the schedule has no other way to express a full day.

use serde::{Deserialize, Serialize};

use super::time::{TimeOfDay, MINUTES_PER_DAY};

/// Daily wake/sleep schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SleepSchedule {
    /// Start of the awake interval
    pub wake: TimeOfDay,
    /// End of the awake interval (exclusive)
    pub sleep: TimeOfDay,
}

impl Default for SleepSchedule {
    fn default() -> Self {
        Self {
            wake: TimeOfDay::new(7, 30).unwrap_or(TimeOfDay::MIDNIGHT),
            sleep: TimeOfDay::new(23, 59).unwrap_or(TimeOfDay::MIDNIGHT),
        }
    }
}

impl SleepSchedule {
    /// Create a schedule from wake and sleep times
    pub const fn new(wake: TimeOfDay, sleep: TimeOfDay) -> Self {
        Self { wake, sleep }
    }

    /// Check whether `now` falls inside the awake interval
    pub fn is_awake_at(&self, now: TimeOfDay) -> bool {
        let wake = self.wake.minutes();
        let bed = self.sleep.minutes();
        let now = now.minutes();

        if wake < bed {
            // Ordinary daytime window
            now >= wake && now < bed
        } else if wake > bed {
            // Window crosses midnight
            now >= wake || now < bed
        } else {
            true
        }
    }
}

/// Check whether the device should be awake
///
/// `now_minutes` is minutes since midnight, or `None` when no time source is
/// available. Unknown time is treated as asleep, and so is any reading
/// outside `0..1440`.
pub fn is_awake(schedule: &SleepSchedule, now_minutes: Option<u16>) -> bool {
    match now_minutes {
        Some(minutes) if minutes < MINUTES_PER_DAY => match TimeOfDay::from_minutes(minutes) {
            Some(now) => schedule.is_awake_at(now),
            None => false,
        },
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn hm(hour: u8, minute: u8) -> TimeOfDay {
        TimeOfDay::new(hour, minute).unwrap()
    }

    #[test]
    fn test_default_schedule() {
        let schedule = SleepSchedule::default();
        assert_eq!(schedule.wake, hm(7, 30));
        assert_eq!(schedule.sleep, hm(23, 59));
    }

    #[test]
    fn test_daytime_window_edges() {
        let schedule = SleepSchedule::new(hm(7, 30), hm(23, 0));
        assert!(!is_awake(&schedule, Some(hm(7, 29).minutes())));
        assert!(is_awake(&schedule, Some(hm(7, 30).minutes())));
        assert!(is_awake(&schedule, Some(hm(22, 59).minutes())));
        assert!(!is_awake(&schedule, Some(hm(23, 0).minutes())));
    }

    #[test]
    fn test_window_crossing_midnight() {
        let schedule = SleepSchedule::new(hm(22, 0), hm(6, 0));
        assert!(is_awake(&schedule, Some(hm(23, 30).minutes())));
        assert!(is_awake(&schedule, Some(0)));
        assert!(is_awake(&schedule, Some(hm(5, 59).minutes())));
        assert!(!is_awake(&schedule, Some(hm(6, 0).minutes())));
        assert!(!is_awake(&schedule, Some(hm(12, 0).minutes())));
    }

    #[test]
    fn test_unavailable_clock_is_asleep() {
        let schedule = SleepSchedule::new(hm(0, 0), hm(0, 0));
        assert!(!is_awake(&schedule, None));
        assert!(!is_awake(&schedule, Some(MINUTES_PER_DAY)));
        assert!(!is_awake(&schedule, Some(u16::MAX)));
    }

    fn any_time() -> impl Strategy<Value = TimeOfDay> {
        (0u16..MINUTES_PER_DAY).prop_map(|m| TimeOfDay::from_minutes(m).unwrap())
    }

    proptest! {
        #[test]
        fn prop_ordinary_window_is_half_open(wake in any_time(), sleep in any_time(), now in 0u16..MINUTES_PER_DAY) {
            prop_assume!(wake < sleep);
            let schedule = SleepSchedule::new(wake, sleep);
            let expected = now >= wake.minutes() && now < sleep.minutes();
            prop_assert_eq!(is_awake(&schedule, Some(now)), expected);
        }

        #[test]
        fn prop_overnight_window_wraps(wake in any_time(), sleep in any_time(), now in 0u16..MINUTES_PER_DAY) {
            prop_assume!(wake > sleep);
            let schedule = SleepSchedule::new(wake, sleep);
            let expected = now >= wake.minutes() || now < sleep.minutes();
            prop_assert_eq!(is_awake(&schedule, Some(now)), expected);
        }

        #[test]
        fn prop_equal_times_always_awake(time in any_time(), now in 0u16..MINUTES_PER_DAY) {
            let schedule = SleepSchedule::new(time, time);
            prop_assert!(is_awake(&schedule, Some(now)));
        }
    }
}
