//! Wall-clock time of day with minute resolution

use serde::{Deserialize, Serialize};

/// Minutes in one day; minute-of-day values live in `0..MINUTES_PER_DAY`
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Hours in one day
pub const HOURS_PER_DAY: u8 = 24;

/// Minutes in one hour
pub const MINUTES_PER_HOUR: u8 = 60;

/// Hour and minute of a day
///
/// Always valid: hour in 0..=23, minute in 0..=59. The only ways to build one
/// are the checked constructors and the wrapping field adjusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(try_from = "(u8, u8)", into = "(u8, u8)")]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Midnight (00:00)
    pub const MIDNIGHT: Self = Self { hour: 0, minute: 0 };

    /// Create a time of day, or `None` if either field is out of range
    pub const fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < HOURS_PER_DAY && minute < MINUTES_PER_HOUR {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    /// Create from minutes since midnight, or `None` if `>= 1440`
    pub const fn from_minutes(minutes: u16) -> Option<Self> {
        if minutes < MINUTES_PER_DAY {
            Some(Self {
                hour: (minutes / 60) as u8,
                minute: (minutes % 60) as u8,
            })
        } else {
            None
        }
    }

    /// Hour field (0-23)
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    /// Minute field (0-59)
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// Minutes since midnight, always in `0..1440`
    pub const fn minutes(&self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }

    /// Move the hour by `delta`, wrapping 23 <-> 0; the minute is untouched
    pub fn wrapping_add_hours(self, delta: i32) -> Self {
        Self {
            hour: wrap_field(self.hour, delta, HOURS_PER_DAY),
            minute: self.minute,
        }
    }

    /// Move the minute by `delta`, wrapping 59 <-> 0; the hour is untouched
    pub fn wrapping_add_minutes(self, delta: i32) -> Self {
        Self {
            hour: self.hour,
            minute: wrap_field(self.minute, delta, MINUTES_PER_HOUR),
        }
    }
}

fn wrap_field(value: u8, delta: i32, modulus: u8) -> u8 {
    (i64::from(value) + i64::from(delta)).rem_euclid(i64::from(modulus)) as u8
}

impl TryFrom<(u8, u8)> for TimeOfDay {
    type Error = &'static str;

    fn try_from((hour, minute): (u8, u8)) -> Result<Self, Self::Error> {
        Self::new(hour, minute).ok_or("time of day out of range")
    }
}

impl From<TimeOfDay> for (u8, u8) {
    fn from(time: TimeOfDay) -> Self {
        (time.hour, time.minute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_constructors() {
        assert!(TimeOfDay::new(23, 59).is_some());
        assert!(TimeOfDay::new(24, 0).is_none());
        assert!(TimeOfDay::new(0, 60).is_none());
        assert_eq!(TimeOfDay::from_minutes(0), Some(TimeOfDay::MIDNIGHT));
        assert_eq!(TimeOfDay::from_minutes(1439), TimeOfDay::new(23, 59));
        assert!(TimeOfDay::from_minutes(MINUTES_PER_DAY).is_none());
    }

    #[test]
    fn test_minutes_since_midnight() {
        let t = TimeOfDay::new(7, 30).unwrap();
        assert_eq!(t.minutes(), 450);
    }

    #[test]
    fn test_hour_wraps_without_touching_minute() {
        let t = TimeOfDay::new(23, 59).unwrap();
        let next = t.wrapping_add_hours(1);
        assert_eq!((next.hour(), next.minute()), (0, 59));
        let back = next.wrapping_add_hours(-1);
        assert_eq!(back, t);
    }

    #[test]
    fn test_minute_wraps_without_touching_hour() {
        let t = TimeOfDay::new(23, 59).unwrap();
        let next = t.wrapping_add_minutes(1);
        assert_eq!((next.hour(), next.minute()), (23, 0));
        assert_eq!(TimeOfDay::MIDNIGHT.wrapping_add_minutes(-1).minute(), 59);
    }

    #[test]
    fn test_large_deltas_wrap() {
        let t = TimeOfDay::MIDNIGHT.wrapping_add_hours(24 * 3 + 5);
        assert_eq!(t.hour(), 5);
        let t = TimeOfDay::MIDNIGHT.wrapping_add_minutes(-121);
        assert_eq!(t.minute(), 59);
    }

    #[test]
    fn test_serde_rejects_invalid_fields() {
        let mut buf = [0u8; 8];
        let bytes = postcard::to_slice(&(25u8, 0u8), &mut buf).unwrap();
        assert!(postcard::from_bytes::<TimeOfDay>(bytes).is_err());
    }
}
