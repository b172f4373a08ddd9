//! Configuration type definitions

use serde::{Deserialize, Serialize};

use crate::schedule::SleepSchedule;
use crate::tapper::TapCycleSpec;

/// Shortest allowed tap (ms)
pub const TAP_DURATION_MIN_MS: u16 = 1;

/// Longest allowed tap (ms)
pub const TAP_DURATION_MAX_MS: u16 = 1000;

/// Tap duration at first boot (ms)
pub const TAP_DURATION_DEFAULT_MS: u16 = 10;

/// Step applied by the tap up/down buttons (ms)
pub const TAP_NUDGE_MS: u16 = 1;

/// Smallest value accepted by the gem count editor
pub const GEM_COUNT_MIN: u32 = 0;

/// Largest value accepted by the gem count editor
pub const GEM_COUNT_MAX: u32 = 999_999_999;

/// Completed cycles accumulated in RAM before the counter is written back
pub const GEMS_PER_SAVE: u32 = 25;

/// Unit label for tap durations
pub const UNIT_MS: &str = "ms";

/// Unit label for gem counts
pub const UNIT_GEMS: &str = "gems";

/// Operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Production cadence
    #[default]
    Actual,
    /// Short cadence for bench testing
    Test,
}

impl Mode {
    /// Timing and tap counts for this mode
    pub const fn params(self) -> ModeParams {
        match self {
            Mode::Actual => ModeParams::ACTUAL,
            Mode::Test => ModeParams::TEST,
        }
    }

    /// The other mode
    pub const fn toggled(self) -> Self {
        match self {
            Mode::Actual => Mode::Test,
            Mode::Test => Mode::Actual,
        }
    }

    /// Check if this is test mode
    pub const fn is_test(self) -> bool {
        matches!(self, Mode::Test)
    }
}

/// Cadence and cycle shape for one operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeParams {
    /// Fixed part of the interval between cycles (ms)
    pub base_interval_ms: u32,
    /// Random extra interval, uniform in `0..jitter_range_ms` (ms)
    pub jitter_range_ms: u32,
    /// Low pause before each tap (ms)
    pub pause_ms: u16,
    /// Stage A taps per cycle
    pub stage_a_taps: u8,
    /// Stage B taps per cycle
    pub stage_b_taps: u8,
}

impl ModeParams {
    /// Production parameters: one cycle roughly every 11 minutes
    pub const ACTUAL: Self = Self {
        base_interval_ms: 670_000,
        jitter_range_ms: 16_000,
        pause_ms: 1250,
        stage_a_taps: 7,
        stage_b_taps: 10,
    };

    /// Bench test parameters
    pub const TEST: Self = Self {
        base_interval_ms: 13_000,
        jitter_range_ms: 0,
        pause_ms: 1000,
        stage_a_taps: 3,
        stage_b_taps: 3,
    };
}

/// Persisted device settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    /// Daily wake/sleep window
    pub schedule: SleepSchedule,
    /// Tap hold time (ms), kept within the tap limits
    pub tap_duration_ms: u16,
    /// Operating mode
    pub mode: Mode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schedule: SleepSchedule::default(),
            tap_duration_ms: TAP_DURATION_DEFAULT_MS,
            mode: Mode::Actual,
        }
    }
}

impl Settings {
    /// Set the tap duration, clamped to the allowed range
    pub fn set_tap_duration(&mut self, ms: u32) {
        self.tap_duration_ms = clamp_tap_duration(ms);
    }

    /// Nudge the tap duration by `steps` increments of [`TAP_NUDGE_MS`]
    pub fn nudge_tap_duration(&mut self, steps: i32) {
        let delta = i64::from(steps) * i64::from(TAP_NUDGE_MS);
        let target = (i64::from(self.tap_duration_ms) + delta).max(0);
        self.set_tap_duration(target.min(i64::from(u32::MAX)) as u32);
    }

    /// Cycle parameters for the current mode and tap duration
    pub fn cycle_spec(&self) -> TapCycleSpec {
        let params = self.mode.params();
        TapCycleSpec {
            stage_a_taps: params.stage_a_taps,
            stage_b_taps: params.stage_b_taps,
            tap_duration_ms: self.tap_duration_ms,
            pause_ms: params.pause_ms,
        }
    }

    /// Replace out-of-range fields with valid values
    pub fn sanitized(mut self) -> Self {
        self.tap_duration_ms = clamp_tap_duration(u32::from(self.tap_duration_ms));
        self
    }
}

/// Clamp a tap duration into `TAP_DURATION_MIN_MS..=TAP_DURATION_MAX_MS`
pub fn clamp_tap_duration(ms: u32) -> u16 {
    ms.clamp(
        u32::from(TAP_DURATION_MIN_MS),
        u32::from(TAP_DURATION_MAX_MS),
    ) as u16
}
