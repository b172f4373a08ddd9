//! Cycle cadence: when the next tap cycle is due

use crate::config::ModeParams;

/// Deterministic random number generator (xorshift32)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Jitter {
    state: u32,
}

impl Jitter {
    /// Create a generator; a zero seed is replaced since xorshift sticks at 0
    pub const fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0x9E37_79B9 } else { seed },
        }
    }

    /// Next raw value
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Value in `[0, range)`, or 0 for an empty range
    pub fn below(&mut self, range: u32) -> u32 {
        if range == 0 {
            return 0;
        }
        self.next_u32() % range
    }
}

/// Countdown to the next tap cycle
///
/// Each countdown lasts `base + jitter` ms. Elapsed time is computed as
/// `now.wrapping_sub(start)`, so a rollover of the millisecond counter
/// does not disturb it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cadence {
    jitter: Jitter,
    start_ms: u32,
    interval_ms: u32,
}

impl Cadence {
    /// Cadence with the first countdown starting at `now_ms`
    pub fn new(seed: u32, params: &ModeParams, now_ms: u32) -> Self {
        let mut cadence = Self {
            jitter: Jitter::new(seed),
            start_ms: now_ms,
            interval_ms: 0,
        };
        cadence.reset(params, now_ms);
        cadence
    }

    /// Restart the countdown from `now_ms` with a freshly drawn interval
    pub fn reset(&mut self, params: &ModeParams, now_ms: u32) {
        self.start_ms = now_ms;
        self.interval_ms = params
            .base_interval_ms
            .saturating_add(self.jitter.below(params.jitter_range_ms));

        #[cfg(feature = "defmt")]
        defmt::debug!("Next cycle in {} ms", self.interval_ms);
    }

    /// Length of the current countdown (ms)
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Milliseconds until the next cycle, 0 once due
    pub fn remaining(&self, now_ms: u32) -> u32 {
        self.interval_ms
            .saturating_sub(now_ms.wrapping_sub(self.start_ms))
    }

    /// Check if the countdown has run out
    pub fn is_due(&self, now_ms: u32) -> bool {
        now_ms.wrapping_sub(self.start_ms) >= self.interval_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_seed_still_produces_values() {
        let mut jitter = Jitter::new(0);
        assert_ne!(jitter.next_u32(), 0);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Jitter::new(1234);
        let mut b = Jitter::new(1234);
        for _ in 0..16 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn test_below_empty_range() {
        let mut jitter = Jitter::new(5);
        assert_eq!(jitter.below(0), 0);
    }

    #[test]
    fn test_test_mode_has_fixed_interval() {
        let cadence = Cadence::new(42, &ModeParams::TEST, 0);
        assert_eq!(cadence.interval_ms(), 13_000);
        assert_eq!(cadence.remaining(0), 13_000);
        assert_eq!(cadence.remaining(3_000), 10_000);
        assert!(!cadence.is_due(12_999));
        assert!(cadence.is_due(13_000));
        assert_eq!(cadence.remaining(20_000), 0);
    }

    #[test]
    fn test_actual_interval_includes_jitter() {
        let mut cadence = Cadence::new(7, &ModeParams::ACTUAL, 0);
        for step in 0..50 {
            let interval = cadence.interval_ms();
            assert!((670_000..686_000).contains(&interval));
            cadence.reset(&ModeParams::ACTUAL, step * 1000);
        }
    }

    #[test]
    fn test_countdown_across_rollover() {
        let start = u32::MAX - 5_000;
        let cadence = Cadence::new(1, &ModeParams::TEST, start);
        let now = start.wrapping_add(10_000);
        assert!(now < start);
        assert_eq!(cadence.remaining(now), 3_000);
        assert!(!cadence.is_due(now));
        assert!(cadence.is_due(start.wrapping_add(13_000)));
    }

    proptest! {
        #[test]
        fn prop_jitter_stays_in_range(seed in any::<u32>(), range in 1u32..100_000) {
            let mut jitter = Jitter::new(seed);
            for _ in 0..8 {
                prop_assert!(jitter.below(range) < range);
            }
        }
    }
}
