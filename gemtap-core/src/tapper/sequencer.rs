//! Tap sequencer state machine
//!
//! All timestamps come from a free-running millisecond counter supplied by
//! the caller. Durations are always `now.wrapping_sub(start)`, so the
//! sequencer keeps working when the counter rolls over.

use crate::traits::Actuator;

/// Actuator group within a tap cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stage {
    /// First group (fired first)
    A,
    /// Second group
    B,
}

/// Sequencer phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// No cycle running, both outputs low
    Idle,
    /// Waiting out the low pause before the next tap of a stage
    Paused(Stage),
    /// Stage output held high for the tap duration
    Firing(Stage),
}

/// Parameters for one tap cycle
///
/// Built fresh from the current settings each time a cycle starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TapCycleSpec {
    /// Number of taps in stage A
    pub stage_a_taps: u8,
    /// Number of taps in stage B
    pub stage_b_taps: u8,
    /// How long each tap holds the output high (ms)
    pub tap_duration_ms: u16,
    /// Low time before every tap (ms)
    pub pause_ms: u16,
}

impl TapCycleSpec {
    /// Total number of taps in the cycle
    pub fn total_taps(&self) -> u16 {
        u16::from(self.stage_a_taps) + u16::from(self.stage_b_taps)
    }

    fn target(&self, stage: Stage) -> u8 {
        match stage {
            Stage::A => self.stage_a_taps,
            Stage::B => self.stage_b_taps,
        }
    }
}

/// Two-stage tap sequencer
///
/// Owns both actuators so that it alone decides when they are energized.
pub struct Tapper<A> {
    stage_a: A,
    stage_b: A,
    phase: Phase,
    spec: TapCycleSpec,
    /// Taps completed in the current stage
    tap_index: u8,
    /// Timestamp at which the current phase began
    phase_start_ms: u32,
}

impl<A: Actuator> Tapper<A> {
    /// Create an inert sequencer; both outputs are forced low
    pub fn new(stage_a: A, stage_b: A) -> Self {
        let mut tapper = Self {
            stage_a,
            stage_b,
            phase: Phase::Idle,
            spec: TapCycleSpec::default(),
            tap_index: 0,
            phase_start_ms: 0,
        };
        tapper.all_off();
        tapper
    }

    /// Start a new cycle, abandoning any cycle in progress
    ///
    /// Starts in stage A, or directly in stage B when stage A has no taps.
    /// With no taps at all the sequencer stays idle.
    pub fn start_cycle(&mut self, spec: TapCycleSpec, now_ms: u32) {
        self.all_off();
        self.spec = spec;
        self.tap_index = 0;
        self.phase_start_ms = now_ms;

        self.phase = if spec.stage_a_taps > 0 {
            Phase::Paused(Stage::A)
        } else if spec.stage_b_taps > 0 {
            Phase::Paused(Stage::B)
        } else {
            Phase::Idle
        };

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "Tap cycle start: {}+{} taps, {}ms/{}ms",
            spec.stage_a_taps,
            spec.stage_b_taps,
            spec.tap_duration_ms,
            spec.pause_ms
        );
    }

    /// Advance the sequence
    ///
    /// Call every loop tick. Returns `true` exactly once, on the tick the
    /// last tap of the cycle is released.
    pub fn update(&mut self, now_ms: u32) -> bool {
        let elapsed = now_ms.wrapping_sub(self.phase_start_ms);

        match self.phase {
            Phase::Idle => false,
            Phase::Paused(stage) => {
                if elapsed >= u32::from(self.spec.pause_ms) {
                    self.actuator(stage).set_on(true);
                    self.phase = Phase::Firing(stage);
                    self.phase_start_ms = now_ms;
                }
                false
            }
            Phase::Firing(stage) => {
                if elapsed < u32::from(self.spec.tap_duration_ms) {
                    return false;
                }

                self.actuator(stage).set_on(false);
                self.tap_index = self.tap_index.saturating_add(1);
                self.phase_start_ms = now_ms;

                if self.tap_index < self.spec.target(stage) {
                    self.phase = Phase::Paused(stage);
                    return false;
                }

                if stage == Stage::A && self.spec.stage_b_taps > 0 {
                    self.all_off();
                    self.tap_index = 0;
                    self.phase = Phase::Paused(Stage::B);
                    return false;
                }

                self.all_off();
                self.phase = Phase::Idle;

                #[cfg(feature = "defmt")]
                defmt::debug!("Tap cycle complete");

                true
            }
        }
    }

    /// Emergency stop: go idle with both outputs low, from any state
    pub fn stop(&mut self) {
        self.all_off();
        self.phase = Phase::Idle;
        self.tap_index = 0;
    }

    /// True while any stage is running
    pub fn is_active(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// True while stage A of an active cycle is running
    pub fn is_in_stage_a(&self) -> bool {
        matches!(self.phase, Phase::Paused(Stage::A) | Phase::Firing(Stage::A))
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Taps completed in the current stage
    pub fn tap_index(&self) -> u8 {
        self.tap_index
    }

    /// Parameters of the current (or last) cycle
    pub fn spec(&self) -> &TapCycleSpec {
        &self.spec
    }

    /// Stage A actuator
    pub fn stage_a(&self) -> &A {
        &self.stage_a
    }

    /// Stage B actuator
    pub fn stage_b(&self) -> &A {
        &self.stage_b
    }

    fn actuator(&mut self, stage: Stage) -> &mut A {
        match stage {
            Stage::A => &mut self.stage_a,
            Stage::B => &mut self.stage_b,
        }
    }

    fn all_off(&mut self) {
        self.stage_a.set_on(false);
        self.stage_b.set_on(false);
    }
}
