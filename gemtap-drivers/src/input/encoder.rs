//! Rotary encoder with push switch
//!
//! Decodes quadrature encoder signals into signed detent counts. Uses a
//! state machine for reliable decoding with noise rejection.

use gemtap_core::device::EncoderInput;
use gemtap_hal::InputPin;

use super::button::{Button, SWITCH_DEBOUNCE_MS};

/// Decoder state machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum State {
    Idle,
    CwStep1,
    CwStep2,
    CcwStep1,
    CcwStep2,
}

/// Quadrature decoder
///
/// Quadrature encoding (A and B idle high with pull-ups):
/// CW:  A leads B (A falls first when rotating clockwise)
/// CCW: B leads A
///
/// State transitions for CW rotation:
/// Idle (1,1) -> CwStep1 (0,1) -> CwStep2 (0,0) -> +1 -> Idle
///
/// State transitions for CCW rotation:
/// Idle (1,1) -> CcwStep1 (1,0) -> CcwStep2 (0,0) -> -1 -> Idle
///
/// Returning to (1,1) before both lines went low is bounce and counts
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QuadratureDecoder {
    state: State,
    last: (bool, bool),
}

impl Default for QuadratureDecoder {
    fn default() -> Self {
        Self::new(true, true)
    }
}

impl QuadratureDecoder {
    /// Create a decoder seeded with the current line levels
    pub const fn new(a: bool, b: bool) -> Self {
        Self {
            state: State::Idle,
            last: (a, b),
        }
    }

    /// Feed a sample of both lines
    ///
    /// Returns +1 for a completed clockwise detent, -1 for counter-clockwise,
    /// 0 otherwise.
    pub fn update(&mut self, a: bool, b: bool) -> i8 {
        if (a, b) == self.last {
            return 0;
        }
        self.last = (a, b);

        match self.state {
            State::Idle => {
                if !a && b {
                    // A fell first -> CW direction
                    self.state = State::CwStep1;
                } else if a && !b {
                    // B fell first -> CCW direction
                    self.state = State::CcwStep1;
                }
                0
            }
            State::CwStep1 => {
                if !a && !b {
                    self.state = State::CwStep2;
                } else if a && b {
                    self.state = State::Idle;
                }
                0
            }
            State::CwStep2 => {
                if a || b {
                    self.state = State::Idle;
                    return 1;
                }
                0
            }
            State::CcwStep1 => {
                if !a && !b {
                    self.state = State::CcwStep2;
                } else if a && b {
                    self.state = State::Idle;
                }
                0
            }
            State::CcwStep2 => {
                if a || b {
                    self.state = State::Idle;
                    return -1;
                }
                0
            }
        }
    }
}

/// Rotary encoder: two quadrature lines plus a push switch
pub struct Encoder<A, B, S> {
    a: A,
    b: B,
    switch: Button<S>,
    decoder: QuadratureDecoder,
    /// Swap rotation direction for encoders wired the other way round
    reversed: bool,
}

impl<A: InputPin, B: InputPin, S: InputPin> Encoder<A, B, S> {
    pub fn new(mut a: A, mut b: B, switch: S, now_ms: u32) -> Self {
        let decoder = QuadratureDecoder::new(a.is_high(), b.is_high());
        Self {
            a,
            b,
            switch: Button::new(switch, SWITCH_DEBOUNCE_MS, now_ms),
            decoder,
            reversed: false,
        }
    }

    /// Invert the rotation direction
    pub fn reversed(mut self) -> Self {
        self.reversed = !self.reversed;
        self
    }

    /// Sample the encoder
    ///
    /// Call frequently (every 1-5 ms) so no quadrature state is skipped.
    pub fn poll(&mut self, now_ms: u32) -> EncoderInput {
        let step = self.decoder.update(self.a.is_high(), self.b.is_high());
        let delta = if self.reversed { -step } else { step };
        EncoderInput::new(i32::from(delta), self.switch.poll(now_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    const CW: [(bool, bool); 4] = [(false, true), (false, false), (true, false), (true, true)];
    const CCW: [(bool, bool); 4] = [(true, false), (false, false), (false, true), (true, true)];

    fn feed(decoder: &mut QuadratureDecoder, samples: &[(bool, bool)]) -> i32 {
        samples
            .iter()
            .map(|&(a, b)| i32::from(decoder.update(a, b)))
            .sum()
    }

    #[test]
    fn test_clockwise_detent() {
        let mut decoder = QuadratureDecoder::default();
        assert_eq!(feed(&mut decoder, &CW), 1);
    }

    #[test]
    fn test_counter_clockwise_detent() {
        let mut decoder = QuadratureDecoder::default();
        assert_eq!(feed(&mut decoder, &CCW), -1);
    }

    #[test]
    fn test_several_detents() {
        let mut decoder = QuadratureDecoder::default();
        let mut total = 0;
        for _ in 0..3 {
            total += feed(&mut decoder, &CW);
        }
        total += feed(&mut decoder, &CCW);
        assert_eq!(total, 2);
    }

    #[test]
    fn test_bounce_rejected() {
        let mut decoder = QuadratureDecoder::default();
        // A glitches low and back without B following
        assert_eq!(
            feed(&mut decoder, &[(false, true), (true, true), (false, true), (true, true)]),
            0
        );
        // A full detent still counts afterwards
        assert_eq!(feed(&mut decoder, &CW), 1);
    }

    #[test]
    fn test_repeated_samples_ignored() {
        let mut decoder = QuadratureDecoder::default();
        assert_eq!(
            feed(
                &mut decoder,
                &[(false, true), (false, true), (false, false), (false, false), (true, false)]
            ),
            1
        );
    }

    #[derive(Clone)]
    struct MockPin(Rc<Cell<bool>>);

    impl MockPin {
        fn high() -> Self {
            Self(Rc::new(Cell::new(true)))
        }
    }

    impl InputPin for MockPin {
        fn is_high(&mut self) -> bool {
            self.0.get()
        }
    }

    #[test]
    fn test_encoder_reports_delta_and_press() {
        let (a, b, sw) = (MockPin::high(), MockPin::high(), MockPin::high());
        let mut encoder = Encoder::new(a.clone(), b.clone(), sw.clone(), 0);

        let mut delta = 0;
        for (i, &(la, lb)) in CW.iter().enumerate() {
            a.0.set(la);
            b.0.set(lb);
            delta += encoder.poll(i as u32).delta;
        }
        assert_eq!(delta, 1);

        sw.0.set(false);
        let input = encoder.poll(100);
        assert!(input.pressed);
        assert_eq!(input.delta, 0);
        assert!(encoder.poll(105).is_idle());
    }

    #[test]
    fn test_reversed_encoder() {
        let (a, b, sw) = (MockPin::high(), MockPin::high(), MockPin::high());
        let mut encoder = Encoder::new(a.clone(), b.clone(), sw, 0).reversed();

        let mut delta = 0;
        for &(la, lb) in CW.iter() {
            a.0.set(la);
            b.0.set(lb);
            delta += encoder.poll(0).delta;
        }
        assert_eq!(delta, -1);
    }

    proptest::proptest! {
        #[test]
        fn test_clean_detents_counted_exactly(
            turns in proptest::collection::vec((proptest::bool::ANY, 1usize..4), 0..40)
        ) {
            let mut decoder = QuadratureDecoder::default();
            let mut expected = 0i32;
            let mut total = 0i32;
            for (clockwise, repeat) in turns {
                let cycle = if clockwise { CW } else { CCW };
                expected += if clockwise { 1 } else { -1 };
                for sample in cycle {
                    for _ in 0..repeat {
                        total += feed(&mut decoder, &[sample]);
                    }
                }
            }
            proptest::prop_assert_eq!(total, expected);
        }
    }
}
