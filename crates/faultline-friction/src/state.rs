//! Per-vertex slip history and the no-heal state transition.

use crate::law::ParamRecord;
use smallvec::SmallVec;

/// Slip rate threshold below which sliding is considered to have stopped.
///
/// Exactly zero: any negative rate resets the cumulative slip.
pub const RESET_TOLERANCE: f64 = 0.0;

/// Slip history at one vertex.
///
/// Written only by [`SlipState::advance`], once per converged time step.
/// Friction evaluation during the nonlinear solve reads it but never
/// mutates it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SlipState {
    /// Slip distance accumulated since sliding last stopped.
    pub cumulative_slip: f64,
    /// Total slip at the last accepted time step.
    pub previous_slip: f64,
}

/// Which branch a state transition took.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// Slip rate was non-negative; the slip increment was accumulated.
    Accumulated,
    /// Slip rate was negative; cumulative slip was discarded.
    Reset,
}

impl SlipState {
    /// Create a state from its two components.
    pub fn new(cumulative_slip: f64, previous_slip: f64) -> Self {
        Self {
            cumulative_slip,
            previous_slip,
        }
    }

    /// Slip distance `D` seen by a trial evaluation at total slip `slip`.
    ///
    /// This is the stored cumulative slip plus the increment since the
    /// last accepted step; the stored value itself is left untouched.
    #[inline]
    pub fn slip_distance(&self, slip: f64) -> f64 {
        self.cumulative_slip + (slip - self.previous_slip).abs()
    }

    /// Advance to the next time step after `slip` has been accepted.
    pub fn advance(&mut self, slip: f64, slip_rate: f64) -> Advance {
        if slip_rate >= RESET_TOLERANCE {
            self.cumulative_slip += (slip - self.previous_slip).abs();
            self.previous_slip = slip;
            Advance::Accumulated
        } else {
            // Sliding has stopped.
            self.previous_slip = slip;
            self.cumulative_slip = 0.0;
            Advance::Reset
        }
    }
}

impl ParamRecord for SlipState {
    fn from_values(values: &[f64]) -> Self {
        Self {
            cumulative_slip: values[0],
            previous_slip: values[1],
        }
    }

    fn to_values(&self) -> SmallVec<[f64; 8]> {
        SmallVec::from_slice(&[self.cumulative_slip, self.previous_slip])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn negative_rate_resets() {
        let mut s = SlipState::new(0.05, 0.0);
        assert_eq!(s.advance(0.05, -1e-6), Advance::Reset);
        assert_eq!(s, SlipState::new(0.0, 0.05));
    }

    #[test]
    fn positive_rate_accumulates() {
        let mut s = SlipState::new(0.05, 0.0);
        assert_eq!(s.advance(0.08, 1e-6), Advance::Accumulated);
        assert_eq!(s.previous_slip, 0.08);
        assert!((s.cumulative_slip - 0.13).abs() < 1e-15);
    }

    #[test]
    fn zero_rate_is_not_a_reset() {
        let mut s = SlipState::new(0.2, 0.1);
        assert_eq!(s.advance(0.1, 0.0), Advance::Accumulated);
        assert_eq!(s, SlipState::new(0.2, 0.1));
    }

    #[test]
    fn backward_increment_still_accumulates_magnitude() {
        let mut s = SlipState::new(0.0, 0.3);
        s.advance(0.1, 0.0);
        assert!((s.cumulative_slip - 0.2).abs() < 1e-15);
        assert_eq!(s.previous_slip, 0.1);
    }

    #[test]
    fn slip_distance_does_not_mutate() {
        let s = SlipState::new(0.05, 0.02);
        assert!((s.slip_distance(0.07) - 0.10).abs() < 1e-15);
        assert!((s.slip_distance(-0.03) - 0.10).abs() < 1e-15);
        assert_eq!(s, SlipState::new(0.05, 0.02));
    }

    #[test]
    fn value_layout_matches_descriptor_order() {
        let s = SlipState::new(1.5, -2.0);
        assert_eq!(s.to_values().as_slice(), &[1.5, -2.0]);
        assert_eq!(SlipState::from_values(&[1.5, -2.0]), s);
    }

    proptest! {
        #[test]
        fn cumulative_never_negative(
            steps in prop::collection::vec((-1.0f64..1.0, -1.0f64..1.0), 1..50)
        ) {
            let mut s = SlipState::default();
            for (slip, rate) in steps {
                s.advance(slip, rate);
                prop_assert!(s.cumulative_slip >= 0.0);
                prop_assert_eq!(s.previous_slip, slip);
            }
        }

        #[test]
        fn accumulation_matches_trial_distance(
            cum in 0.0f64..1.0,
            prev in -1.0f64..1.0,
            slip in -1.0f64..1.0,
            rate in 0.0f64..1.0,
        ) {
            let mut s = SlipState::new(cum, prev);
            let trial = s.slip_distance(slip);
            s.advance(slip, rate);
            prop_assert_eq!(s.cumulative_slip, trial);
        }
    }
}
