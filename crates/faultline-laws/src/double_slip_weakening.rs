//! Double slip-weakening friction without healing.
//!
//! The friction coefficient drops linearly from `mu_s` to `mu_t` over the
//! first `D_t` of slip, then linearly from `mu_t` to `mu_d` until `D_f`,
//! and stays at `mu_d` beyond:
//!
//! ```text
//!        | mu_s - (mu_s - mu_t) * D / D_t                     D < D_t
//! mu  =  | mu_t - (mu_t - mu_d) * (D - D_t) / (D_f - D_t)     D_t <= D < D_f
//!        | mu_d                                               D >= D_f
//! ```
//!
//! `mu` is continuous at both breakpoints; its slope is not. The slip
//! derivative is therefore piecewise constant with jumps at `D_t` and `D_f`.

use crate::fields;
use faultline_core::{DecodeError, Metadata, Requirement};
use faultline_friction::{FrictionLaw, ParamRecord, SlipSample, SlipState};
use smallvec::SmallVec;

/// Decoded properties of one vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DoubleSlipWeakeningProperties {
    /// Static coefficient `mu_s`.
    pub static_coefficient: f64,
    /// Transition coefficient `mu_t`.
    pub transition_coefficient: f64,
    /// Dynamic coefficient `mu_d`.
    pub dynamic_coefficient: f64,
    /// Transition slip distance `D_t`.
    pub transition_slip_distance: f64,
    /// Final slip distance `D_f`.
    pub final_slip_distance: f64,
    /// Cohesion.
    pub cohesion: f64,
}

impl ParamRecord for DoubleSlipWeakeningProperties {
    fn from_values(values: &[f64]) -> Self {
        Self {
            static_coefficient: values[0],
            transition_coefficient: values[1],
            dynamic_coefficient: values[2],
            transition_slip_distance: values[3],
            final_slip_distance: values[4],
            cohesion: values[5],
        }
    }

    fn to_values(&self) -> SmallVec<[f64; 8]> {
        SmallVec::from_slice(&[
            self.static_coefficient,
            self.transition_coefficient,
            self.dynamic_coefficient,
            self.transition_slip_distance,
            self.final_slip_distance,
            self.cohesion,
        ])
    }
}

/// Which linear piece of the weakening curve a slip distance falls on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Segment {
    StaticToTransition,
    TransitionToDynamic,
    Dynamic,
}

/// Double slip-weakening friction law, no healing.
#[derive(Clone, Copy, Debug, Default)]
pub struct DoubleSlipWeakening;

impl DoubleSlipWeakening {
    /// Model name used by the factory.
    pub const NAME: &'static str = "DoubleSlipWeakeningFrictionNoHeal";

    /// Friction coefficient at slip distance `distance`.
    pub fn coefficient(props: &DoubleSlipWeakeningProperties, distance: f64) -> f64 {
        let p = props;
        match Self::segment(p, distance) {
            Segment::StaticToTransition => {
                p.static_coefficient
                    - (p.static_coefficient - p.transition_coefficient) * distance
                        / p.transition_slip_distance
            }
            Segment::TransitionToDynamic => {
                p.transition_coefficient
                    - (p.transition_coefficient - p.dynamic_coefficient)
                        * (distance - p.transition_slip_distance)
                        / (p.final_slip_distance - p.transition_slip_distance)
            }
            Segment::Dynamic => p.dynamic_coefficient,
        }
    }

    fn segment(p: &DoubleSlipWeakeningProperties, distance: f64) -> Segment {
        if distance < p.transition_slip_distance {
            Segment::StaticToTransition
        } else if distance < p.final_slip_distance {
            Segment::TransitionToDynamic
        } else {
            Segment::Dynamic
        }
    }
}

impl FrictionLaw for DoubleSlipWeakening {
    type Properties = DoubleSlipWeakeningProperties;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn metadata(&self) -> &'static Metadata {
        &fields::DOUBLE_SLIP_WEAKENING
    }

    fn decode_properties(&self, raw: &[f64]) -> Result<Self::Properties, DecodeError> {
        self.metadata().check_properties_arity(raw.len())?;
        Ok(DoubleSlipWeakeningProperties {
            static_coefficient: Requirement::Positive.check(fields::STATIC_COEFFICIENT, raw[0])?,
            transition_coefficient: Requirement::Positive
                .check(fields::TRANSITION_COEFFICIENT, raw[1])?,
            dynamic_coefficient: Requirement::Positive.check(fields::DYNAMIC_COEFFICIENT, raw[2])?,
            transition_slip_distance: Requirement::Positive
                .check(fields::TRANSITION_SLIP_DISTANCE, raw[3])?,
            final_slip_distance: Requirement::Positive.check(fields::FINAL_SLIP_DISTANCE, raw[4])?,
            cohesion: Requirement::NonNegative.check(fields::COHESION, raw[5])?,
        })
    }

    fn friction(&self, sample: &SlipSample, props: &Self::Properties, state: &SlipState) -> f64 {
        if !sample.in_compression() {
            return props.cohesion;
        }
        let distance = state.slip_distance(sample.slip);
        -Self::coefficient(props, distance) * sample.normal_traction + props.cohesion
    }

    fn friction_deriv(
        &self,
        sample: &SlipSample,
        props: &Self::Properties,
        state: &SlipState,
    ) -> f64 {
        if !sample.in_compression() {
            return 0.0;
        }
        let p = props;
        let n = sample.normal_traction;
        match Self::segment(p, state.slip_distance(sample.slip)) {
            Segment::StaticToTransition => {
                n * (p.static_coefficient - p.transition_coefficient) / p.transition_slip_distance
            }
            Segment::TransitionToDynamic => {
                n * (p.transition_coefficient - p.dynamic_coefficient)
                    / (p.final_slip_distance - p.transition_slip_distance)
            }
            Segment::Dynamic => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faultline_core::Nondimensional;
    use faultline_test_utils::fixtures::DOUBLE_SLIP_WEAKENING_RAW;
    use faultline_test_utils::{assert_close, central_difference};
    use proptest::prelude::*;

    fn props() -> DoubleSlipWeakeningProperties {
        DoubleSlipWeakening
            .decode_properties(&DOUBLE_SLIP_WEAKENING_RAW)
            .unwrap()
    }

    fn sample(slip: f64, normal_traction: f64) -> SlipSample {
        SlipSample::new(0.0, slip, 0.0, normal_traction)
    }

    // ── Decode ──────────────────────────────────────────────────────

    #[test]
    fn decode_maps_fields_in_order() {
        let p = props();
        assert_eq!(p.static_coefficient, 0.6);
        assert_eq!(p.transition_coefficient, 0.4);
        assert_eq!(p.dynamic_coefficient, 0.2);
        assert_eq!(p.transition_slip_distance, 0.1);
        assert_eq!(p.final_slip_distance, 0.5);
        assert_eq!(p.cohesion, 0.0);
    }

    #[test]
    fn decode_rejects_non_positive_fields() {
        let names = [
            "static_coefficient",
            "transition_coefficient",
            "dynamic_coefficient",
            "transition_slip_distance",
            "final_slip_distance",
        ];
        for (i, &name) in names.iter().enumerate() {
            for bad in [0.0, -0.1] {
                let mut raw = DOUBLE_SLIP_WEAKENING_RAW;
                raw[i] = bad;
                let err = DoubleSlipWeakening.decode_properties(&raw).unwrap_err();
                assert_eq!(
                    err,
                    DecodeError::InvalidParameter {
                        name,
                        value: bad,
                        requirement: Requirement::Positive,
                    }
                );
            }
        }
    }

    #[test]
    fn decode_cohesion_zero_ok_negative_rejected() {
        let mut raw = DOUBLE_SLIP_WEAKENING_RAW;
        raw[5] = 0.0;
        assert!(DoubleSlipWeakening.decode_properties(&raw).is_ok());
        raw[5] = -1.0;
        assert!(matches!(
            DoubleSlipWeakening.decode_properties(&raw),
            Err(DecodeError::InvalidParameter {
                name: "cohesion",
                ..
            })
        ));
    }

    #[test]
    fn decode_rejects_wrong_arity() {
        assert!(matches!(
            DoubleSlipWeakening.decode_properties(&DOUBLE_SLIP_WEAKENING_RAW[..5]),
            Err(DecodeError::Arity {
                expected: 6,
                got: 5,
                ..
            })
        ));
        assert!(matches!(
            DoubleSlipWeakening.decode_state(&[0.0]),
            Err(DecodeError::Arity {
                expected: 2,
                got: 1,
                ..
            })
        ));
    }

    // ── Scaling ─────────────────────────────────────────────────────

    #[test]
    fn nondimensionalize_scales_only_distances_and_cohesion() {
        let n = Nondimensional::new(0.1, 1.0, 1.0e6).unwrap();
        let mut raw = DOUBLE_SLIP_WEAKENING_RAW;
        raw[5] = 2.0e6;
        let p = DoubleSlipWeakening.decode_properties(&raw).unwrap();
        let nd = DoubleSlipWeakening.nondimensionalize_properties(&p, &n);
        assert_eq!(nd.static_coefficient, 0.6);
        assert_eq!(nd.transition_coefficient, 0.4);
        assert_eq!(nd.dynamic_coefficient, 0.2);
        assert_close(nd.transition_slip_distance, 1.0, 1e-12);
        assert_close(nd.final_slip_distance, 5.0, 1e-12);
        assert_close(nd.cohesion, 2.0, 1e-12);

        let back = DoubleSlipWeakening.dimensionalize_properties(&nd, &n);
        assert_close(back.transition_slip_distance, 0.1, 1e-12);
        assert_close(back.final_slip_distance, 0.5, 1e-12);
        assert_close(back.cohesion, 2.0e6, 1e-12);
    }

    #[test]
    fn state_scales_by_length() {
        let n = Nondimensional::new(2.0, 1.0, 1.0).unwrap();
        let s = DoubleSlipWeakening.decode_state(&[0.5, -1.0]).unwrap();
        let nd = DoubleSlipWeakening.nondimensionalize_state(&s, &n);
        assert_eq!(nd, SlipState::new(0.25, -0.5));
        assert_eq!(DoubleSlipWeakening.dimensionalize_state(&nd, &n), s);
    }

    // ── Friction ────────────────────────────────────────────────────

    #[test]
    fn first_segment_example() {
        let f = DoubleSlipWeakening.friction(&sample(0.05, -10.0), &props(), &SlipState::default());
        assert_close(f, 5.0, 1e-12);
    }

    #[test]
    fn second_segment_value() {
        // D = 0.3: mu = 0.4 - 0.2 * 0.2 / 0.4 = 0.3
        let f = DoubleSlipWeakening.friction(&sample(0.3, -10.0), &props(), &SlipState::default());
        assert_close(f, 3.0, 1e-12);
    }

    #[test]
    fn dynamic_beyond_final_distance() {
        let p = props();
        for slip in [0.5, 0.75, 10.0] {
            let s = sample(slip, -10.0);
            let state = SlipState::default();
            assert_close(DoubleSlipWeakening.friction(&s, &p, &state), 2.0, 1e-12);
            assert_eq!(DoubleSlipWeakening.friction_deriv(&s, &p, &state), 0.0);
        }
    }

    #[test]
    fn slip_distance_includes_stored_cumulative_slip() {
        // cum 0.08 + |0.02 - 0.0| = 0.1 -> exactly at D_t, mu = mu_t
        let state = SlipState::new(0.08, 0.0);
        let f = DoubleSlipWeakening.friction(&sample(0.02, -10.0), &props(), &state);
        assert_close(f, 4.0, 1e-12);
    }

    #[test]
    fn backward_slip_also_weakens() {
        let state = SlipState::new(0.0, 0.1);
        let f = DoubleSlipWeakening.friction(&sample(0.05, -10.0), &props(), &state);
        assert_close(f, 5.0, 1e-12);
    }

    #[test]
    fn cohesion_added_in_compression() {
        let mut raw = DOUBLE_SLIP_WEAKENING_RAW;
        raw[5] = 1.5;
        let p = DoubleSlipWeakening.decode_properties(&raw).unwrap();
        let f = DoubleSlipWeakening.friction(&sample(0.05, -10.0), &p, &SlipState::default());
        assert_close(f, 6.5, 1e-12);
    }

    #[test]
    fn zero_normal_traction_counts_as_compression() {
        let mut raw = DOUBLE_SLIP_WEAKENING_RAW;
        raw[5] = 0.7;
        let p = DoubleSlipWeakening.decode_properties(&raw).unwrap();
        let s = sample(0.05, 0.0);
        assert_eq!(DoubleSlipWeakening.friction(&s, &p, &SlipState::default()), 0.7);
        // In compression the derivative is the (zero) traction times the slope.
        assert_eq!(
            DoubleSlipWeakening.friction_deriv(&s, &p, &SlipState::default()),
            0.0
        );
    }

    #[test]
    fn continuous_at_breakpoints() {
        let p = props();
        let at_transition = p.static_coefficient
            - (p.static_coefficient - p.transition_coefficient) * p.transition_slip_distance
                / p.transition_slip_distance;
        assert_close(
            DoubleSlipWeakening::coefficient(&p, p.transition_slip_distance),
            at_transition,
            1e-12,
        );
        assert_close(
            DoubleSlipWeakening::coefficient(&p, p.final_slip_distance - 1e-12),
            p.dynamic_coefficient,
            1e-9,
        );
        assert_eq!(
            DoubleSlipWeakening::coefficient(&p, p.final_slip_distance),
            p.dynamic_coefficient
        );
    }

    // ── Derivative ──────────────────────────────────────────────────

    #[test]
    fn derivative_per_segment() {
        let p = props();
        let state = SlipState::default();
        // N * (mu_s - mu_t) / D_t = -10 * 0.2 / 0.1
        assert_close(
            DoubleSlipWeakening.friction_deriv(&sample(0.05, -10.0), &p, &state),
            -20.0,
            1e-12,
        );
        // N * (mu_t - mu_d) / (D_f - D_t) = -10 * 0.2 / 0.4
        assert_close(
            DoubleSlipWeakening.friction_deriv(&sample(0.3, -10.0), &p, &state),
            -5.0,
            1e-12,
        );
    }

    #[test]
    fn derivative_matches_finite_difference_inside_segments() {
        let p = props();
        let state = SlipState::new(0.01, 0.02);
        for slip in [0.04, 0.07, 0.2, 0.4, 0.8] {
            let analytic =
                DoubleSlipWeakening.friction_deriv(&sample(slip, -7.0), &p, &state);
            let numeric = central_difference(
                |x| DoubleSlipWeakening.friction(&sample(x, -7.0), &p, &state),
                slip,
                1e-7,
            );
            assert_close(analytic, numeric, 1e-5);
        }
    }

    #[test]
    fn evaluation_leaves_state_untouched() {
        let p = props();
        let state = SlipState::new(0.03, 0.01);
        for slip in [0.0, 0.05, 0.3] {
            DoubleSlipWeakening.friction(&sample(slip, -1.0), &p, &state);
            DoubleSlipWeakening.friction_deriv(&sample(slip, -1.0), &p, &state);
        }
        assert_eq!(state, SlipState::new(0.03, 0.01));
    }

    // ── State ───────────────────────────────────────────────────────

    #[test]
    fn update_state_resets_on_negative_rate() {
        let mut state = SlipState::new(0.05, 0.0);
        let s = SlipSample::new(1.0, 0.05, -1e-6, -10.0);
        DoubleSlipWeakening.update_state(&s, &mut state, &props());
        assert_eq!(state, SlipState::new(0.0, 0.05));
    }

    #[test]
    fn update_state_accumulates_on_positive_rate() {
        let mut state = SlipState::new(0.05, 0.0);
        let s = SlipSample::new(1.0, 0.08, 1e-6, -10.0);
        DoubleSlipWeakening.update_state(&s, &mut state, &props());
        assert_eq!(state.previous_slip, 0.08);
        assert_close(state.cumulative_slip, 0.13, 1e-12);
    }

    fn arb_props() -> impl Strategy<Value = DoubleSlipWeakeningProperties> {
        (
            0.01f64..1.0,
            0.01f64..1.0,
            0.01f64..1.0,
            0.001f64..1.0,
            0.001f64..1.0,
            0.0f64..10.0,
        )
            .prop_map(|(s, t, d, dt, extra, c)| DoubleSlipWeakeningProperties {
                static_coefficient: s,
                transition_coefficient: t,
                dynamic_coefficient: d,
                transition_slip_distance: dt,
                final_slip_distance: dt + extra,
                cohesion: c,
            })
    }

    proptest! {
        #[test]
        fn tension_returns_cohesion(
            p in arb_props(),
            n in 1e-9f64..1e3,
            slip in -5.0f64..5.0,
            cum in 0.0f64..5.0,
            prev in -5.0f64..5.0,
        ) {
            let state = SlipState::new(cum, prev);
            let s = sample(slip, n);
            prop_assert_eq!(DoubleSlipWeakening.friction(&s, &p, &state), p.cohesion);
            prop_assert_eq!(DoubleSlipWeakening.friction_deriv(&s, &p, &state), 0.0);
        }

        #[test]
        fn branches_agree_at_transition(p in arb_props()) {
            let first = p.static_coefficient
                - (p.static_coefficient - p.transition_coefficient);
            let second = DoubleSlipWeakening::coefficient(&p, p.transition_slip_distance);
            prop_assert!((first - second).abs() < 1e-12);
        }

        #[test]
        fn coefficient_between_extremes(p in arb_props(), d in 0.0f64..3.0) {
            let mu = DoubleSlipWeakening::coefficient(&p, d);
            let lo = p.static_coefficient.min(p.transition_coefficient).min(p.dynamic_coefficient);
            let hi = p.static_coefficient.max(p.transition_coefficient).max(p.dynamic_coefficient);
            prop_assert!(mu >= lo - 1e-12 && mu <= hi + 1e-12);
        }
    }
}
