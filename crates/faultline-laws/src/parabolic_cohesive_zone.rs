//! Parabolic cohesive-zone friction without healing.
//!
//! The friction coefficient follows a downward parabola with its vertex at
//! the slip shift `D_s`, reaching the dynamic coefficient at `D_s + D_w`:
//!
//! ```text
//!        | mu_s - (mu_s - mu_d) * ((D - D_s) / D_w)^2     D <= D_s + D_w
//! mu  =  |
//!        | mu_d                                          D >  D_s + D_w
//! ```
//!
//! For `D < D_s` the coefficient strengthens towards `mu_s`; past the
//! vertex it weakens. Unlike the linear law the slip derivative carries
//! the sign of the trial slip increment, since `D` grows with
//! `|slip - previous_slip|`.

use crate::fields;
use faultline_core::{DecodeError, Metadata, Requirement};
use faultline_friction::{FrictionLaw, ParamRecord, SlipSample, SlipState};
use smallvec::SmallVec;

/// Decoded properties of one vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParabolicCohesiveZoneProperties {
    /// Static coefficient `mu_s`, the peak of the parabola.
    pub static_coefficient: f64,
    /// Dynamic coefficient `mu_d`.
    pub dynamic_coefficient: f64,
    /// Slip shift `D_s`, the slip distance of the peak.
    pub slip_shift: f64,
    /// Slip stretch `D_w`, the distance from the peak to `mu_d`.
    pub slip_stretch: f64,
    /// Cohesion.
    pub cohesion: f64,
}

impl ParabolicCohesiveZoneProperties {
    /// Slip distance beyond which the coefficient is `mu_d`.
    #[inline]
    pub fn weakening_end(&self) -> f64 {
        self.slip_shift + self.slip_stretch
    }
}

impl ParamRecord for ParabolicCohesiveZoneProperties {
    fn from_values(values: &[f64]) -> Self {
        Self {
            static_coefficient: values[0],
            dynamic_coefficient: values[1],
            slip_shift: values[2],
            slip_stretch: values[3],
            cohesion: values[4],
        }
    }

    fn to_values(&self) -> SmallVec<[f64; 8]> {
        SmallVec::from_slice(&[
            self.static_coefficient,
            self.dynamic_coefficient,
            self.slip_shift,
            self.slip_stretch,
            self.cohesion,
        ])
    }
}

/// Parabolic cohesive-zone friction law, no healing.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParabolicCohesiveZone;

impl ParabolicCohesiveZone {
    /// Model name used by the factory.
    pub const NAME: &'static str = "ParabolicCohesiveZoneNoHeal";

    /// Friction coefficient at slip distance `distance`.
    pub fn coefficient(props: &ParabolicCohesiveZoneProperties, distance: f64) -> f64 {
        if distance < props.weakening_end() {
            let x = (distance - props.slip_shift) / props.slip_stretch;
            props.static_coefficient - (props.static_coefficient - props.dynamic_coefficient) * x * x
        } else {
            props.dynamic_coefficient
        }
    }

    /// `d mu / d D` at slip distance `distance`.
    pub fn coefficient_slope(props: &ParabolicCohesiveZoneProperties, distance: f64) -> f64 {
        if distance <= props.weakening_end() {
            -2.0 * (props.static_coefficient - props.dynamic_coefficient)
                * (distance - props.slip_shift)
                / (props.slip_stretch * props.slip_stretch)
        } else {
            0.0
        }
    }
}

/// `d D / d slip`: the direction of the trial increment, `+1` when it is zero.
#[inline]
fn increment_sign(slip: f64, previous_slip: f64) -> f64 {
    if slip - previous_slip < 0.0 {
        -1.0
    } else {
        1.0
    }
}

impl FrictionLaw for ParabolicCohesiveZone {
    type Properties = ParabolicCohesiveZoneProperties;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn metadata(&self) -> &'static Metadata {
        &fields::PARABOLIC_COHESIVE_ZONE
    }

    fn decode_properties(&self, raw: &[f64]) -> Result<Self::Properties, DecodeError> {
        self.metadata().check_properties_arity(raw.len())?;
        Ok(ParabolicCohesiveZoneProperties {
            static_coefficient: Requirement::Positive.check(fields::STATIC_COEFFICIENT, raw[0])?,
            dynamic_coefficient: Requirement::Positive.check(fields::DYNAMIC_COEFFICIENT, raw[1])?,
            slip_shift: Requirement::Positive.check(fields::SLIP_SHIFT, raw[2])?,
            slip_stretch: Requirement::Positive.check(fields::SLIP_STRETCH, raw[3])?,
            cohesion: Requirement::NonNegative.check(fields::COHESION, raw[4])?,
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
        let distance = state.slip_distance(sample.slip);
        -sample.normal_traction
            * Self::coefficient_slope(props, distance)
            * increment_sign(sample.slip, state.previous_slip)
    }
}
