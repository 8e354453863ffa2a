//! Test utilities and mock types for Faultline development.
//!
//! Provides a mock [`Normalizer`] that counts its calls, a minimal
//! constant-coefficient [`FrictionLaw`] for exercising
//! [`FaultSection`](faultline_friction::FaultSection) plumbing, and a
//! finite-difference helper for checking analytic slip derivatives.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::sync::atomic::{AtomicUsize, Ordering};

use faultline_core::{DecodeError, Dimension, Metadata, Normalizer, ParamDescription, Requirement};
use faultline_friction::{FrictionLaw, ParamRecord, SlipSample, SlipState};
use smallvec::SmallVec;

/// Mock [`Normalizer`] with fixed scales that counts conversions.
///
/// Counters are atomic so the mock can be boxed into a section.
pub struct CountingNormalizer {
    length: f64,
    time: f64,
    pressure: f64,
    nondim_calls: AtomicUsize,
    dim_calls: AtomicUsize,
}

impl CountingNormalizer {
    pub fn new(length: f64, time: f64, pressure: f64) -> Self {
        Self {
            length,
            time,
            pressure,
            nondim_calls: AtomicUsize::new(0),
            dim_calls: AtomicUsize::new(0),
        }
    }

    /// Number of `nondimensionalize` calls so far.
    pub fn nondim_calls(&self) -> usize {
        self.nondim_calls.load(Ordering::Relaxed)
    }

    /// Number of `dimensionalize` calls so far.
    pub fn dim_calls(&self) -> usize {
        self.dim_calls.load(Ordering::Relaxed)
    }
}

impl Normalizer for CountingNormalizer {
    fn length_scale(&self) -> f64 {
        self.length
    }

    fn time_scale(&self) -> f64 {
        self.time
    }

    fn pressure_scale(&self) -> f64 {
        self.pressure
    }

    fn nondimensionalize(&self, value: f64, scale: f64) -> f64 {
        self.nondim_calls.fetch_add(1, Ordering::Relaxed);
        value / scale
    }

    fn dimensionalize(&self, value: f64, scale: f64) -> f64 {
        self.dim_calls.fetch_add(1, Ordering::Relaxed);
        value * scale
    }
}

static CONSTANT_PROPERTIES: [ParamDescription; 2] = [
    ParamDescription::scalar("coefficient", Dimension::Dimensionless),
    ParamDescription::scalar("cohesion", Dimension::Pressure),
];

static CONSTANT_STATE: [ParamDescription; 2] = [
    ParamDescription::scalar("cumulative_slip", Dimension::Length),
    ParamDescription::scalar("previous_slip", Dimension::Length),
];

static CONSTANT_METADATA: Metadata = Metadata::new(
    &CONSTANT_PROPERTIES,
    &CONSTANT_STATE,
    &["coefficient", "cohesion"],
    &["cumulative_slip", "previous_slip"],
);

/// Properties of [`ConstantFriction`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantProperties {
    pub coefficient: f64,
    pub cohesion: f64,
}

impl ParamRecord for ConstantProperties {
    fn from_values(values: &[f64]) -> Self {
        Self {
            coefficient: values[0],
            cohesion: values[1],
        }
    }

    fn to_values(&self) -> SmallVec<[f64; 8]> {
        SmallVec::from_slice(&[self.coefficient, self.cohesion])
    }
}

/// Coulomb friction with a slip-independent coefficient.
///
/// Useful for testing section plumbing without slip-weakening branches:
/// friction is `-coefficient * normal_traction + cohesion` in compression
/// and `cohesion` in tension; the derivative is always zero.
pub struct ConstantFriction;

impl FrictionLaw for ConstantFriction {
    type Properties = ConstantProperties;

    fn name(&self) -> &'static str {
        "ConstantFriction"
    }

    fn metadata(&self) -> &'static Metadata {
        &CONSTANT_METADATA
    }

    fn decode_properties(&self, raw: &[f64]) -> Result<ConstantProperties, DecodeError> {
        CONSTANT_METADATA.check_properties_arity(raw.len())?;
        Ok(ConstantProperties {
            coefficient: Requirement::Positive.check("coefficient", raw[0])?,
            cohesion: Requirement::NonNegative.check("cohesion", raw[1])?,
        })
    }

    fn friction(
        &self,
        sample: &SlipSample,
        props: &ConstantProperties,
        _state: &SlipState,
    ) -> f64 {
        if sample.in_compression() {
            -props.coefficient * sample.normal_traction + props.cohesion
        } else {
            props.cohesion
        }
    }

    fn friction_deriv(
        &self,
        _sample: &SlipSample,
        _props: &ConstantProperties,
        _state: &SlipState,
    ) -> f64 {
        0.0
    }
}

/// Central-difference slip derivative of `f` at `slip`.
pub fn central_difference(f: impl Fn(f64) -> f64, slip: f64, h: f64) -> f64 {
    (f(slip + h) - f(slip - h)) / (2.0 * h)
}

/// Assert two floats agree within a relative tolerance (absolute near zero).
#[track_caller]
pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    let scale = expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tol * scale,
        "expected {expected}, got {actual} (tol {tol})"
    );
}
