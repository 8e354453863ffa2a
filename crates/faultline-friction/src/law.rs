//! The [`FrictionLaw`] trait and the per-call [`SlipSample`].
//!
//! A friction law is a stateless constitutive operator: all per-vertex
//! memory lives in its decoded properties and [`SlipState`], which the
//! host owns and passes in by reference on every call.

use crate::state::{Advance, SlipState};
use faultline_core::{
    dimensionalize_values, nondimensionalize_values, DecodeError, Metadata, Normalizer,
};
use smallvec::SmallVec;
use std::fmt;

/// Trial kinematics and traction at one vertex.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SlipSample {
    /// Simulation time.
    pub t: f64,
    /// Total slip.
    pub slip: f64,
    /// Slip rate.
    pub slip_rate: f64,
    /// Fault-normal traction; negative is compression.
    pub normal_traction: f64,
}

impl SlipSample {
    /// Bundle the four per-call inputs.
    pub fn new(t: f64, slip: f64, slip_rate: f64, normal_traction: f64) -> Self {
        Self {
            t,
            slip,
            slip_rate,
            normal_traction,
        }
    }

    /// Whether the fault is closed (`normal_traction <= 0`).
    #[inline]
    pub fn in_compression(&self) -> bool {
        self.normal_traction <= 0.0
    }
}

/// A named-field record whose flat value layout follows a descriptor table.
///
/// `from_values` trusts its input: callers validate arity and ranges first.
pub trait ParamRecord: Copy + fmt::Debug + PartialEq + Send + Sync + 'static {
    /// Rebuild the record from values in descriptor order.
    fn from_values(values: &[f64]) -> Self;

    /// Flatten the record into descriptor order.
    fn to_values(&self) -> SmallVec<[f64; 8]>;
}

/// A fault constitutive model.
///
/// # Contract
///
/// - `friction()` and `friction_deriv()` are pure: repeated calls with the
///   same inputs return the same value and never touch the state. The
///   nonlinear solver may call them many times per step.
/// - `update_state()` is called exactly once per vertex per converged
///   time step and is the only writer of [`SlipState`].
/// - Evaluation trusts the invariants established by
///   `decode_properties()` and performs no re-validation.
///
/// Properties and state are expected in nondimensional form during
/// evaluation; the default scaling methods convert according to the
/// `Dimension` of each descriptor in [`metadata()`](Self::metadata).
pub trait FrictionLaw: Send + Sync + 'static {
    /// Decoded physical properties of one vertex.
    type Properties: ParamRecord;

    /// Model name, used by the factory and in diagnostics.
    fn name(&self) -> &'static str;

    /// Descriptor tables naming and ordering properties and state variables.
    fn metadata(&self) -> &'static Metadata;

    /// Validate raw database values and build the property record.
    ///
    /// # Errors
    ///
    /// [`DecodeError::Arity`] if `raw` has the wrong length,
    /// [`DecodeError::InvalidParameter`] for the first out-of-range value.
    fn decode_properties(&self, raw: &[f64]) -> Result<Self::Properties, DecodeError>;

    /// Convert dimensional properties to nondimensional form.
    fn nondimensionalize_properties(
        &self,
        properties: &Self::Properties,
        normalizer: &dyn Normalizer,
    ) -> Self::Properties {
        let mut values = properties.to_values();
        nondimensionalize_values(self.metadata().properties(), &mut values, normalizer);
        Self::Properties::from_values(&values)
    }

    /// Convert nondimensional properties back to dimensional form.
    fn dimensionalize_properties(
        &self,
        properties: &Self::Properties,
        normalizer: &dyn Normalizer,
    ) -> Self::Properties {
        let mut values = properties.to_values();
        dimensionalize_values(self.metadata().properties(), &mut values, normalizer);
        Self::Properties::from_values(&values)
    }

    /// Build the state record from raw database values.
    ///
    /// # Errors
    ///
    /// [`DecodeError::Arity`] if `raw` has the wrong length.
    fn decode_state(&self, raw: &[f64]) -> Result<SlipState, DecodeError> {
        self.metadata().check_state_vars_arity(raw.len())?;
        Ok(SlipState::from_values(raw))
    }

    /// Convert a dimensional state to nondimensional form.
    fn nondimensionalize_state(&self, state: &SlipState, normalizer: &dyn Normalizer) -> SlipState {
        let mut values = state.to_values();
        nondimensionalize_values(self.metadata().state_vars(), &mut values, normalizer);
        SlipState::from_values(&values)
    }

    /// Convert a nondimensional state back to dimensional form.
    fn dimensionalize_state(&self, state: &SlipState, normalizer: &dyn Normalizer) -> SlipState {
        let mut values = state.to_values();
        dimensionalize_values(self.metadata().state_vars(), &mut values, normalizer);
        SlipState::from_values(&values)
    }

    /// Frictional resistance (shear traction magnitude) at trial slip.
    fn friction(
        &self,
        sample: &SlipSample,
        properties: &Self::Properties,
        state: &SlipState,
    ) -> f64;

    /// Derivative of [`friction()`](Self::friction) with respect to slip.
    fn friction_deriv(
        &self,
        sample: &SlipSample,
        properties: &Self::Properties,
        state: &SlipState,
    ) -> f64;

    /// Advance the state after the time step has converged on `sample.slip`.
    ///
    /// Default: the no-heal transition of [`SlipState::advance`].
    fn update_state(
        &self,
        sample: &SlipSample,
        state: &mut SlipState,
        _properties: &Self::Properties,
    ) -> Advance {
        state.advance(sample.slip, sample.slip_rate)
    }

    /// Estimated floating-point operations per friction evaluation.
    fn flops_per_eval(&self) -> u64 {
        10
    }
}
