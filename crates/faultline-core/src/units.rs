//! Unit scaling between dimensional and nondimensional values.
//!
//! The host owns the reference scales; friction models reach them only
//! through the [`Normalizer`] trait. Which scale applies to a value is
//! decided by its descriptor's [`Dimension`], so a model never hardcodes
//! which of its fields are lengths or pressures.

use crate::error::ScaleError;
use crate::param::{Dimension, ParamDescription};

/// Reference scales for nondimensionalization.
///
/// Default `nondimensionalize` divides by the scale and `dimensionalize`
/// multiplies, so the two are exact inverses up to rounding.
pub trait Normalizer {
    /// Reference length.
    fn length_scale(&self) -> f64;

    /// Reference time.
    fn time_scale(&self) -> f64;

    /// Reference pressure.
    fn pressure_scale(&self) -> f64;

    /// Convert a dimensional value to nondimensional form.
    fn nondimensionalize(&self, value: f64, scale: f64) -> f64 {
        value / scale
    }

    /// Convert a nondimensional value back to dimensional form.
    fn dimensionalize(&self, value: f64, scale: f64) -> f64 {
        value * scale
    }
}

impl<N: Normalizer + ?Sized> Normalizer for Box<N> {
    fn length_scale(&self) -> f64 {
        (**self).length_scale()
    }

    fn time_scale(&self) -> f64 {
        (**self).time_scale()
    }

    fn pressure_scale(&self) -> f64 {
        (**self).pressure_scale()
    }

    fn nondimensionalize(&self, value: f64, scale: f64) -> f64 {
        (**self).nondimensionalize(value, scale)
    }

    fn dimensionalize(&self, value: f64, scale: f64) -> f64 {
        (**self).dimensionalize(value, scale)
    }
}

impl Dimension {
    /// The normalizer scale for this dimension, or `None` if dimensionless.
    pub fn scale(self, normalizer: &dyn Normalizer) -> Option<f64> {
        match self {
            Self::Dimensionless => None,
            Self::Length => Some(normalizer.length_scale()),
            Self::Time => Some(normalizer.time_scale()),
            Self::Pressure => Some(normalizer.pressure_scale()),
        }
    }
}

/// Nondimensionalize a flat value array laid out by `table`, in place.
pub fn nondimensionalize_values(
    table: &[ParamDescription],
    values: &mut [f64],
    normalizer: &dyn Normalizer,
) {
    rescale(table, values, normalizer, |n, v, s| n.nondimensionalize(v, s));
}

/// Dimensionalize a flat value array laid out by `table`, in place.
pub fn dimensionalize_values(
    table: &[ParamDescription],
    values: &mut [f64],
    normalizer: &dyn Normalizer,
) {
    rescale(table, values, normalizer, |n, v, s| n.dimensionalize(v, s));
}

fn rescale(
    table: &[ParamDescription],
    values: &mut [f64],
    normalizer: &dyn Normalizer,
    op: impl Fn(&dyn Normalizer, f64, f64) -> f64,
) {
    debug_assert_eq!(
        values.len(),
        table.iter().map(ParamDescription::arity).sum::<usize>(),
        "value array does not match descriptor table"
    );
    let mut offset = 0;
    for desc in table {
        let end = offset + desc.arity();
        if let Some(scale) = desc.dimension.scale(normalizer) {
            for v in &mut values[offset..end] {
                *v = op(normalizer, *v, scale);
            }
        }
        offset = end;
    }
}

/// Plain length/time/pressure scales.
///
/// Defaults to unit scales, which makes nondimensionalization the
/// identity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Nondimensional {
    length_scale: f64,
    time_scale: f64,
    pressure_scale: f64,
}

impl Nondimensional {
    /// Create a normalizer from the three reference scales.
    ///
    /// # Errors
    ///
    /// Returns [`ScaleError`] naming the first scale that is not finite
    /// and strictly positive.
    pub fn new(length_scale: f64, time_scale: f64, pressure_scale: f64) -> Result<Self, ScaleError> {
        let normalizer = Self {
            length_scale,
            time_scale,
            pressure_scale,
        };
        check_scales(&normalizer)?;
        Ok(normalizer)
    }
}

/// Check that every reference scale of `normalizer` is finite and > 0.
///
/// # Errors
///
/// Returns [`ScaleError`] naming the first offending scale, in
/// length, time, pressure order.
pub fn check_scales(normalizer: &dyn Normalizer) -> Result<(), ScaleError> {
    for (scale, value) in [
        ("length", normalizer.length_scale()),
        ("time", normalizer.time_scale()),
        ("pressure", normalizer.pressure_scale()),
    ] {
        if !(value > 0.0) || !value.is_finite() {
            return Err(ScaleError { scale, value });
        }
    }
    Ok(())
}

impl Default for Nondimensional {
    fn default() -> Self {
        Self {
            length_scale: 1.0,
            time_scale: 1.0,
            pressure_scale: 1.0,
        }
    }
}

impl Normalizer for Nondimensional {
    fn length_scale(&self) -> f64 {
        self.length_scale
    }

    fn time_scale(&self) -> f64 {
        self.time_scale
    }

    fn pressure_scale(&self) -> f64 {
        self.pressure_scale
    }
}
