//! Error types raised while decoding and scaling friction-model inputs.
//!
//! Decoding happens once per vertex at setup, so every variant here is a
//! configuration mistake rather than a transient fault: the host aborts
//! setup for the fault surface instead of retrying.

use std::error::Error;
use std::fmt;

/// Which block of per-vertex values a decode operated on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueGroup {
    /// Physical properties supplied by the spatial database.
    Properties,
    /// State variables supplied by the spatial database.
    StateVars,
}

impl fmt::Display for ValueGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Properties => write!(f, "property"),
            Self::StateVars => write!(f, "state variable"),
        }
    }
}

/// Admissible range a decoded parameter must fall in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Requirement {
    /// Finite and strictly greater than zero.
    Positive,
    /// Finite and greater than or equal to zero.
    NonNegative,
}

impl Requirement {
    /// Returns `true` if `value` satisfies the requirement.
    ///
    /// NaN and infinities never do.
    pub fn admits(self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        match self {
            Self::Positive => value > 0.0,
            Self::NonNegative => value >= 0.0,
        }
    }

    /// Check `value`, returning an [`DecodeError::InvalidParameter`]
    /// naming `name` when it is out of range.
    pub fn check(self, name: &'static str, value: f64) -> Result<f64, DecodeError> {
        if self.admits(value) {
            Ok(value)
        } else {
            Err(DecodeError::InvalidParameter {
                name,
                value,
                requirement: self,
            })
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => write!(f, "finite and > 0"),
            Self::NonNegative => write!(f, "finite and >= 0"),
        }
    }
}

/// Errors from converting raw database arrays into typed records.
#[derive(Clone, Debug, PartialEq)]
pub enum DecodeError {
    /// A parameter value is outside its admissible range.
    InvalidParameter {
        /// Descriptor name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
        /// The range the value had to satisfy.
        requirement: Requirement,
    },
    /// The raw array length does not match the descriptor table.
    Arity {
        /// Which block of values was being decoded.
        group: ValueGroup,
        /// Total arity declared by the descriptor table.
        expected: usize,
        /// Length of the array actually supplied.
        got: usize,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                name,
                value,
                requirement,
            } => write!(f, "{name} must be {requirement}, got {value}"),
            Self::Arity {
                group,
                expected,
                got,
            } => write!(f, "expected {expected} {group} values, got {got}"),
        }
    }
}

impl Error for DecodeError {}

/// A normalizer scale that cannot be divided by.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleError {
    /// Name of the scale (`"length"`, `"time"`, `"pressure"`).
    pub scale: &'static str,
    /// The rejected value.
    pub value: f64,
}

impl fmt::Display for ScaleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} scale must be finite and > 0, got {}",
            self.scale, self.value
        )
    }
}

impl Error for ScaleError {}
