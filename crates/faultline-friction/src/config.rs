//! Section configuration, validation, and error types.
//!
//! [`SectionConfig`] carries the host-level settings of a fault section.
//! [`ConfigError`] covers everything that can go wrong while turning raw
//! database arrays into a [`FaultSection`](crate::FaultSection); all of it
//! is detected at setup, never during evaluation.

use std::error::Error;
use std::fmt;

use faultline_core::{DecodeError, ScaleError, ValueGroup, VertexId};

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while configuring a fault section.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A vertex's raw values failed to decode.
    Decode {
        /// The vertex whose values were rejected.
        vertex: VertexId,
        /// The underlying decode error.
        source: DecodeError,
    },
    /// The normalizer scales are invalid.
    Scale(ScaleError),
    /// Time step is NaN, infinite, zero, or negative.
    InvalidTimeStep {
        /// The invalid value.
        value: f64,
    },
    /// No raw property values were supplied.
    EmptySection,
    /// A flat raw array is not a whole number of vertices long.
    RaggedArray {
        /// Which block of values was ragged.
        group: ValueGroup,
        /// Length of the flat array.
        len: usize,
        /// Values per vertex declared by the model.
        stride: usize,
    },
    /// More vertices than a [`VertexId`] can address.
    TooManyVertices {
        /// Vertices described by the property array.
        count: usize,
    },
    /// Property and state arrays describe different vertex counts.
    VertexCountMismatch {
        /// Vertices described by the property array.
        properties: usize,
        /// Vertices described by the state array.
        state_vars: usize,
    },
    /// Per-vertex input slice does not cover every vertex.
    SampleCountMismatch {
        /// Number of vertices in the section.
        expected: usize,
        /// Number of samples supplied.
        got: usize,
    },
    /// No property or state variable with this name.
    UnknownField {
        /// The requested name.
        name: String,
    },
    /// No friction model registered under this name.
    UnknownModel {
        /// The requested name.
        name: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode { vertex, source } => write!(f, "vertex {vertex}: {source}"),
            Self::Scale(e) => write!(f, "normalizer: {e}"),
            Self::InvalidTimeStep { value } => {
                write!(f, "time step must be finite and positive, got {value}")
            }
            Self::EmptySection => write!(f, "fault section has no vertices"),
            Self::RaggedArray { group, len, stride } => write!(
                f,
                "{group} array of length {len} is not a multiple of {stride} values per vertex"
            ),
            Self::TooManyVertices { count } => write!(
                f,
                "{count} vertices exceed the addressable limit of {}",
                u32::MAX
            ),
            Self::VertexCountMismatch {
                properties,
                state_vars,
            } => write!(
                f,
                "properties describe {properties} vertices but state variables describe {state_vars}"
            ),
            Self::SampleCountMismatch { expected, got } => {
                write!(f, "expected {expected} per-vertex samples, got {got}")
            }
            Self::UnknownField { name } => write!(f, "unknown field '{name}'"),
            Self::UnknownModel { name } => write!(f, "unknown friction model '{name}'"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Decode { source, .. } => Some(source),
            Self::Scale(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ScaleError> for ConfigError {
    fn from(e: ScaleError) -> Self {
        Self::Scale(e)
    }
}

// ── SectionConfig ──────────────────────────────────────────────────

/// Host-level settings of a fault section.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionConfig {
    /// Human-readable label for diagnostics and output.
    pub label: String,
    /// Current time step of the simulation, nondimensional.
    pub time_step: f64,
}

impl Default for SectionConfig {
    fn default() -> Self {
        Self {
            label: String::new(),
            time_step: 1.0,
        }
    }
}

impl SectionConfig {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_time_step(self.time_step)
    }
}

/// Reject time steps that are not finite and strictly positive.
pub(crate) fn validate_time_step(dt: f64) -> Result<(), ConfigError> {
    if !(dt > 0.0) || !dt.is_finite() {
        return Err(ConfigError::InvalidTimeStep { value: dt });
    }
    Ok(())
}

/// Reject vertex counts whose indices would not fit in a [`VertexId`].
pub(crate) fn check_vertex_limit(count: usize) -> Result<(), ConfigError> {
    match u32::try_from(count) {
        Ok(_) => Ok(()),
        Err(_) => Err(ConfigError::TooManyVertices { count }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faultline_core::Requirement;

    #[test]
    fn default_config_is_valid() {
        assert!(SectionConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_time_steps() {
        for dt in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let cfg = SectionConfig {
                time_step: dt,
                ..SectionConfig::default()
            };
            assert!(
                matches!(cfg.validate(), Err(ConfigError::InvalidTimeStep { .. })),
                "dt={dt} accepted"
            );
        }
    }

    #[test]
    fn decode_error_is_source() {
        let err = ConfigError::Decode {
            vertex: VertexId(4),
            source: DecodeError::InvalidParameter {
                name: "cohesion",
                value: -1.0,
                requirement: Requirement::NonNegative,
            },
        };
        assert_eq!(
            err.to_string(),
            "vertex 4: cohesion must be finite and >= 0, got -1"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn vertex_limit() {
        assert!(check_vertex_limit(1).is_ok());
        assert!(check_vertex_limit(u32::MAX as usize).is_ok());
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn vertex_limit_overflow() {
        let count = u32::MAX as usize + 1;
        let err = check_vertex_limit(count).unwrap_err();
        assert_eq!(err, ConfigError::TooManyVertices { count });
        assert_eq!(
            err.to_string(),
            "4294967296 vertices exceed the addressable limit of 4294967295"
        );
    }

    #[test]
    fn ragged_message() {
        let err = ConfigError::RaggedArray {
            group: ValueGroup::Properties,
            len: 7,
            stride: 6,
        };
        assert_eq!(
            err.to_string(),
            "property array of length 7 is not a multiple of 6 values per vertex"
        );
    }
}
