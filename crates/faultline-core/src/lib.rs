//! Core types for the Faultline fault-friction framework.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the static parameter descriptor tables that name and order every
//! property and state variable, the unit-scaling seam between a friction
//! model and the host's normalizer, vertex identifiers, and decode errors.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod param;
pub mod units;

pub use error::{DecodeError, Requirement, ScaleError, ValueGroup};
pub use id::VertexId;
pub use param::{AvailableFields, Dimension, Metadata, ParamDescription, ParamKind};
pub use units::{
    check_scales, dimensionalize_values, nondimensionalize_values, Nondimensional, Normalizer,
};
