//! Faultline: slip-weakening friction laws for fault rupture solvers.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Faultline sub-crates. For most users, adding `faultline` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use faultline::prelude::*;
//!
//! // One vertex: mu_s=0.6, mu_t=0.4, mu_d=0.2, D_t=0.1, D_f=0.5, no cohesion.
//! let mut section = FaultSection::builder(DoubleSlipWeakening)
//!     .label("main fault")
//!     .raw_properties(vec![0.6, 0.4, 0.2, 0.1, 0.5, 0.0])
//!     .build()
//!     .unwrap();
//!
//! let v = VertexId(0);
//! let trial = SlipSample::new(0.0, 0.05, 0.5, -10.0);
//!
//! // The solver may evaluate as often as it likes; state is untouched.
//! let friction = section.friction(v, &trial).unwrap();
//! let stiffness = section.friction_deriv(v, &trial).unwrap();
//! assert!((friction - 5.0).abs() < 1e-12);
//! assert!((stiffness + 20.0).abs() < 1e-12);
//!
//! // Once the step converges, advance the slip history.
//! assert_eq!(section.update_state(v, &trial), Some(Advance::Accumulated));
//! assert_eq!(section.state(v).unwrap().cumulative_slip, 0.05);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `faultline-core` | Vertex IDs, descriptor tables, errors, unit scaling |
//! | [`friction`] | `faultline-friction` | `FrictionLaw` trait, slip state, `FaultSection` |
//! | [`laws`] | `faultline-laws` | Built-in laws and selection by model name |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types (`faultline-core`).
///
/// Contains [`types::VertexId`], parameter descriptors and
/// [`types::Metadata`], decode errors, and the [`types::Normalizer`]
/// scaling trait.
pub use faultline_core as types;

/// Friction law trait and fault sections (`faultline-friction`).
///
/// The [`friction::FrictionLaw`] trait is the extension point for new
/// constitutive models; [`friction::FaultSection`] applies one over many
/// vertices.
pub use faultline_friction as friction;

/// Built-in friction laws (`faultline-laws`).
///
/// [`laws::DoubleSlipWeakening`] and [`laws::ParabolicCohesiveZone`], plus
/// [`laws::LawKind`] and [`laws::AnySection`] for runtime selection.
pub use faultline_laws as laws;

/// Common imports for typical Faultline usage.
///
/// ```rust
/// use faultline::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use faultline_core::{DecodeError, Metadata, Nondimensional, Normalizer, VertexId};

    // Law trait and sections
    pub use faultline_friction::{
        Advance, ConfigError, FaultSection, FrictionLaw, SectionConfig, SectionMetrics,
        SlipSample, SlipState,
    };

    // Built-in laws
    pub use faultline_laws::{
        registry, AnySection, DoubleSlipWeakening, LawKind, ParabolicCohesiveZone,
    };
}
