//! Slip-weakening friction laws for Faultline.
//!
//! Two no-heal laws share the same slip-state machine and differ only in
//! how the friction coefficient weakens with slip distance `D`:
//!
//! - [`DoubleSlipWeakening`]: two linear segments, static to transition
//!   coefficient over `D_t`, then transition to dynamic over `D_f - D_t`.
//! - [`ParabolicCohesiveZone`]: a parabola centred on the slip shift `D_s`
//!   that reaches the dynamic coefficient at `D_s + D_w`.
//!
//! [`LawKind`] selects a law by name at runtime; [`AnySection`] wraps a
//! fault section of either law.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod double_slip_weakening;
pub mod factory;
pub mod fields;
pub mod parabolic_cohesive_zone;

pub use double_slip_weakening::{DoubleSlipWeakening, DoubleSlipWeakeningProperties};
pub use factory::{registry, AnySection, AnySectionBuilder, LawKind};
pub use parabolic_cohesive_zone::{ParabolicCohesiveZone, ParabolicCohesiveZoneProperties};
