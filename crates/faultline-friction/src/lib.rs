//! Friction law trait, slip state, and fault sections for Faultline.
//!
//! The [`FrictionLaw`] trait is the capability set every fault
//! constitutive model provides: decode and scale its properties and state,
//! evaluate friction and its slip derivative, and advance state once a
//! time step has converged. [`FaultSection`] drives a law over all
//! vertices of one fault surface.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod law;
pub mod metrics;
pub mod section;
pub mod state;

pub use config::{ConfigError, SectionConfig};
pub use law::{FrictionLaw, ParamRecord, SlipSample};
pub use metrics::SectionMetrics;
pub use section::{FaultSection, FaultSectionBuilder};
pub use state::{Advance, SlipState, RESET_TOLERANCE};
