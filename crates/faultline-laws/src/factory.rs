//! Runtime selection of a friction law by model name.
//!
//! [`FrictionLaw`] has an associated property type, so sections of
//! different laws are different types. [`AnySection`] closes over the
//! built-in set for hosts that only learn the model name from their input.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use tracing::debug;

use crate::double_slip_weakening::DoubleSlipWeakening;
use crate::fields;
use crate::parabolic_cohesive_zone::ParabolicCohesiveZone;
use faultline_core::{Metadata, Nondimensional, Normalizer, VertexId};
use faultline_friction::{
    Advance, ConfigError, FaultSection, FaultSectionBuilder, FrictionLaw, SectionConfig,
    SectionMetrics, SlipSample,
};

/// The built-in friction laws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LawKind {
    /// [`DoubleSlipWeakening`].
    DoubleSlipWeakening,
    /// [`ParabolicCohesiveZone`].
    ParabolicCohesiveZone,
}

impl LawKind {
    /// Every built-in law.
    pub const ALL: [LawKind; 2] = [LawKind::DoubleSlipWeakening, LawKind::ParabolicCohesiveZone];

    /// Stable model name.
    pub fn name(self) -> &'static str {
        match self {
            Self::DoubleSlipWeakening => DoubleSlipWeakening::NAME,
            Self::ParabolicCohesiveZone => ParabolicCohesiveZone::NAME,
        }
    }

    /// Short tag identifying the law in logs.
    pub fn log_prefix(self) -> &'static str {
        match self {
            Self::DoubleSlipWeakening => "FrDSlWk",
            Self::ParabolicCohesiveZone => "FrPCZ",
        }
    }

    /// Look up a law by model name.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownModel`] if no built-in law has this name.
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| ConfigError::UnknownModel {
                name: name.to_string(),
            })
    }

    /// Descriptor tables of the law.
    pub fn metadata(self) -> &'static Metadata {
        match self {
            Self::DoubleSlipWeakening => &fields::DOUBLE_SLIP_WEAKENING,
            Self::ParabolicCohesiveZone => &fields::PARABOLIC_COHESIVE_ZONE,
        }
    }
}

impl fmt::Display for LawKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LawKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// All built-in laws and their descriptor tables, ordered by model name.
pub fn registry() -> IndexMap<&'static str, &'static Metadata> {
    let mut map: IndexMap<_, _> = LawKind::ALL
        .into_iter()
        .map(|kind| (kind.name(), kind.metadata()))
        .collect();
    map.sort_keys();
    map
}

/// A fault section governed by any built-in law.
pub enum AnySection {
    /// Section using [`DoubleSlipWeakening`].
    DoubleSlipWeakening(FaultSection<DoubleSlipWeakening>),
    /// Section using [`ParabolicCohesiveZone`].
    ParabolicCohesiveZone(FaultSection<ParabolicCohesiveZone>),
}

macro_rules! forward {
    ($self:expr, $section:ident => $body:expr) => {
        match $self {
            AnySection::DoubleSlipWeakening($section) => $body,
            AnySection::ParabolicCohesiveZone($section) => $body,
        }
    };
}

impl AnySection {
    /// Start building a section of the law `kind`.
    pub fn builder(kind: LawKind) -> AnySectionBuilder {
        AnySectionBuilder {
            kind,
            config: SectionConfig::default(),
            normalizer: Box::new(Nondimensional::default()),
            raw_properties: Vec::new(),
            raw_state_vars: None,
        }
    }

    /// Which law governs the section.
    pub fn kind(&self) -> LawKind {
        match self {
            Self::DoubleSlipWeakening(_) => LawKind::DoubleSlipWeakening,
            Self::ParabolicCohesiveZone(_) => LawKind::ParabolicCohesiveZone,
        }
    }

    /// Section label.
    pub fn label(&self) -> &str {
        forward!(self, s => s.label())
    }

    /// Current time step.
    pub fn time_step(&self) -> f64 {
        forward!(self, s => s.time_step())
    }

    /// See [`FaultSection::set_time_step`].
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidTimeStep`] if `dt` is not finite and positive.
    pub fn set_time_step(&mut self, dt: f64) -> Result<(), ConfigError> {
        forward!(self, s => s.set_time_step(dt))
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        forward!(self, s => s.num_vertices())
    }

    /// See [`FaultSection::friction`].
    pub fn friction(&self, vertex: VertexId, sample: &SlipSample) -> Option<f64> {
        forward!(self, s => s.friction(vertex, sample))
    }

    /// See [`FaultSection::friction_deriv`].
    pub fn friction_deriv(&self, vertex: VertexId, sample: &SlipSample) -> Option<f64> {
        forward!(self, s => s.friction_deriv(vertex, sample))
    }

    /// See [`FaultSection::update_state`].
    pub fn update_state(&mut self, vertex: VertexId, sample: &SlipSample) -> Option<Advance> {
        forward!(self, s => s.update_state(vertex, sample))
    }

    /// See [`FaultSection::update_all_states`].
    ///
    /// # Errors
    ///
    /// [`ConfigError::SampleCountMismatch`] if `samples` does not cover
    /// every vertex.
    pub fn update_all_states(&mut self, samples: &[SlipSample]) -> Result<(), ConfigError> {
        forward!(self, s => s.update_all_states(samples))
    }

    /// See [`FaultSection::property_field`].
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownField`] if the law has no such property.
    pub fn property_field(&self, name: &str) -> Result<Vec<f64>, ConfigError> {
        forward!(self, s => s.property_field(name))
    }

    /// See [`FaultSection::state_field`].
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownField`] if the law has no such state variable.
    pub fn state_field(&self, name: &str) -> Result<Vec<f64>, ConfigError> {
        forward!(self, s => s.state_field(name))
    }

    /// Snapshot of the section's counters.
    pub fn metrics(&self) -> SectionMetrics {
        forward!(self, s => s.metrics())
    }
}

/// Builder for [`AnySection`], mirroring [`FaultSectionBuilder`].
pub struct AnySectionBuilder {
    kind: LawKind,
    config: SectionConfig,
    normalizer: Box<dyn Normalizer + Send + Sync>,
    raw_properties: Vec<f64>,
    raw_state_vars: Option<Vec<f64>>,
}

impl AnySectionBuilder {
    /// Set the section label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.config.label = label.into();
        self
    }

    /// Set the time step (default 1.0).
    pub fn time_step(mut self, dt: f64) -> Self {
        self.config.time_step = dt;
        self
    }

    /// Set the normalizer (default: unit scales).
    pub fn normalizer(mut self, normalizer: impl Normalizer + Send + Sync + 'static) -> Self {
        self.normalizer = Box::new(normalizer);
        self
    }

    /// Set the dimensional database property values, vertex-major.
    pub fn raw_properties(mut self, values: Vec<f64>) -> Self {
        self.raw_properties = values;
        self
    }

    /// Set the dimensional database state values, vertex-major.
    pub fn raw_state_vars(mut self, values: Vec<f64>) -> Self {
        self.raw_state_vars = Some(values);
        self
    }

    /// Build the section.
    ///
    /// # Errors
    ///
    /// Same as [`FaultSectionBuilder::build`], including
    /// [`ConfigError::Scale`] when the normalizer has a scale that is not
    /// finite and positive.
    pub fn build(self) -> Result<AnySection, ConfigError> {
        let kind = self.kind;
        debug!(model = %kind, prefix = kind.log_prefix(), "building section by model name");
        Ok(match kind {
            LawKind::DoubleSlipWeakening => {
                AnySection::DoubleSlipWeakening(self.configure(DoubleSlipWeakening).build()?)
            }
            LawKind::ParabolicCohesiveZone => {
                AnySection::ParabolicCohesiveZone(self.configure(ParabolicCohesiveZone).build()?)
            }
        })
    }

    fn configure<L: FrictionLaw>(self, law: L) -> FaultSectionBuilder<L> {
        let mut builder = FaultSection::builder(law)
            .label(self.config.label)
            .time_step(self.config.time_step)
            .normalizer(self.normalizer)
            .raw_properties(self.raw_properties);
        if let Some(state) = self.raw_state_vars {
            builder = builder.raw_state_vars(state);
        }
        builder
    }
}
