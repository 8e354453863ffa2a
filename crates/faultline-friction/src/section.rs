//! Per-vertex storage and evaluation for one fault surface.
//!
//! [`FaultSection`] decodes the host's flat, vertex-major database arrays
//! into typed property and state records, keeps them nondimensional for
//! the solve, and dimensionalizes them again for output.
//!
//! Constructed via the builder pattern: [`FaultSection::builder`].

use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::{check_vertex_limit, validate_time_step, ConfigError, SectionConfig};
use crate::law::{FrictionLaw, ParamRecord, SlipSample};
use crate::metrics::SectionMetrics;
use crate::state::{Advance, SlipState};
use faultline_core::{check_scales, Nondimensional, Normalizer, ValueGroup, VertexId};
use tracing::{debug, trace};

/// A friction law applied over every vertex of a fault surface.
///
/// Evaluation takes `&self` and never mutates state, so a host may
/// evaluate vertices from several threads. Only
/// [`update_state`](Self::update_state) needs exclusive access.
pub struct FaultSection<L: FrictionLaw> {
    law: L,
    config: SectionConfig,
    normalizer: Box<dyn Normalizer + Send + Sync>,
    properties: Vec<L::Properties>,
    state: Vec<SlipState>,
    evaluations: AtomicU64,
    state_updates: u64,
    resets: u64,
}

/// Builder for [`FaultSection`].
///
/// Required: raw properties. State variables default to zero for every
/// vertex, the normalizer to unit scales, and the time step to 1.0.
pub struct FaultSectionBuilder<L: FrictionLaw> {
    law: L,
    config: SectionConfig,
    normalizer: Box<dyn Normalizer + Send + Sync>,
    raw_properties: Vec<f64>,
    raw_state_vars: Option<Vec<f64>>,
}

impl<L: FrictionLaw> FaultSection<L> {
    /// Create a new builder for a section governed by `law`.
    pub fn builder(law: L) -> FaultSectionBuilder<L> {
        FaultSectionBuilder {
            law,
            config: SectionConfig::default(),
            normalizer: Box::new(Nondimensional::default()),
            raw_properties: Vec::new(),
            raw_state_vars: None,
        }
    }

    /// The friction law governing this section.
    pub fn law(&self) -> &L {
        &self.law
    }

    /// Section label.
    pub fn label(&self) -> &str {
        &self.config.label
    }

    /// Current time step.
    pub fn time_step(&self) -> f64 {
        self.config.time_step
    }

    /// Change the time step.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidTimeStep`] if `dt` is not finite and positive;
    /// the previous value is kept.
    pub fn set_time_step(&mut self, dt: f64) -> Result<(), ConfigError> {
        validate_time_step(dt)?;
        debug!(label = %self.config.label, dt, "time step changed");
        self.config.time_step = dt;
        Ok(())
    }

    /// The normalizer used for scaling.
    pub fn normalizer(&self) -> &dyn Normalizer {
        self.normalizer.as_ref()
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.properties.len()
    }

    /// Nondimensional properties of a vertex.
    pub fn properties(&self, vertex: VertexId) -> Option<&L::Properties> {
        self.properties.get(vertex.index())
    }

    /// Nondimensional state of a vertex.
    pub fn state(&self, vertex: VertexId) -> Option<&SlipState> {
        self.state.get(vertex.index())
    }

    /// Friction at a vertex for trial slip in `sample`, or `None` if the
    /// vertex is out of range.
    pub fn friction(&self, vertex: VertexId, sample: &SlipSample) -> Option<f64> {
        let (props, state) = self.slot(vertex)?;
        self.evaluations.fetch_add(1, Ordering::Relaxed);
        Some(self.law.friction(sample, props, state))
    }

    /// Slip derivative of friction at a vertex, or `None` if the vertex is
    /// out of range.
    pub fn friction_deriv(&self, vertex: VertexId, sample: &SlipSample) -> Option<f64> {
        let (props, state) = self.slot(vertex)?;
        self.evaluations.fetch_add(1, Ordering::Relaxed);
        Some(self.law.friction_deriv(sample, props, state))
    }

    /// Advance one vertex's state after the step converged, or `None` if
    /// the vertex is out of range.
    pub fn update_state(&mut self, vertex: VertexId, sample: &SlipSample) -> Option<Advance> {
        let props = self.properties.get(vertex.index())?;
        let state = self.state.get_mut(vertex.index())?;
        let advance = self.law.update_state(sample, state, props);
        self.state_updates += 1;
        if advance == Advance::Reset {
            self.resets += 1;
            trace!(%vertex, slip = sample.slip, "slip rate negative, cumulative slip reset");
        }
        Some(advance)
    }

    /// Advance every vertex's state, `samples[i]` belonging to vertex `i`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::SampleCountMismatch`] if `samples` does not cover
    /// every vertex exactly; no state is modified in that case.
    pub fn update_all_states(&mut self, samples: &[SlipSample]) -> Result<(), ConfigError> {
        if samples.len() != self.state.len() {
            return Err(ConfigError::SampleCountMismatch {
                expected: self.state.len(),
                got: samples.len(),
            });
        }
        // Vertex count was bounded by `check_vertex_limit` at build.
        for (i, sample) in (0..).zip(samples) {
            self.update_state(VertexId(i), sample);
        }
        Ok(())
    }

    /// Dimensional values of a named property at every vertex.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownField`] if the law has no such property.
    pub fn property_field(&self, name: &str) -> Result<Vec<f64>, ConfigError> {
        let idx = self
            .law
            .metadata()
            .property_index(name)
            .ok_or_else(|| ConfigError::UnknownField {
                name: name.to_string(),
            })?;
        Ok(self
            .properties
            .iter()
            .map(|p| {
                self.law
                    .dimensionalize_properties(p, self.normalizer.as_ref())
                    .to_values()[idx]
            })
            .collect())
    }

    /// Dimensional values of a named state variable at every vertex.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownField`] if the law has no such state variable.
    pub fn state_field(&self, name: &str) -> Result<Vec<f64>, ConfigError> {
        let idx = self
            .law
            .metadata()
            .state_var_index(name)
            .ok_or_else(|| ConfigError::UnknownField {
                name: name.to_string(),
            })?;
        Ok(self
            .state
            .iter()
            .map(|s| {
                self.law
                    .dimensionalize_state(s, self.normalizer.as_ref())
                    .to_values()[idx]
            })
            .collect())
    }

    /// Snapshot of the section's counters.
    pub fn metrics(&self) -> SectionMetrics {
        let evaluations = self.evaluations.load(Ordering::Relaxed);
        SectionMetrics {
            vertices: self.properties.len(),
            evaluations,
            flops: evaluations * self.law.flops_per_eval(),
            state_updates: self.state_updates,
            resets: self.resets,
        }
    }

    fn slot(&self, vertex: VertexId) -> Option<(&L::Properties, &SlipState)> {
        let i = vertex.index();
        Some((self.properties.get(i)?, self.state.get(i)?))
    }
}

impl<L: FrictionLaw> FaultSectionBuilder<L> {
    /// Set the section label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.config.label = label.into();
        self
    }

    /// Set the time step (default 1.0). Must be finite and > 0.
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

    /// Decode, validate, and nondimensionalize every vertex.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - the time step is not finite and positive
    /// - any normalizer scale is not finite and positive
    ///   ([`ConfigError::Scale`])
    /// - no property values were supplied
    /// - a raw array is not a whole number of vertices long
    /// - there are more vertices than a [`VertexId`] can address
    /// - property and state arrays describe different vertex counts
    /// - any vertex's values fail to decode
    pub fn build(self) -> Result<FaultSection<L>, ConfigError> {
        self.config.validate()?;
        let normalizer = self.normalizer.as_ref();
        check_scales(normalizer)?;
        let meta = self.law.metadata();

        let prop_stride = meta.db_properties().len();
        let vertices = vertex_count(ValueGroup::Properties, self.raw_properties.len(), prop_stride)?;
        if vertices == 0 {
            return Err(ConfigError::EmptySection);
        }
        check_vertex_limit(vertices)?;

        let mut properties = Vec::with_capacity(vertices);
        for (i, raw) in (0..).zip(self.raw_properties.chunks_exact(prop_stride)) {
            let decoded = self
                .law
                .decode_properties(raw)
                .map_err(|source| ConfigError::Decode {
                    vertex: VertexId(i),
                    source,
                })?;
            properties.push(self.law.nondimensionalize_properties(&decoded, normalizer));
        }

        let state = match &self.raw_state_vars {
            None => vec![SlipState::default(); vertices],
            Some(raw_state) => {
                let state_stride = meta.db_state_vars().len();
                let state_vertices =
                    vertex_count(ValueGroup::StateVars, raw_state.len(), state_stride)?;
                if state_vertices != vertices {
                    return Err(ConfigError::VertexCountMismatch {
                        properties: vertices,
                        state_vars: state_vertices,
                    });
                }
                let mut state = Vec::with_capacity(vertices);
                for (i, raw) in (0..).zip(raw_state.chunks_exact(state_stride)) {
                    let decoded =
                        self.law
                            .decode_state(raw)
                            .map_err(|source| ConfigError::Decode {
                                vertex: VertexId(i),
                                source,
                            })?;
                    state.push(self.law.nondimensionalize_state(&decoded, normalizer));
                }
                state
            }
        };

        debug!(
            law = self.law.name(),
            label = %self.config.label,
            vertices,
            "fault section initialized"
        );

        Ok(FaultSection {
            law: self.law,
            config: self.config,
            normalizer: self.normalizer,
            properties,
            state,
            evaluations: AtomicU64::new(0),
            state_updates: 0,
            resets: 0,
        })
    }
}

fn vertex_count(group: ValueGroup, len: usize, stride: usize) -> Result<usize, ConfigError> {
    if stride == 0 || len % stride != 0 {
        return Err(ConfigError::RaggedArray { group, len, stride });
    }
    Ok(len / stride)
}
