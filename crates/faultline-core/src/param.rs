//! Parameter descriptors and the per-model [`Metadata`] registry.
//!
//! A friction model declares its physical properties and state variables
//! as static descriptor tables. The host uses them to allocate and label
//! per-vertex storage; the model uses them to check raw array arity and to
//! decide which values the normalizer rescales.

use crate::error::{DecodeError, ValueGroup};
use smallvec::SmallVec;

/// Layout of a single parameter's values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamKind {
    /// A single floating-point value per vertex.
    Scalar,
    /// A fixed-size vector of floating-point values per vertex.
    ///
    /// The built-in laws are all scalar; this exists for models with
    /// directional parameters such as a slip-direction bias.
    Vector {
        /// Number of components in the vector.
        dims: u32,
    },
}

impl ParamKind {
    /// Returns the number of storage slots this parameter requires per vertex.
    pub fn components(&self) -> usize {
        match self {
            Self::Scalar => 1,
            Self::Vector { dims } => *dims as usize,
        }
    }
}

/// Physical dimension of a parameter, selecting its normalizer scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dimension {
    /// Passes through nondimensionalization unchanged (e.g. a friction coefficient).
    Dimensionless,
    /// Scaled by the length scale.
    Length,
    /// Scaled by the time scale.
    ///
    /// Unused by the slip-weakening laws; rate- and time-dependent models
    /// declare their characteristic times with it.
    Time,
    /// Scaled by the pressure scale.
    Pressure,
}

/// Describes one named parameter in a model's property or state table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParamDescription {
    /// Name used by the spatial database and for output.
    pub name: &'static str,
    /// Value layout.
    pub kind: ParamKind,
    /// Physical dimension.
    pub dimension: Dimension,
}

impl ParamDescription {
    /// Describe a scalar parameter.
    pub const fn scalar(name: &'static str, dimension: Dimension) -> Self {
        Self {
            name,
            kind: ParamKind::Scalar,
            dimension,
        }
    }

    /// Number of values this parameter occupies.
    pub fn arity(&self) -> usize {
        self.kind.components()
    }
}

/// Names of the per-vertex fields a model can write to output.
///
/// `info` fields are the physical properties, `data` fields the state
/// variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AvailableFields {
    /// Property names.
    pub info: SmallVec<[&'static str; 8]>,
    /// State variable names.
    pub data: SmallVec<[&'static str; 4]>,
}

/// Static registry of a friction model's properties and state variables.
///
/// Every model owns one `&'static Metadata`; it is never mutated.
#[derive(Debug)]
pub struct Metadata {
    properties: &'static [ParamDescription],
    state_vars: &'static [ParamDescription],
    db_properties: &'static [&'static str],
    db_state_vars: &'static [&'static str],
}

impl Metadata {
    /// Build a registry from static descriptor tables.
    ///
    /// `db_properties` and `db_state_vars` are the value names expected in
    /// the spatial database, in the order raw arrays are supplied.
    pub const fn new(
        properties: &'static [ParamDescription],
        state_vars: &'static [ParamDescription],
        db_properties: &'static [&'static str],
        db_state_vars: &'static [&'static str],
    ) -> Self {
        Self {
            properties,
            state_vars,
            db_properties,
            db_state_vars,
        }
    }

    /// Stored property descriptors, in storage order.
    pub fn properties(&self) -> &'static [ParamDescription] {
        self.properties
    }

    /// Stored state variable descriptors, in storage order.
    pub fn state_vars(&self) -> &'static [ParamDescription] {
        self.state_vars
    }

    /// Property value names expected in the spatial database.
    pub fn db_properties(&self) -> &'static [&'static str] {
        self.db_properties
    }

    /// State value names expected in the spatial database.
    pub fn db_state_vars(&self) -> &'static [&'static str] {
        self.db_state_vars
    }

    /// Total number of stored property values per vertex.
    pub fn num_properties(&self) -> usize {
        self.properties.iter().map(ParamDescription::arity).sum()
    }

    /// Total number of stored state values per vertex.
    pub fn num_state_vars(&self) -> usize {
        self.state_vars.iter().map(ParamDescription::arity).sum()
    }

    /// Offset of the named property in a vertex's flat property values.
    pub fn property_index(&self, name: &str) -> Option<usize> {
        offset_of(self.properties, name)
    }

    /// Offset of the named state variable in a vertex's flat state values.
    pub fn state_var_index(&self, name: &str) -> Option<usize> {
        offset_of(self.state_vars, name)
    }

    /// Check a raw database property array's length.
    pub fn check_properties_arity(&self, len: usize) -> Result<(), DecodeError> {
        check_arity(ValueGroup::Properties, self.db_properties.len(), len)
    }

    /// Check a raw database state array's length.
    pub fn check_state_vars_arity(&self, len: usize) -> Result<(), DecodeError> {
        check_arity(ValueGroup::StateVars, self.db_state_vars.len(), len)
    }

    /// Fields available for per-vertex output.
    pub fn available_fields(&self) -> AvailableFields {
        AvailableFields {
            info: self.properties.iter().map(|p| p.name).collect(),
            data: self.state_vars.iter().map(|p| p.name).collect(),
        }
    }
}

fn offset_of(table: &[ParamDescription], name: &str) -> Option<usize> {
    let mut offset = 0;
    for desc in table {
        if desc.name == name {
            return Some(offset);
        }
        offset += desc.arity();
    }
    None
}

fn check_arity(group: ValueGroup, expected: usize, got: usize) -> Result<(), DecodeError> {
    if expected == got {
        Ok(())
    } else {
        Err(DecodeError::Arity {
            group,
            expected,
            got,
        })
    }
}
