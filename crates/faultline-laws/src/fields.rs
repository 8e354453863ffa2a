//! Descriptor tables for the built-in friction laws.
//!
//! Table order is the order of raw database arrays and of flattened
//! property records. Changing it breaks every stored database.

use faultline_core::{Dimension, Metadata, ParamDescription};

/// Static friction coefficient (dimensionless).
pub const STATIC_COEFFICIENT: &str = "static_coefficient";
/// Transition friction coefficient (dimensionless).
pub const TRANSITION_COEFFICIENT: &str = "transition_coefficient";
/// Dynamic friction coefficient (dimensionless).
pub const DYNAMIC_COEFFICIENT: &str = "dynamic_coefficient";
/// Slip distance at which the transition coefficient is reached (length).
pub const TRANSITION_SLIP_DISTANCE: &str = "transition_slip_distance";
/// Slip distance at which the dynamic coefficient is reached (length).
pub const FINAL_SLIP_DISTANCE: &str = "final_slip_distance";
/// Slip-strengthening distance of the parabola's vertex (length).
pub const SLIP_SHIFT: &str = "slip_shift";
/// Slip-weakening distance from the vertex to the dynamic coefficient (length).
pub const SLIP_STRETCH: &str = "slip_stretch";
/// Cohesion (pressure).
pub const COHESION: &str = "cohesion";
/// Slip accumulated since sliding last stopped (length).
pub const CUMULATIVE_SLIP: &str = "cumulative_slip";
/// Total slip at the last accepted step (length).
pub const PREVIOUS_SLIP: &str = "previous_slip";

static SLIP_STATE_VARS: [ParamDescription; 2] = [
    ParamDescription::scalar(CUMULATIVE_SLIP, Dimension::Length),
    ParamDescription::scalar(PREVIOUS_SLIP, Dimension::Length),
];

static DB_SLIP_STATE_VARS: [&str; 2] = [CUMULATIVE_SLIP, PREVIOUS_SLIP];

static DOUBLE_SLIP_WEAKENING_PROPERTIES: [ParamDescription; 6] = [
    ParamDescription::scalar(STATIC_COEFFICIENT, Dimension::Dimensionless),
    ParamDescription::scalar(TRANSITION_COEFFICIENT, Dimension::Dimensionless),
    ParamDescription::scalar(DYNAMIC_COEFFICIENT, Dimension::Dimensionless),
    ParamDescription::scalar(TRANSITION_SLIP_DISTANCE, Dimension::Length),
    ParamDescription::scalar(FINAL_SLIP_DISTANCE, Dimension::Length),
    ParamDescription::scalar(COHESION, Dimension::Pressure),
];

static DB_DOUBLE_SLIP_WEAKENING_PROPERTIES: [&str; 6] = [
    STATIC_COEFFICIENT,
    TRANSITION_COEFFICIENT,
    DYNAMIC_COEFFICIENT,
    TRANSITION_SLIP_DISTANCE,
    FINAL_SLIP_DISTANCE,
    COHESION,
];

static PARABOLIC_COHESIVE_ZONE_PROPERTIES: [ParamDescription; 5] = [
    ParamDescription::scalar(STATIC_COEFFICIENT, Dimension::Dimensionless),
    ParamDescription::scalar(DYNAMIC_COEFFICIENT, Dimension::Dimensionless),
    ParamDescription::scalar(SLIP_SHIFT, Dimension::Length),
    ParamDescription::scalar(SLIP_STRETCH, Dimension::Length),
    ParamDescription::scalar(COHESION, Dimension::Pressure),
];

static DB_PARABOLIC_COHESIVE_ZONE_PROPERTIES: [&str; 5] = [
    STATIC_COEFFICIENT,
    DYNAMIC_COEFFICIENT,
    SLIP_SHIFT,
    SLIP_STRETCH,
    COHESION,
];

/// Registry of [`DoubleSlipWeakening`](crate::DoubleSlipWeakening).
pub static DOUBLE_SLIP_WEAKENING: Metadata = Metadata::new(
    &DOUBLE_SLIP_WEAKENING_PROPERTIES,
    &SLIP_STATE_VARS,
    &DB_DOUBLE_SLIP_WEAKENING_PROPERTIES,
    &DB_SLIP_STATE_VARS,
);

/// Registry of [`ParabolicCohesiveZone`](crate::ParabolicCohesiveZone).
pub static PARABOLIC_COHESIVE_ZONE: Metadata = Metadata::new(
    &PARABOLIC_COHESIVE_ZONE_PROPERTIES,
    &SLIP_STATE_VARS,
    &DB_PARABOLIC_COHESIVE_ZONE_PROPERTIES,
    &DB_SLIP_STATE_VARS,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_slip_weakening_order() {
        let names: Vec<_> = DOUBLE_SLIP_WEAKENING
            .properties()
            .iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(
            names,
            [
                "static_coefficient",
                "transition_coefficient",
                "dynamic_coefficient",
                "transition_slip_distance",
                "final_slip_distance",
                "cohesion",
            ]
        );
        assert_eq!(DOUBLE_SLIP_WEAKENING.num_properties(), 6);
        assert_eq!(DOUBLE_SLIP_WEAKENING.db_properties(), names.as_slice());
    }

    #[test]
    fn parabolic_order() {
        let names: Vec<_> = PARABOLIC_COHESIVE_ZONE
            .properties()
            .iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(
            names,
            ["static_coefficient", "dynamic_coefficient", "slip_shift", "slip_stretch", "cohesion"]
        );
        assert_eq!(PARABOLIC_COHESIVE_ZONE.num_properties(), 5);
        assert_eq!(PARABOLIC_COHESIVE_ZONE.db_properties(), names.as_slice());
    }

    #[test]
    fn both_laws_share_slip_state() {
        for meta in [&DOUBLE_SLIP_WEAKENING, &PARABOLIC_COHESIVE_ZONE] {
            assert_eq!(meta.num_state_vars(), 2);
            assert_eq!(meta.state_var_index("cumulative_slip"), Some(0));
            assert_eq!(meta.state_var_index("previous_slip"), Some(1));
            assert_eq!(meta.db_state_vars(), &["cumulative_slip", "previous_slip"]);
        }
    }

    #[test]
    fn only_distances_and_cohesion_carry_units() {
        for desc in DOUBLE_SLIP_WEAKENING
            .properties()
            .iter()
            .chain(PARABOLIC_COHESIVE_ZONE.properties())
        {
            let expected = match desc.name {
                COHESION => Dimension::Pressure,
                n if n.ends_with("_coefficient") => Dimension::Dimensionless,
                _ => Dimension::Length,
            };
            assert_eq!(desc.dimension, expected, "{}", desc.name);
        }
    }
}
