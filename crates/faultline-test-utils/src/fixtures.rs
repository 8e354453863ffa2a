//! Reusable raw database arrays and slip histories.
//!
//! Raw arrays are dimensional and in database order, exactly as a host
//! would read them from a spatial database.

use faultline_friction::SlipSample;

/// Double slip-weakening properties: `mu_s=0.6, mu_t=0.4, mu_d=0.2,
/// D_t=0.1, D_f=0.5, cohesion=0`.
pub const DOUBLE_SLIP_WEAKENING_RAW: [f64; 6] = [0.6, 0.4, 0.2, 0.1, 0.5, 0.0];

/// Parabolic cohesive zone properties: `mu_s=0.6, mu_d=0.2, D_s=0.1,
/// D_w=0.4, cohesion=0`.
pub const PARABOLIC_COHESIVE_ZONE_RAW: [f64; 5] = [0.6, 0.2, 0.1, 0.4, 0.0];

/// Zero slip history.
pub const ZERO_STATE_RAW: [f64; 2] = [0.0, 0.0];

/// Repeat one vertex's raw values `n` times, vertex-major.
pub fn repeat_vertices(raw: &[f64], n: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(raw.len() * n);
    for _ in 0..n {
        out.extend_from_slice(raw);
    }
    out
}

/// A monotonic slip ramp under constant compression.
///
/// Step `k` (1-based) has slip `k * increment`, slip rate
/// `increment / dt`, and time `k * dt`.
pub fn slip_ramp(steps: usize, increment: f64, dt: f64, normal_traction: f64) -> Vec<SlipSample> {
    (1..=steps)
        .map(|k| {
            SlipSample::new(
                k as f64 * dt,
                k as f64 * increment,
                increment / dt,
                normal_traction,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_is_vertex_major() {
        let raw = repeat_vertices(&[1.0, 2.0], 3);
        assert_eq!(raw, vec![1.0, 2.0, 1.0, 2.0, 1.0, 2.0]);
    }

    #[test]
    fn ramp_is_monotonic() {
        let ramp = slip_ramp(4, 0.05, 0.5, -10.0);
        assert_eq!(ramp.len(), 4);
        assert!(ramp.windows(2).all(|w| w[1].slip > w[0].slip));
        assert!(ramp.iter().all(|s| s.slip_rate == 0.1));
    }
}
