//! Benchmark profiles for the Faultline friction laws.
//!
//! Every generator is seeded, so a profile is reproducible across runs:
//!
//! - [`linear_population`] / [`parabolic_population`]: raw per-vertex
//!   property arrays that satisfy each law's decode invariants
//! - [`trial_samples`]: compressive trial samples with mixed slip direction
//! - [`reference_profile`]: 10K-vertex sections of both laws

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use faultline_friction::{ConfigError, FaultSection, SlipSample};
use faultline_laws::{DoubleSlipWeakening, ParabolicCohesiveZone};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Vertex count of the reference profile.
pub const REFERENCE_VERTICES: usize = 10_000;

/// Raw double slip-weakening properties for `n` vertices.
///
/// `D_f` is always beyond `D_t`, and roughly one vertex in four has
/// non-zero cohesion.
pub fn linear_population(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut raw = Vec::with_capacity(n * 6);
    for _ in 0..n {
        let transition = rng.random_range(0.01..0.2);
        raw.extend_from_slice(&[
            rng.random_range(0.5..0.8),
            rng.random_range(0.3..0.5),
            rng.random_range(0.1..0.3),
            transition,
            transition + rng.random_range(0.05..0.5),
            cohesion(&mut rng),
        ]);
    }
    raw
}

/// Raw parabolic cohesive-zone properties for `n` vertices.
pub fn parabolic_population(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut raw = Vec::with_capacity(n * 5);
    for _ in 0..n {
        raw.extend_from_slice(&[
            rng.random_range(0.5..0.8),
            rng.random_range(0.1..0.3),
            rng.random_range(0.01..0.1),
            rng.random_range(0.1..0.5),
            cohesion(&mut rng),
        ]);
    }
    raw
}

fn cohesion(rng: &mut ChaCha8Rng) -> f64 {
    if rng.random_bool(0.25) {
        rng.random_range(0.0..1.0)
    } else {
        0.0
    }
}

/// One compressive trial sample per vertex.
///
/// Slip spans both weakening regions and the dynamic plateau; about one
/// sample in ten has a negative slip rate.
pub fn trial_samples(n: usize, seed: u64) -> Vec<SlipSample> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let slip_rate = if rng.random_bool(0.1) {
                -rng.random_range(1e-6..1e-3)
            } else {
                rng.random_range(0.0..1.0)
            };
            SlipSample::new(
                0.0,
                rng.random_range(-0.2..1.2),
                slip_rate,
                -rng.random_range(1.0..100.0),
            )
        })
        .collect()
}

/// Sections of both laws over [`REFERENCE_VERTICES`] vertices.
///
/// # Errors
///
/// Propagates [`ConfigError`] from building either section.
pub fn reference_profile(
    seed: u64,
) -> Result<
    (
        FaultSection<DoubleSlipWeakening>,
        FaultSection<ParabolicCohesiveZone>,
    ),
    ConfigError,
> {
    let linear = FaultSection::builder(DoubleSlipWeakening)
        .label("reference-linear")
        .raw_properties(linear_population(REFERENCE_VERTICES, seed))
        .build()?;
    let parabolic = FaultSection::builder(ParabolicCohesiveZone)
        .label("reference-parabolic")
        .raw_properties(parabolic_population(REFERENCE_VERTICES, seed))
        .build()?;
    Ok((linear, parabolic))
}
