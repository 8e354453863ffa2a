//! Counters for a fault section.
//!
//! [`SectionMetrics`] is a snapshot taken by
//! [`FaultSection::metrics()`](crate::FaultSection::metrics); the section
//! keeps the live counters.

/// Evaluation and state-update counts for one fault section.
///
/// Counts are cumulative since the section was built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SectionMetrics {
    /// Number of vertices in the section.
    pub vertices: usize,
    /// Friction and friction-derivative evaluations.
    pub evaluations: u64,
    /// Estimated floating-point operations spent in evaluations.
    pub flops: u64,
    /// State transitions applied.
    pub state_updates: u64,
    /// State transitions that took the no-heal reset branch.
    pub resets: u64,
}

impl SectionMetrics {
    /// Fraction of state updates that reset cumulative slip.
    ///
    /// Zero when no updates have been applied.
    pub fn reset_ratio(&self) -> f64 {
        if self.state_updates == 0 {
            0.0
        } else {
            self.resets as f64 / self.state_updates as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = SectionMetrics::default();
        assert_eq!(m.vertices, 0);
        assert_eq!(m.evaluations, 0);
        assert_eq!(m.flops, 0);
        assert_eq!(m.state_updates, 0);
        assert_eq!(m.resets, 0);
        assert_eq!(m.reset_ratio(), 0.0);
    }

    #[test]
    fn reset_ratio() {
        let m = SectionMetrics {
            state_updates: 8,
            resets: 2,
            ..SectionMetrics::default()
        };
        assert_eq!(m.reset_ratio(), 0.25);
    }
}
