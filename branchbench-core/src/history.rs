//! Recorded trial durations for one branch.

use serde::Serialize;

/// Number of entries in a fabricated dry-run history.
pub const DRY_RUN_TRIALS: usize = 10;

/// Duration, in seconds, of every fabricated dry-run entry.
pub const DRY_RUN_SECONDS: f64 = 1.0;

/// Ordered, append-only trial durations in seconds, in completion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TrialHistory {
    durations: Vec<f64>,
}

impl TrialHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fabricated history used when a branch plans zero trials.
    ///
    /// The values are not measurements. They only keep the statistics and
    /// report pipeline callable without running anything.
    pub fn dry_run() -> Self {
        Self {
            durations: vec![DRY_RUN_SECONDS; DRY_RUN_TRIALS],
        }
    }

    pub(crate) fn push(&mut self, seconds: f64) {
        debug_assert!(seconds >= 0.0, "trial durations are never negative");
        self.durations.push(seconds);
    }

    /// Durations in completion order.
    pub fn as_slice(&self) -> &[f64] {
        &self.durations
    }

    /// A sorted copy of the durations, for display.
    pub fn sorted(&self) -> Vec<f64> {
        let mut sorted = self.durations.clone();
        sorted.sort_by(f64::total_cmp);
        sorted
    }

    pub fn len(&self) -> usize {
        self.durations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }
}

impl From<Vec<f64>> for TrialHistory {
    fn from(durations: Vec<f64>) -> Self {
        Self { durations }
    }
}
