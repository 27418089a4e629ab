//! Remaining-time estimation for a branch run.

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Policy used to predict how much wall-clock time a run still needs.
///
/// Both policies use the mean of the completed trials and are recomputed
/// from scratch after every trial. Estimates are advisory and never affect
/// scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimatorPolicy {
    /// Only this branch's uncompleted trials remain.
    LinearRemaining,
    /// Twice the planned trial count is outstanding. Used by the branch that
    /// runs first, whose remaining time also covers the other branch's run
    /// of the same size.
    DoubleRemaining,
}

impl EstimatorPolicy {
    /// Estimate the remaining seconds given completed trial durations.
    ///
    /// Returns 0 for an empty history.
    pub fn estimate_remaining(&self, history: &[f64], planned: usize) -> u64 {
        if history.is_empty() {
            return 0;
        }

        let mean = history.iter().mean();
        let outstanding = match self {
            EstimatorPolicy::LinearRemaining => planned as f64 - history.len() as f64,
            EstimatorPolicy::DoubleRemaining => 2.0 * planned as f64 - history.len() as f64,
        };

        // Exact halves go to the even second
        (mean * outstanding).round_ties_even().max(0.0) as u64
    }
}

/// Render a second count for humans, rounding up as the unit grows.
///
/// ```
/// use branchbench_core::format_remaining;
///
/// assert_eq!(format_remaining(45), "45 seconds");
/// assert_eq!(format_remaining(90), "2 minutes");
/// assert_eq!(format_remaining(4000), "2 hours");
/// ```
pub fn format_remaining(seconds: u64) -> String {
    if seconds > 3600 {
        format!("{} hours", seconds.div_ceil(3600))
    } else if seconds > 60 {
        format!("{} minutes", seconds.div_ceil(60))
    } else {
        format!("{} seconds", seconds)
    }
}
