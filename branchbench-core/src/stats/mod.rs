//! Descriptive statistics over trial histories.

use serde::Serialize;
use statrs::statistics::{Data, Median, Statistics};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatsError {
    /// Statistics were requested for a branch that recorded no trials.
    #[error("Cannot summarize an empty trial history")]
    EmptyHistory,
}

/// Mean and median of a trial history, both rounded to 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatSummary {
    pub mean: f64,
    pub median: f64,
}

/// Round to 2 decimal places, exact halves to the even neighbour.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Summarize a non-empty history.
///
/// # Errors
///
/// Returns [`StatsError::EmptyHistory`] if `history` is empty. Callers must
/// supply at least one duration; a dry-run history satisfies this.
pub fn summarize(history: &[f64]) -> Result<StatSummary, StatsError> {
    if history.is_empty() {
        return Err(StatsError::EmptyHistory);
    }

    let mean = history.iter().mean();
    let median = Data::new(history.to_vec()).median();

    Ok(StatSummary {
        mean: round2(mean),
        median: round2(median),
    })
}

/// Percent by which `candidate` is faster than `base`, rounded to 2 decimals.
///
/// Positive means the candidate took less time. `base` must be greater than
/// zero; a zero base produces a non-finite result.
pub fn improvement(base: f64, candidate: f64) -> f64 {
    round2(100.0 * (base - candidate) / base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_single() {
        let summary = summarize(&[1.234]).unwrap();
        assert_eq!(summary.mean, 1.23);
        assert_eq!(summary.median, 1.23);
    }

    #[test]
    fn test_median_odd_length() {
        let summary = summarize(&[9.0, 1.0, 5.0]).unwrap();
        assert_eq!(summary.median, 5.0);
        assert_eq!(summary.mean, 5.0);
    }

    #[test]
    fn test_median_even_length_averages_middle() {
        let summary = summarize(&[4.0, 1.0, 3.0, 10.0]).unwrap();
        assert_eq!(summary.median, 3.5);
        assert_eq!(summary.mean, 4.5);
    }

    #[test]
    fn test_median_order_invariant() {
        let a = summarize(&[2.5, 7.25, 1.0, 4.0, 3.0, 6.5]).unwrap();
        let b = summarize(&[6.5, 1.0, 3.0, 7.25, 2.5, 4.0]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.median, 3.5);
    }

    #[test]
    fn test_summarize_empty() {
        assert_eq!(summarize(&[]), Err(StatsError::EmptyHistory));
    }

    #[test]
    fn test_summarize_rounds_mean() {
        let summary = summarize(&[1.0, 1.0, 2.0]).unwrap();
        assert_eq!(summary.mean, 1.33);
    }

    #[test]
    fn test_exact_halves_round_to_even() {
        let summary = summarize(&[1.0, 1.25]).unwrap();
        assert_eq!(summary.mean, 1.12);
        assert_eq!(summary.median, 1.12);

        assert_eq!(summarize(&[0.125]).unwrap().mean, 0.12);
        assert_eq!(summarize(&[0.375]).unwrap().mean, 0.38);
    }

    #[test]
    fn test_improvement_candidate_faster() {
        assert_eq!(improvement(10.0, 8.0), 20.0);
    }

    #[test]
    fn test_improvement_candidate_slower() {
        assert_eq!(improvement(8.0, 10.0), -25.0);
    }

    #[test]
    fn test_improvement_rounds() {
        assert_eq!(improvement(3.0, 2.0), 33.33);
    }

    #[test]
    fn test_equal_means_and_medians() {
        let a = summarize(&[4.0, 6.0]).unwrap();
        let b = summarize(&[5.0, 5.0]).unwrap();

        assert_eq!(a.mean, 5.0);
        assert_eq!(b.mean, 5.0);
        assert_eq!(a.median, 5.0);
        assert_eq!(b.median, 5.0);
        assert_eq!(improvement(a.mean, b.mean), 0.0);
        assert_eq!(improvement(b.mean, a.mean), 0.0);
    }

    #[test]
    fn test_improvement_zero_base_is_not_finite() {
        assert!(!improvement(0.0, 1.0).is_finite());
    }
}
