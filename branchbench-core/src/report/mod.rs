//! Comparison report: statistics for both branches laid out as a text table.

use std::io::Write;

use serde::Serialize;
use thiserror::Error;

use crate::history::TrialHistory;
use crate::stats::{improvement, summarize, StatSummary, StatsError};

mod json;
mod layout;
mod terminal;

pub use json::JsonReporter;
pub use layout::{render, ReportLine, HEADER_LABEL, MIN_SEPARATION};
pub use terminal::TerminalReporter;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Stats(#[from] StatsError),
    /// The table had no key/value row to measure.
    #[error("Report has no value rows to measure")]
    NoValueLines,
}

/// Labels printed above the statistics.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMeta {
    /// The command that was timed.
    pub command: String,
    /// Prefix shown before branch names, usually the repository name.
    pub project: String,
    pub dev_branch: String,
    pub base_branch: String,
}

/// Both branches' results, ready to report.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub meta: ReportMeta,
    pub dev: TrialHistory,
    pub base: TrialHistory,
}

/// Statistic values and the dev-versus-base improvement for one statistic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatComparison {
    pub dev: f64,
    pub base: f64,
    /// Percent by which dev is faster than base; negative when slower.
    pub improvement: f64,
}

impl StatComparison {
    fn new(dev: f64, base: f64) -> Self {
        Self {
            dev,
            base,
            improvement: improvement(base, dev),
        }
    }

    fn lines(&self, name: &str) -> Vec<ReportLine> {
        let verdict = if self.improvement > 0.0 {
            ReportLine::entry("IMPROVED BY", format!("{:.2} %", self.improvement), '.')
        } else {
            ReportLine::entry("DEGRADED BY", format!("{:.2} %", self.improvement.abs()), '.')
        };

        vec![
            ReportLine::entry(format!("{} dev", name), format!("{:.2}", self.dev), '.'),
            ReportLine::entry(format!("{} base", name), format!("{:.2}", self.base), '.'),
            verdict,
            ReportLine::blank(),
        ]
    }
}

/// Machine-readable summary of a comparison.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonSummary {
    #[serde(flatten)]
    pub meta: ReportMeta,
    pub dev: StatSummary,
    pub base: StatSummary,
    pub mean: StatComparison,
    pub median: StatComparison,
    pub dev_runs: TrialHistory,
    pub base_runs: TrialHistory,
}

impl Comparison {
    pub fn new(meta: ReportMeta, dev: TrialHistory, base: TrialHistory) -> Self {
        Self { meta, dev, base }
    }

    /// Summarize both histories.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::EmptyHistory`] if either branch has no trials.
    pub fn summary(&self) -> Result<ComparisonSummary, StatsError> {
        let dev = summarize(self.dev.as_slice())?;
        let base = summarize(self.base.as_slice())?;

        Ok(ComparisonSummary {
            meta: self.meta.clone(),
            dev,
            base,
            mean: StatComparison::new(dev.mean, base.mean),
            median: StatComparison::new(dev.median, base.median),
            dev_runs: self.dev.clone(),
            base_runs: self.base.clone(),
        })
    }

    /// The report table entries, without the header.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::EmptyHistory`] if either branch has no trials.
    pub fn lines(&self) -> Result<Vec<ReportLine>, StatsError> {
        let summary = self.summary()?;
        let meta = &self.meta;

        let mut lines = vec![
            ReportLine::entry("command", meta.command.as_str(), '.'),
            ReportLine::entry(
                "dev branch",
                format!("{}/{}", meta.project, meta.dev_branch),
                '.',
            ),
            ReportLine::entry(
                "base branch",
                format!("{}/{}", meta.project, meta.base_branch),
                '.',
            ),
            ReportLine::blank(),
            ReportLine::heading("time measured in seconds", ' '),
            ReportLine::blank(),
        ];
        lines.extend(summary.mean.lines("mean"));
        lines.extend(summary.median.lines("median"));

        Ok(lines)
    }
}

/// Render the comparison table for two histories.
///
/// # Errors
///
/// Fails if either history is empty.
pub fn comparison_rows(
    meta: &ReportMeta,
    dev: &TrialHistory,
    base: &TrialHistory,
) -> Result<Vec<String>, ReportError> {
    let comparison = Comparison::new(meta.clone(), dev.clone(), base.clone());
    render(&comparison.lines()?)
}

/// Format durations the way raw run lists are printed.
pub fn format_runs(runs: &[f64]) -> String {
    let items: Vec<String> = runs.iter().map(|d| format!("{:?}", d)).collect();
    format!("[{}]", items.join(", "))
}

pub trait Reporter {
    fn report(&self, comparison: &Comparison, writer: &mut dyn Write) -> Result<(), ReportError>;
}
