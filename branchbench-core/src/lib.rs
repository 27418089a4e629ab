//! Core engine for branchbench.
//!
//! This crate runs repeated timed trials for one branch at a time, estimates
//! the remaining time while doing so, and turns two branches' trial
//! histories into a comparison report. It knows nothing about git, package
//! installation or the command under test; those arrive as [`TrialActions`].

pub mod clock;
pub mod estimate;
pub mod history;
pub mod report;
pub mod runner;
pub mod stats;

// Re-export main types for convenience
pub use clock::{Clock, FixedClock, WallClock};
pub use estimate::{format_remaining, EstimatorPolicy};
pub use history::TrialHistory;
pub use report::{
    comparison_rows, render, Comparison, ComparisonSummary, JsonReporter, ReportError,
    ReportLine, ReportMeta, Reporter, TerminalReporter,
};
pub use runner::{
    run, ActionError, BranchConfig, Phase, RunError, RunEvent, RunObserver, RunState,
    SilentObserver, TracingObserver, TrialActions, TrialRunner,
};
pub use stats::{improvement, summarize, StatSummary, StatsError};
