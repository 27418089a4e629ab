//! branchbench: time a command on two git branches and compare the results.
//!
//! This crate is the shell around `branchbench-core`: it clones the
//! branches, installs their environments, and supplies the shell actions
//! the core runner times.

pub mod actions;
pub mod cli;
pub mod config;
pub mod environment;
pub mod logging;
pub mod source;

// Re-export core types for convenience
pub use branchbench_core::{
    comparison_rows, format_remaining, improvement, run, summarize, BranchConfig, Comparison,
    EstimatorPolicy, JsonReporter, ReportError, ReportMeta, Reporter, RunError, SilentObserver,
    TerminalReporter, TracingObserver, TrialActions, TrialHistory,
};

// Re-export main types from this crate
pub use actions::ShellActions;
pub use cli::Cli;
pub use config::Config;
pub use environment::{EnvironmentBuilder, EnvironmentError};
pub use source::{GitCloneProvider, SourceError, SourceProvider};
