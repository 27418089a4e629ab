use tracing::{debug, info, warn};

use crate::estimate::format_remaining;

/// Lifecycle notifications emitted while a branch runs.
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent<'a> {
    /// The runner left `Idle`.
    Started { branch: &'a str, planned: usize },
    /// Branch-level setup is about to run.
    SetupStarted { branch: &'a str },
    /// Zero trials were planned and a fabricated history was recorded.
    DryRun { branch: &'a str, fabricated: usize },
    /// Trial `trial` of `planned` is about to run (1-based).
    TrialStarted {
        branch: &'a str,
        trial: usize,
        planned: usize,
    },
    /// Trial `trial` finished and was recorded.
    TrialCompleted {
        branch: &'a str,
        trial: usize,
        planned: usize,
        seconds: f64,
        remaining_secs: u64,
    },
    /// Post-trial cleanup is about to run.
    CleanupStarted { branch: &'a str, trial: usize },
    /// The branch reached `Done` with `trials` recorded durations.
    Completed { branch: &'a str, trials: usize },
}

/// Receives [`RunEvent`]s from a runner.
pub trait RunObserver {
    fn notify(&mut self, event: &RunEvent<'_>);
}

impl<F> RunObserver for F
where
    F: FnMut(&RunEvent<'_>),
{
    fn notify(&mut self, event: &RunEvent<'_>) {
        self(event)
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentObserver;

impl RunObserver for SilentObserver {
    fn notify(&mut self, _event: &RunEvent<'_>) {}
}

/// Forwards events to `tracing` as progress log lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl RunObserver for TracingObserver {
    fn notify(&mut self, event: &RunEvent<'_>) {
        match *event {
            RunEvent::Started { branch, planned } => {
                debug!(branch, planned, "starting branch run");
            }
            RunEvent::SetupStarted { branch } => {
                info!("running {} branch setup", branch);
            }
            RunEvent::DryRun { branch, fabricated } => {
                warn!(
                    branch,
                    fabricated, "no trials planned, recording fabricated dry-run durations"
                );
            }
            RunEvent::TrialStarted {
                branch,
                trial,
                planned,
            } => {
                info!("{} run {}/{}", branch, trial, planned);
            }
            RunEvent::TrialCompleted {
                seconds,
                remaining_secs,
                ..
            } => {
                info!("run completed in {} seconds", seconds);
                info!(
                    "estimated time remaining: {}",
                    format_remaining(remaining_secs)
                );
            }
            RunEvent::CleanupStarted { branch, .. } => {
                info!("running {} cleanup", branch);
            }
            RunEvent::Completed { branch, trials } => {
                debug!(branch, trials, "branch run complete");
            }
        }
    }
}
