//! Per-branch trial runner.
//!
//! A [`TrialRunner`] drives one branch through branch setup, a fixed number
//! of timed trials and completion. Trials run strictly one after another;
//! any failing action aborts the branch without retrying.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::clock::{Clock, WallClock};
use crate::estimate::EstimatorPolicy;
use crate::history::{TrialHistory, DRY_RUN_TRIALS};

mod events;
pub use events::{RunEvent, RunObserver, SilentObserver, TracingObserver};

/// Failure reported by a caller-supplied action.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Failed(String),
}

/// The caller-supplied actions a branch run invokes.
///
/// The runner knows nothing about what these do; the shell implements them
/// with filesystem and subprocess operations, tests with stubs.
pub trait TrialActions {
    /// Branch-level setup, run once before the first trial.
    fn setup(&mut self) -> Result<(), ActionError>;

    /// Per-trial preparation, run before each timed trial. Not timed.
    fn prepare_trial(&mut self) -> Result<(), ActionError> {
        Ok(())
    }

    /// The action being timed.
    fn trial(&mut self) -> Result<(), ActionError>;

    /// Run after each trial.
    fn cleanup(&mut self) -> Result<(), ActionError>;
}

/// The action that was running when a branch failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Setup,
    TrialSetup,
    Trial,
    Cleanup,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Setup => "setup",
            Phase::TrialSetup => "trial setup",
            Phase::Trial => "trial",
            Phase::Cleanup => "cleanup",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum RunError {
    /// An action failed and the branch run was aborted.
    #[error("{branch} {phase} failed{}: {source}", trial_suffix(.trial))]
    Action {
        branch: String,
        phase: Phase,
        /// 1-based trial index, `None` for branch-level setup.
        trial: Option<usize>,
        #[source]
        source: ActionError,
    },
}

fn trial_suffix(trial: &Option<usize>) -> String {
    match trial {
        Some(n) => format!(" on run {}", n),
        None => String::new(),
    }
}

/// Identity and plan for one branch.
#[derive(Debug, Clone)]
pub struct BranchConfig {
    /// Short name used in progress output (e.g. "dev").
    pub name: String,
    /// Where the branch's sources live. Not used by the runner.
    pub path: PathBuf,
    /// Git reference the sources were checked out at. Not used by the runner.
    pub git_ref: String,
    /// Number of timed trials; 0 selects dry-run mode.
    pub planned: usize,
    pub estimator: EstimatorPolicy,
}

impl BranchConfig {
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        git_ref: impl Into<String>,
        planned: usize,
        estimator: EstimatorPolicy,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            git_ref: git_ref.into(),
            planned,
            estimator,
        }
    }

    /// Whether this branch fabricates its history instead of running trials.
    pub fn is_dry_run(&self) -> bool {
        self.planned < 1
    }
}

/// Position of a runner in its lifecycle. Trial indices are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    SetupRunning,
    TrialSetup { trial: usize },
    TrialExecuting { trial: usize },
    TrialCleanup { trial: usize },
    Done,
    Failed,
}

impl RunState {
    /// Whether no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Done | RunState::Failed)
    }
}

/// Steppable state machine running one branch.
pub struct TrialRunner<'c, C = WallClock> {
    config: &'c BranchConfig,
    clock: C,
    state: RunState,
    history: TrialHistory,
}

impl<'c> TrialRunner<'c, WallClock> {
    /// Create a runner timed by the wall clock.
    pub fn new(config: &'c BranchConfig) -> Self {
        Self::with_clock(config, WallClock)
    }
}

impl<'c, C: Clock> TrialRunner<'c, C> {
    /// Create a runner timed by `clock`.
    pub fn with_clock(config: &'c BranchConfig, clock: C) -> Self {
        Self {
            config,
            clock,
            state: RunState::Idle,
            history: TrialHistory::new(),
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Durations recorded so far.
    pub fn history(&self) -> &TrialHistory {
        &self.history
    }

    /// Perform one transition and return the new state.
    ///
    /// Stepping a runner in a terminal state does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Action`] if the action run by this transition
    /// fails. The runner is then `Failed`.
    pub fn step<A, O>(&mut self, actions: &mut A, observer: &mut O) -> Result<RunState, RunError>
    where
        A: TrialActions + ?Sized,
        O: RunObserver + ?Sized,
    {
        let config: &'c BranchConfig = self.config;
        let branch = config.name.as_str();
        let planned = config.planned;

        let next = match self.state {
            RunState::Idle => {
                observer.notify(&RunEvent::Started { branch, planned });
                RunState::SetupRunning
            }
            RunState::SetupRunning => {
                observer.notify(&RunEvent::SetupStarted { branch });
                self.guard(Phase::Setup, None, actions.setup())?;

                if config.is_dry_run() {
                    self.history = TrialHistory::dry_run();
                    observer.notify(&RunEvent::DryRun {
                        branch,
                        fabricated: DRY_RUN_TRIALS,
                    });
                    self.finish(observer)
                } else {
                    RunState::TrialSetup { trial: 1 }
                }
            }
            RunState::TrialSetup { trial } => {
                observer.notify(&RunEvent::TrialStarted {
                    branch,
                    trial,
                    planned,
                });
                self.guard(Phase::TrialSetup, Some(trial), actions.prepare_trial())?;
                RunState::TrialExecuting { trial }
            }
            RunState::TrialExecuting { trial } => {
                let measured = self.clock.measure(|| actions.trial());
                let seconds = self.guard(Phase::Trial, Some(trial), measured)?;
                self.history.push(seconds);

                let remaining_secs = config
                    .estimator
                    .estimate_remaining(self.history.as_slice(), planned);
                observer.notify(&RunEvent::TrialCompleted {
                    branch,
                    trial,
                    planned,
                    seconds,
                    remaining_secs,
                });
                RunState::TrialCleanup { trial }
            }
            RunState::TrialCleanup { trial } => {
                observer.notify(&RunEvent::CleanupStarted { branch, trial });
                self.guard(Phase::Cleanup, Some(trial), actions.cleanup())?;

                if trial >= planned {
                    self.finish(observer)
                } else {
                    RunState::TrialSetup { trial: trial + 1 }
                }
            }
            RunState::Done | RunState::Failed => self.state,
        };

        self.state = next;
        Ok(next)
    }

    /// Step until the branch is done and return its history.
    ///
    /// # Errors
    ///
    /// Returns the first action failure; no partial history is returned.
    pub fn run_to_completion<A, O>(
        mut self,
        actions: &mut A,
        observer: &mut O,
    ) -> Result<TrialHistory, RunError>
    where
        A: TrialActions + ?Sized,
        O: RunObserver + ?Sized,
    {
        while !self.state.is_terminal() {
            self.step(actions, observer)?;
        }
        Ok(self.history)
    }

    fn finish<O: RunObserver + ?Sized>(&self, observer: &mut O) -> RunState {
        observer.notify(&RunEvent::Completed {
            branch: &self.config.name,
            trials: self.history.len(),
        });
        RunState::Done
    }

    fn guard<T>(
        &mut self,
        phase: Phase,
        trial: Option<usize>,
        result: Result<T, ActionError>,
    ) -> Result<T, RunError> {
        result.map_err(|source| {
            self.state = RunState::Failed;
            RunError::Action {
                branch: self.config.name.clone(),
                phase,
                trial,
                source,
            }
        })
    }
}

/// Run a branch to completion using the wall clock.
///
/// # Errors
///
/// Returns [`RunError::Action`] as soon as any action fails.
pub fn run<A, O>(
    config: &BranchConfig,
    actions: &mut A,
    observer: &mut O,
) -> Result<TrialHistory, RunError>
where
    A: TrialActions + ?Sized,
    O: RunObserver + ?Sized,
{
    TrialRunner::new(config).run_to_completion(actions, observer)
}
