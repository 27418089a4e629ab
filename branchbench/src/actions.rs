//! Shell-backed trial actions.

use std::path::{Path, PathBuf};

use branchbench_core::{ActionError, TrialActions};
use tracing::debug;

use crate::config::BenchmarkConfig;
use crate::environment::{run_shell, ShellFailure};

/// Times a shell command against one checkout.
///
/// Setup and cleanup delete the cache artifact so no run reuses state left
/// by the previous one.
#[derive(Debug, Clone)]
pub struct ShellActions {
    /// Full command line passed to `sh -c`.
    command: String,
    /// Directory the command runs in.
    working_dir: PathBuf,
    cache_artifact: Option<PathBuf>,
}

impl ShellActions {
    /// Actions that run `benchmark.command` with `checkout`'s activation
    /// script sourced first.
    pub fn for_checkout(benchmark: &BenchmarkConfig, checkout: &Path) -> Self {
        let command = match &benchmark.activate {
            Some(script) => format!(
                ". {} && {}",
                checkout.join(script).display(),
                benchmark.command
            ),
            None => benchmark.command.clone(),
        };

        Self {
            command,
            working_dir: benchmark.working_dir.clone(),
            cache_artifact: benchmark.cache_artifact.clone(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    fn remove_cache_artifact(&self) -> Result<(), ActionError> {
        if let Some(path) = &self.cache_artifact {
            if path.exists() {
                debug!(path = %path.display(), "removing cache artifact");
                std::fs::remove_file(path)?;
            }
        }
        Ok(())
    }
}

impl TrialActions for ShellActions {
    fn setup(&mut self) -> Result<(), ActionError> {
        self.remove_cache_artifact()
    }

    fn trial(&mut self) -> Result<(), ActionError> {
        run_shell(&self.command, &self.working_dir).map_err(|e| match e {
            ShellFailure::Io(err) => ActionError::Io(err),
            ShellFailure::Exit(output) => {
                ActionError::Failed(format!("`{}` exited with {}", self.command, output))
            }
        })
    }

    fn cleanup(&mut self) -> Result<(), ActionError> {
        self.remove_cache_artifact()
    }
}
