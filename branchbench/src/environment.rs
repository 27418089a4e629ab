//! Environment setup for checked-out branches.
//!
//! Each checkout gets its dependencies installed by running the configured
//! shell commands inside it, in order.

use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while preparing an environment.
#[derive(Debug, Error)]
pub enum EnvironmentError {
    /// The checkout directory does not exist.
    #[error("Checkout not found: {0}")]
    MissingCheckout(PathBuf),
    /// An install command exited unsuccessfully.
    #[error("Install command `{command}` failed in {path}: {output}")]
    CommandFailed {
        command: String,
        path: PathBuf,
        output: String,
    },
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Runs install commands inside a checkout.
#[derive(Debug)]
pub struct EnvironmentBuilder {
    /// Shell commands run in order.
    commands: Vec<String>,
}

impl EnvironmentBuilder {
    pub fn new(commands: Vec<String>) -> Self {
        Self { commands }
    }

    /// Install the environment for the checkout at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` does not exist or any command fails. Later
    /// commands are not run after a failure.
    pub fn install(&self, path: &Path) -> Result<(), EnvironmentError> {
        if !path.is_dir() {
            return Err(EnvironmentError::MissingCheckout(path.to_path_buf()));
        }

        info!("installing {}", path.display());
        for command in &self.commands {
            run_shell(command, path).map_err(|e| match e {
                ShellFailure::Io(err) => EnvironmentError::Io(err),
                ShellFailure::Exit(output) => EnvironmentError::CommandFailed {
                    command: command.clone(),
                    path: path.to_path_buf(),
                    output,
                },
            })?;
        }

        Ok(())
    }
}

/// Why a shell command did not succeed.
#[derive(Debug)]
pub(crate) enum ShellFailure {
    Io(std::io::Error),
    /// Non-zero exit; carries the status and captured output.
    Exit(String),
}

/// Run `command` with `sh -c` in `dir`, capturing its output.
pub(crate) fn run_shell(command: &str, dir: &Path) -> Result<(), ShellFailure> {
    debug!(command, dir = %dir.display(), "running shell command");
    let output = Command::new("sh")
        .arg("-c")
        .arg(command)
        .current_dir(dir)
        .output()
        .map_err(ShellFailure::Io)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        return Err(ShellFailure::Exit(format!(
            "{}:\n{}\n{}",
            output.status,
            stdout.trim(),
            stderr.trim()
        )));
    }

    Ok(())
}
