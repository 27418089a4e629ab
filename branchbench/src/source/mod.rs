use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to prepare workspace: {0}")]
    Workspace(String),
    #[error("Failed to clone ref '{0}': {1}")]
    Clone(String, String),
    #[error("Failed to cleanup: {0}")]
    Cleanup(String),
    #[error("Git command failed: {0}")]
    GitCommand(String),
}

/// Produces a checkout for each branch slot.
pub trait SourceProvider {
    /// Check out `dev` and `base`, returning their paths in that order.
    fn prepare_sources(&self, dev: &str, base: &str) -> Result<(PathBuf, PathBuf), SourceError>;
    fn cleanup(&self) -> Result<(), SourceError>;
}

mod git;
pub use git::GitCloneProvider;
