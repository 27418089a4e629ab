use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use super::{SourceError, SourceProvider};

/// A source provider that clones each branch into its own directory.
///
/// Checkouts live at `{workspace}/dev` and `{workspace}/base`. Existing
/// checkouts are removed before cloning so every run starts clean.
#[derive(Debug)]
pub struct GitCloneProvider {
    /// URL both branches are cloned from.
    url: String,
    /// Directory holding both checkouts.
    workspace: PathBuf,
}

impl GitCloneProvider {
    pub fn new(url: impl Into<String>, workspace: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            workspace: workspace.into(),
        }
    }

    /// Get the path for the dev checkout.
    pub fn dev_path(&self) -> PathBuf {
        self.workspace.join("dev")
    }

    /// Get the path for the base checkout.
    pub fn base_path(&self) -> PathBuf {
        self.workspace.join("base")
    }

    /// Run a git command and return its trimmed stdout.
    fn run_git_command(&self, args: &[&str]) -> Result<String, SourceError> {
        debug!(args = ?args, "running git");
        let output = Command::new("git")
            .args(args)
            .output()
            .map_err(|e| SourceError::GitCommand(format!("Failed to run git: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SourceError::GitCommand(format!(
                "git {} failed: {}",
                args.join(" "),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Remove `path` if present and create it empty.
    fn recreate_dir(path: &Path) -> Result<(), SourceError> {
        if path.exists() {
            std::fs::remove_dir_all(path).map_err(|e| {
                SourceError::Workspace(format!("Failed to remove {}: {}", path.display(), e))
            })?;
        }
        std::fs::create_dir_all(path).map_err(|e| {
            SourceError::Workspace(format!("Failed to create {}: {}", path.display(), e))
        })
    }

    /// Clone `git_ref` into `path`.
    fn clone_branch(&self, path: &Path, git_ref: &str) -> Result<(), SourceError> {
        let path_str = path.to_string_lossy();
        self.run_git_command(&["clone", "--branch", git_ref, &self.url, &path_str])
            .map_err(|e| SourceError::Clone(git_ref.to_string(), e.to_string()))?;
        Ok(())
    }
}

impl SourceProvider for GitCloneProvider {
    fn prepare_sources(&self, dev: &str, base: &str) -> Result<(PathBuf, PathBuf), SourceError> {
        info!("setting up directories");
        let dev_path = self.dev_path();
        let base_path = self.base_path();

        Self::recreate_dir(&dev_path)?;
        Self::recreate_dir(&base_path)?;

        info!("cloning both branches with local identity");
        self.clone_branch(&dev_path, dev)?;
        self.clone_branch(&base_path, base)?;

        Ok((dev_path, base_path))
    }

    fn cleanup(&self) -> Result<(), SourceError> {
        for path in [self.dev_path(), self.base_path()] {
            if path.exists() {
                std::fs::remove_dir_all(&path).map_err(|e| {
                    SourceError::Cleanup(format!("Failed to remove {}: {}", path.display(), e))
                })?;
            }
        }

        // Remove the workspace directory if it's empty
        if let Ok(mut entries) = std::fs::read_dir(&self.workspace) {
            if entries.next().is_none() {
                let _ = std::fs::remove_dir(&self.workspace);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_checkout_paths() {
        let provider = GitCloneProvider::new("git@example.com:repo", "/test/work");

        assert_eq!(provider.dev_path(), PathBuf::from("/test/work/dev"));
        assert_eq!(provider.base_path(), PathBuf::from("/test/work/base"));
    }

    #[test]
    fn test_recreate_dir_empties_existing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dev");
        std::fs::create_dir_all(&path).unwrap();
        std::fs::write(path.join("stale.txt"), "old").unwrap();

        GitCloneProvider::recreate_dir(&path).unwrap();

        assert!(path.is_dir());
        assert_eq!(std::fs::read_dir(&path).unwrap().count(), 0);
    }

    #[test]
    fn test_cleanup_removes_checkouts_and_empty_workspace() {
        let temp_dir = TempDir::new().unwrap();
        let workspace = temp_dir.path().join("work");
        let provider = GitCloneProvider::new("unused", &workspace);
        std::fs::create_dir_all(provider.dev_path().join("src")).unwrap();
        std::fs::create_dir_all(provider.base_path()).unwrap();

        provider.cleanup().unwrap();

        assert!(!provider.dev_path().exists());
        assert!(!provider.base_path().exists());
        assert!(!workspace.exists());
    }

    #[test]
    fn test_cleanup_keeps_nonempty_workspace() {
        let temp_dir = TempDir::new().unwrap();
        let provider = GitCloneProvider::new("unused", temp_dir.path());
        std::fs::write(temp_dir.path().join("keep.txt"), "x").unwrap();

        provider.cleanup().unwrap();

        assert!(temp_dir.path().join("keep.txt").exists());
    }

    #[test]
    fn test_clone_from_missing_remote_fails() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("no-such-repo");
        let provider =
            GitCloneProvider::new(missing.to_string_lossy().to_string(), temp_dir.path().join("w"));

        let result = provider.prepare_sources("main", "develop");
        assert!(matches!(
            result,
            Err(SourceError::Clone(_, _)) | Err(SourceError::GitCommand(_))
        ));
    }
}
