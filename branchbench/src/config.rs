//! Configuration loading for branchbench.
//!
//! Supports loading configuration from TOML files, with defaults that
//! reproduce the classic dbt `parse` comparison.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration for branchbench.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the branches come from and where they are checked out.
    pub repository: RepositoryConfig,
    /// What is timed and how often.
    pub benchmark: BenchmarkConfig,
    /// Commands that prepare each checkout before timing.
    pub environment: EnvironmentConfig,
    /// Report output settings.
    pub report: ReportConfig,
}

/// Configuration for the repository under test.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Clone URL for both branches.
    pub url: String,
    /// Name shown before branch names in the report.
    pub name: String,
    /// Directory holding the `dev` and `base` checkouts.
    pub workspace: PathBuf,
}

/// Configuration for the timed command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Shell command that is timed.
    pub command: String,
    /// Number of timed runs per branch. Zero fabricates placeholder data.
    pub runs: u32,
    /// Activation script, relative to each checkout, sourced before the command.
    pub activate: Option<String>,
    /// Directory the command runs in.
    pub working_dir: PathBuf,
    /// File removed before the first run and after every run.
    pub cache_artifact: Option<PathBuf>,
}

/// Configuration for preparing each checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Shell commands run in order inside each checkout.
    pub install: Vec<String>,
}

/// Configuration for report output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Whether to color the verdict rows.
    pub colors: bool,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            url: "git@github.com:fishtown-analytics/dbt".to_string(),
            name: "dbt".to_string(),
            workspace: PathBuf::from("target"),
        }
    }
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            command: "dbt parse".to_string(),
            runs: 10,
            activate: Some("env/bin/activate".to_string()),
            working_dir: PathBuf::from("."),
            cache_artifact: Some(PathBuf::from("target/partial_parse.pickle")),
        }
    }
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            install: vec![
                "python3 -m venv env".to_string(),
                ". env/bin/activate && pip install --upgrade pip".to_string(),
                ". env/bin/activate && pip install -r requirements.txt -r dev_requirements.txt"
                    .to_string(),
            ],
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { colors: true }
    }
}

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = ".branchbench.toml";

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Config> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration from `path` if it exists, otherwise use defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Config> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Config::default())
        }
    }
}
