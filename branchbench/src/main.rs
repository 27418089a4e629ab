use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use branchbench::{
    logging, BranchConfig, Cli, Comparison, Config, EnvironmentBuilder, EstimatorPolicy,
    GitCloneProvider, JsonReporter, ReportMeta, Reporter, ShellActions, SourceProvider,
    TerminalReporter, TracingObserver,
};
use clap::Parser;
use tracing::{debug, info};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // Load config and apply CLI overrides
    let mut config = Config::load_or_default(&cli.config)?;
    cli.apply_to_config(&mut config);
    debug!(?config, "configuration");

    if !cli.json {
        println!();
        println!(":::: branchbench ::::");
    }

    let workspace = absolute(&config.repository.workspace)?;
    let source_provider = GitCloneProvider::new(config.repository.url.clone(), &workspace);

    // 1. Prepare sources, unless reusing a previous workspace
    let (dev_path, base_path) = if cli.cached {
        info!("reusing cached workspace {}", workspace.display());
        (source_provider.dev_path(), source_provider.base_path())
    } else {
        let paths = source_provider
            .prepare_sources(&cli.dev, &cli.base)
            .context("Failed to prepare sources")?;

        // 2. Install both environments
        let builder = EnvironmentBuilder::new(config.environment.install.clone());
        info!("installing dev branch");
        builder
            .install(&paths.0)
            .context("Failed to install dev branch")?;
        info!("installing base branch");
        builder
            .install(&paths.1)
            .context("Failed to install base branch")?;
        paths
    };

    // 3. Run both branches, dev first. Its estimate also covers the base run.
    let runs = config.benchmark.runs as usize;
    let dev = BranchConfig::new(
        "dev",
        &dev_path,
        &cli.dev,
        runs,
        EstimatorPolicy::DoubleRemaining,
    );
    let base = BranchConfig::new(
        "base",
        &base_path,
        &cli.base,
        runs,
        EstimatorPolicy::LinearRemaining,
    );

    let dev_runs = run_branch(&dev, &config)?;
    let base_runs = run_branch(&base, &config)?;

    // 4. Report results
    let comparison = Comparison::new(
        ReportMeta {
            command: config.benchmark.command.clone(),
            project: config.repository.name.clone(),
            dev_branch: cli.dev.clone(),
            base_branch: cli.base.clone(),
        },
        dev_runs,
        base_runs,
    );

    let stdout = io::stdout();
    let mut writer = stdout.lock();
    if cli.json {
        JsonReporter.report(&comparison, &mut writer)?;
    } else if config.report.colors {
        TerminalReporter::new().report(&comparison, &mut writer)?;
    } else {
        TerminalReporter::without_colors().report(&comparison, &mut writer)?;
    }

    // 5. Cleanup
    if cli.clean {
        info!("removing workspace");
        source_provider
            .cleanup()
            .context("Failed to cleanup sources")?;
    }

    Ok(())
}

fn run_branch(branch: &BranchConfig, config: &Config) -> Result<branchbench::TrialHistory> {
    let mut actions = ShellActions::for_checkout(&config.benchmark, &branch.path);
    branchbench::run(branch, &mut actions, &mut TracingObserver)
        .with_context(|| format!("Failed to benchmark {} branch", branch.name))
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    Ok(cwd.join(path))
}
