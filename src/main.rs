use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use u_deadline::config::ExperimentConfig;
use u_deadline::experiment::{compare_policies, sweep, ComparisonReport};
use u_deadline::generator::InstanceGenerator;
use u_deadline::models::Instance;
use u_deadline::offline::MicroLpSolver;

/// Compare online deadline-scheduling policies against the offline optimum.
#[derive(Parser)]
#[command(name = "u-deadline")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare every policy on one instance read from a JSON file
    Compare {
        /// Instance JSON file
        #[arg(short = 'i', long)]
        instance: PathBuf,

        #[command(flatten)]
        run: RunArgs,
    },
    /// Compare every policy on seeded random instances
    Random {
        /// Job counts, one instance per value
        #[arg(short = 'n', long, value_delimiter = ',', default_value = "10,20,50")]
        jobs: Vec<usize>,

        /// Last schedulable slot
        #[arg(short = 'T', long, default_value_t = 50)]
        horizon: u32,

        /// RNG seed
        #[arg(short, long, default_value_t = 42)]
        seed: u64,

        #[command(flatten)]
        run: RunArgs,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Experiment configuration JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip the demand-bound cuts in the offline model
    #[arg(long)]
    no_cuts: bool,

    /// Offline solver time limit in seconds
    #[arg(long, value_name = "SECS")]
    time_limit: Option<f64>,

    /// Policy to run (repeatable); defaults to every built-in policy
    #[arg(short, long = "policy", value_name = "NAME")]
    policies: Vec<String>,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,
}

impl RunArgs {
    /// Loads the config file (if any) and applies the flag overrides.
    fn resolve(&self) -> anyhow::Result<ExperimentConfig> {
        let mut config = match &self.config {
            Some(path) => ExperimentConfig::from_path(path)?,
            None => ExperimentConfig::default(),
        };
        if self.no_cuts {
            config.offline.add_interval_cuts = false;
        }
        if let Some(limit) = self.time_limit {
            anyhow::ensure!(
                limit.is_finite() && limit > 0.0,
                "time limit must be a positive number of seconds"
            );
            config.offline.time_limit_seconds = Some(limit);
        }
        if !self.policies.is_empty() {
            config.policy_names = self.policies.clone();
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Compare {
            instance: path,
            run,
        } => {
            let config = run.resolve()?;
            let text = fs::read_to_string(&path)
                .with_context(|| format!("failed to read instance {}", path.display()))?;
            let instance: Instance = serde_json::from_str(&text)
                .with_context(|| format!("failed to parse instance {}", path.display()))?;

            let report = compare_policies(
                &instance,
                &config.registry()?,
                &MicroLpSolver::new(),
                &config.offline,
            )?;
            print_reports(&[report], run.json)
        }
        Commands::Random {
            jobs,
            horizon,
            seed,
            run,
        } => {
            let config = run.resolve()?;
            tracing::info!(?jobs, horizon, seed, "random sweep");

            let reports = sweep(
                &InstanceGenerator::new(horizon),
                &jobs,
                seed,
                &config.registry()?,
                &MicroLpSolver::new(),
                &config.offline,
            )?;
            print_reports(&reports, run.json)
        }
    }
}

fn print_reports(reports: &[ComparisonReport], json: bool) -> anyhow::Result<()> {
    if json {
        let out = match reports {
            [single] => serde_json::to_string_pretty(single)?,
            _ => serde_json::to_string_pretty(reports)?,
        };
        println!("{out}");
        return Ok(());
    }

    for report in reports {
        for line in report.summary_lines() {
            println!("{line}");
        }
    }
    Ok(())
}
