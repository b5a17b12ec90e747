use std::path::PathBuf;

use cdss::chart::{accuracy_chart, response_time_chart, sensitivity_chart};
use cdss::export::RunSummary;
use cdss::report::{fatal_error, render_report};
use cdss::watch::{PROGRESS_INTERVAL, run_watched};
use cdss::{Overrides, analyze, init_logging, load_config};
use cdss_core::{SimulationConfig, SimulationProgress, SimulationRunner};
use clap::Parser;
use color_eyre::eyre::{Context, bail};

#[derive(Parser, Debug)]
#[command(name = "cdss")]
#[command(about = "Monte Carlo estimate of clinical decision-support diagnostic accuracy")]
struct Args {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of trials
    #[arg(short = 'n', long)]
    trials: Option<usize>,

    /// Random seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Base accuracy rate in percent
    #[arg(long)]
    base_rate: Option<f64>,

    /// Use the k - 1 estimator for the standard deviation
    #[arg(long)]
    sample_std: bool,

    /// Run on a single thread
    #[arg(long)]
    sequential: bool,

    /// Histogram bins
    #[arg(long, default_value_t = 30)]
    bins: usize,

    /// Histogram height in rows
    #[arg(long, default_value_t = 8)]
    height: usize,

    /// Width of a 100% sensitivity bar
    #[arg(long, default_value_t = 40)]
    width: usize,

    /// Target response time in seconds, marked on the response time chart
    #[arg(long, default_value_t = 2.1)]
    target_response: f64,

    /// Skip the text charts
    #[arg(long)]
    no_charts: bool,

    /// Write a run summary (JSON for .json, YAML otherwise)
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Include per-trial records in the exported summary
    #[arg(long, requires = "export")]
    include_trials: bool,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Append logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            trials: self.trials,
            seed: self.seed,
            base_rate: self.base_rate,
            sample_std: self.sample_std,
            sequential: self.sequential,
        }
    }

    fn resolve_config(&self) -> color_eyre::Result<SimulationConfig> {
        let base = match &self.config {
            Some(path) => load_config(path)?,
            None => SimulationConfig::default(),
        };
        self.overrides()
            .apply(base)
            .wrap_err("invalid simulation settings")
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(args.log_file.as_deref(), &args.log_level)?;

    let config = args.resolve_config()?;
    tracing::info!(
        trials = config.trial_count,
        seed = ?config.random_seed,
        base_rate = config.base_accuracy_rate,
        "starting simulation"
    );

    let runner = SimulationRunner::new(config.clone())?;
    let progress = SimulationProgress::new();

    let results = run_watched(&runner, &progress, PROGRESS_INTERVAL)?;

    tracing::info!(
        completed = results.len(),
        requested = results.requested(),
        "simulation finished"
    );

    let analysis = analyze(&results, &config);
    println!("{}", render_report(&results, &analysis));

    if !args.no_charts {
        if let Ok(stats) = &analysis.statistics {
            if let Some(chart) = accuracy_chart(&results, stats, args.bins, args.height) {
                println!("{chart}");
            }
            if let Some(chart) = response_time_chart(
                &results,
                stats,
                args.target_response,
                args.bins,
                args.height,
            ) {
                println!("{chart}");
            }
        }
        if let Ok(report) = &analysis.sensitivity {
            println!("{}", sensitivity_chart(report, args.width));
        }
    }

    if let Some(path) = &args.export {
        RunSummary::new(&config, &results, &analysis, args.include_trials).write(path)?;
    }

    if let Some(err) = fatal_error(&analysis) {
        bail!("no trials completed: {err}");
    }
    if let Some(err) = results.failure() {
        bail!("run aborted: {err}");
    }

    Ok(())
}
