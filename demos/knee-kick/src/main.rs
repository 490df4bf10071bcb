//! Knee-Kick Scenario Driver
//!
//! Runs the knee-extension kick from rest to ground contact with and without
//! a compliant tendon and compares the contact velocities.
//!
//! # Commands
//!
//! - `knee-kick run` - Run the scenarios and print a comparison table
//! - `knee-kick params` - Print the default parameter set as JSON
//!
//! # Logging
//!
//! Diagnostics go to stderr. `-v` enables debug output (run start, contact,
//! step counts), `-vv` trace output; `RUST_LOG` is honored otherwise.

mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kick_model::{
    DEFAULT_HORIZON, IntegratorConfig, ParameterSet, STANDARD_SLACK_MULTIPLES, Scenario,
    ScenarioBatch,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

/// Knee-kick musculotendon simulation
#[derive(Parser)]
#[command(name = "knee-kick")]
#[command(about = "Compare knee-kick contact velocities across tendon models", long_about = None)]
#[command(version)]
struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the scenarios and print a comparison table
    Run {
        /// Tendon slack lengths to run, in optimal fiber lengths
        #[arg(long, value_delimiter = ',', default_values_t = STANDARD_SLACK_MULTIPLES.to_vec())]
        slack: Vec<f64>,

        /// Skip the scenario without a tendon
        #[arg(long)]
        no_rigid: bool,

        /// Simulated time span in seconds
        #[arg(long, default_value_t = DEFAULT_HORIZON)]
        horizon: f64,

        /// Relative integration tolerance
        #[arg(long, default_value_t = IntegratorConfig::default().rtol)]
        rtol: f64,

        /// Absolute integration tolerance
        #[arg(long, default_value_t = IntegratorConfig::default().atol)]
        atol: f64,

        /// JSON parameter set replacing the defaults
        #[arg(long)]
        params: Option<PathBuf>,

        /// Write trajectories and recovered forces to this JSON file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print the default parameter set as JSON
    Params {
        /// Resolve the tendon slack length to this many optimal fiber lengths
        #[arg(long)]
        slack: Option<f64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            slack,
            no_rigid,
            horizon,
            rtol,
            atol,
            params,
            output,
        } => {
            let params = match params {
                Some(path) => load_params(&path)?,
                None => ParameterSet::default(),
            };
            let mut scenarios = Vec::with_capacity(slack.len() + 1);
            if !no_rigid {
                scenarios.push(Scenario::rigid());
            }
            scenarios.extend(slack.iter().map(|&k| Scenario::compliant(k)));

            let batch = ScenarioBatch::new(params)
                .with_scenarios(scenarios)
                .with_horizon(horizon)
                .with_config(IntegratorConfig::with_tolerances(rtol, atol));
            report::run(&batch, output.as_deref())
        }
        Commands::Params { slack } => {
            let mut params = ParameterSet::default();
            if let Some(multiple) = slack {
                params = params.with_slack_multiple(multiple);
            }
            params.validate()?;
            println!("{}", serde_json::to_string_pretty(&params)?);
            Ok(())
        }
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_params(path: &std::path::Path) -> Result<ParameterSet> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading parameter file {}", path.display()))?;
    let params: ParameterSet = serde_json::from_str(&text)
        .with_context(|| format!("parsing parameter file {}", path.display()))?;
    params
        .validate()
        .with_context(|| format!("validating parameter file {}", path.display()))?;
    info!(path = %path.display(), "loaded parameters");
    Ok(params)
}
