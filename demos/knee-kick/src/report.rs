//! Comparison table and JSON export.

use std::path::Path;

use anyhow::{Context, Result, bail};
use kick_model::{
    ForceSeries, ParameterSet, Scenario, ScenarioBatch, ScenarioRun, TendonSetting, Termination,
};
use serde::Serialize;
use tracing::{error, info};

/// One scenario in the exported file.
#[derive(Serialize)]
struct RunRecord<'a> {
    scenario: &'a Scenario,
    params: &'a ParameterSet,
    termination: &'static str,
    contact_time: Option<f64>,
    final_angular_velocity: f64,
    times: &'a [f64],
    angle: Vec<f64>,
    angular_velocity: Vec<f64>,
    activation: Vec<f64>,
    fiber_length: Option<Vec<f64>>,
    muscle_force: &'a [f64],
    isometric_force: &'a [f64],
}

impl<'a> RunRecord<'a> {
    fn new(run: &'a ScenarioRun, forces: &'a ForceSeries) -> Self {
        Self {
            scenario: &run.scenario,
            params: &run.params,
            termination: termination_label(run.solution.termination()),
            contact_time: run.contact_time(),
            final_angular_velocity: run.final_angular_velocity(),
            times: run.solution.times(),
            angle: run.solution.angles(),
            angular_velocity: run.solution.angular_velocities(),
            activation: run.solution.activations(),
            fiber_length: run.solution.fiber_lengths(),
            muscle_force: &forces.muscle_force,
            isometric_force: &forces.isometric_force,
        }
    }
}

fn termination_label(termination: Termination) -> &'static str {
    match termination {
        Termination::Event { .. } => "contact",
        Termination::Horizon => "horizon",
    }
}

/// Run every scenario of `batch`, print the table and optionally export.
pub fn run(batch: &ScenarioBatch, output: Option<&Path>) -> Result<()> {
    batch
        .config
        .validate()
        .context("invalid integrator settings")?;

    let results = batch.run_all();

    println!(
        "{:<18} {:>10} {:>12} {:>15} {:>15} {:>7}",
        "scenario", "slack (m)", "contact (s)", "phidot (rad/s)", "peak force (N)", "steps"
    );

    let mut completed = Vec::with_capacity(results.len());
    let mut failures = 0;
    for (scenario, result) in batch.scenarios.iter().zip(results) {
        let recovered = result.and_then(|run| {
            let forces = ForceSeries::recover(&run)?;
            Ok((run, forces))
        });
        match recovered {
            Ok((run, forces)) => {
                print_row(&run, &forces);
                completed.push((run, forces));
            }
            Err(err) => {
                error!(scenario = %scenario.name, %err, "scenario failed");
                println!("{:<18} failed: {err}", scenario.name);
                failures += 1;
            }
        }
    }

    if let Some(path) = output {
        let records: Vec<RunRecord<'_>> = completed
            .iter()
            .map(|(run, forces)| RunRecord::new(run, forces))
            .collect();
        let json = serde_json::to_string_pretty(&records)?;
        std::fs::write(path, json)
            .with_context(|| format!("writing results to {}", path.display()))?;
        info!(path = %path.display(), runs = records.len(), "results written");
    }

    if failures > 0 {
        bail!("{failures} of {} scenarios failed", batch.len());
    }
    Ok(())
}

fn print_row(run: &ScenarioRun, forces: &ForceSeries) {
    let slack = match run.scenario.tendon {
        TendonSetting::Rigid => "-".to_string(),
        TendonSetting::Compliant { .. } => {
            format!("{:.3}", run.params.tendon.slack_length)
        }
    };
    let contact = run
        .contact_time()
        .map_or_else(|| "horizon".to_string(), |t| format!("{t:.4}"));

    println!(
        "{:<18} {:>10} {:>12} {:>15.4} {:>15.1} {:>7}",
        run.scenario.name,
        slack,
        contact,
        run.final_angular_velocity(),
        forces.peak_force(),
        run.solution.stats().accepted
    );
}
