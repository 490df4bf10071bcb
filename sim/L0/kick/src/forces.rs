//! Muscle force recovered from a finished run.
//!
//! Forces are not part of the integrator state. They are recomputed from
//! the sampled states by a model rebuilt from the run's own parameter
//! snapshot, so the tendon strain is always normalized by the slack length
//! that produced the trajectory.

use kick_types::{CompliantTendonState, RigidTendonState};

use crate::{CompliantTendonModel, Result, RigidTendonModel, RunSolution, ScenarioRun};

/// Force histories aligned with a run's sample times.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ForceSeries {
    /// Sample times (s).
    pub times: Vec<f64>,
    /// Force transmitted to the joint (N): the muscle force without a
    /// tendon, the tendon force with one.
    pub muscle_force: Vec<f64>,
    /// Force the fiber would produce isometrically, `F_max f_L a` (N).
    pub isometric_force: Vec<f64>,
}

impl ForceSeries {
    /// Recompute forces for every sample of `run`.
    ///
    /// # Errors
    ///
    /// Returns an error if the run's parameter snapshot fails validation.
    pub fn recover(run: &ScenarioRun) -> Result<Self> {
        let times = run.solution.times().to_vec();

        let (muscle_force, isometric_force): (Vec<f64>, Vec<f64>) = match &run.solution {
            RunSolution::Rigid(solution) => {
                let model = RigidTendonModel::new(run.params)?;
                solution
                    .trajectory
                    .states()
                    .iter()
                    .map(|y| {
                        let state = RigidTendonState::from_vector(y);
                        (model.muscle_force(&state), model.isometric_force(&state))
                    })
                    .unzip()
            }
            RunSolution::Compliant(solution) => {
                let model = CompliantTendonModel::new(run.params)?;
                solution
                    .trajectory
                    .states()
                    .iter()
                    .map(|y| {
                        let state = CompliantTendonState::from_vector(y);
                        (model.tendon_force(&state), model.isometric_force(&state))
                    })
                    .unzip()
            }
        };

        Ok(Self {
            times,
            muscle_force,
            isometric_force,
        })
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether there are no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Largest transmitted force (N), or `0.0` for an empty series.
    #[must_use]
    pub fn peak_force(&self) -> f64 {
        self.muscle_force.iter().copied().fold(0.0, f64::max)
    }

    /// Time (s) of the largest transmitted force.
    #[must_use]
    pub fn peak_time(&self) -> Option<f64> {
        self.muscle_force
            .iter()
            .zip(&self.times)
            .max_by(|a, b| a.0.total_cmp(b.0))
            .map(|(_, &t)| t)
    }
}
