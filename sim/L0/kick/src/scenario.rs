//! Named validation scenarios and their runs.
//!
//! A scenario picks the tendon model (and, for the compliant model, the slack
//! length as a multiple of optimal fiber length). Running a scenario resolves
//! that choice into a concrete [`ParameterSet`] snapshot, integrates from the
//! hanging rest state until ground contact, and keeps the snapshot next to
//! the solution so that post-processing never has to guess which slack length
//! produced a trajectory.

use kick_integrate::{IntegratorConfig, Solution, SolverStats, Termination, integrate};
use kick_types::{CompliantTendonState, ParameterSet, RigidTendonState};
use tracing::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{CompliantTendonModel, KickError, Result, RigidTendonModel, ground_contact_event};

/// Default simulated time span (s); every standard scenario reaches contact
/// well before it.
pub const DEFAULT_HORIZON: f64 = 2.0;

/// Slack lengths of the standard compliant scenarios, in optimal fiber lengths.
pub const STANDARD_SLACK_MULTIPLES: [f64; 3] = [1.0, 3.0, 10.0];

/// Series elastic element of a scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TendonSetting {
    /// No tendon: the fiber follows the joint directly.
    Rigid,
    /// Compliant tendon with slack length `slack_multiple * l_opt`.
    Compliant {
        /// Slack length in optimal fiber lengths.
        slack_multiple: f64,
    },
}

/// A named model configuration to run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Scenario {
    /// Label used in reports.
    pub name: String,
    /// Tendon model.
    pub tendon: TendonSetting,
}

impl Scenario {
    /// Scenario without a tendon.
    #[must_use]
    pub fn rigid() -> Self {
        Self {
            name: "no tendon".to_string(),
            tendon: TendonSetting::Rigid,
        }
    }

    /// Compliant-tendon scenario with slack length `multiple * l_opt`.
    #[must_use]
    pub fn compliant(multiple: f64) -> Self {
        Self {
            name: format!("tendon {multiple}x l_opt"),
            tendon: TendonSetting::Compliant {
                slack_multiple: multiple,
            },
        }
    }

    /// The four validation scenarios: no tendon, then slack lengths of 1, 3
    /// and 10 optimal fiber lengths.
    #[must_use]
    pub fn standard_set() -> Vec<Self> {
        std::iter::once(Self::rigid())
            .chain(STANDARD_SLACK_MULTIPLES.iter().map(|&k| Self::compliant(k)))
            .collect()
    }

    /// Parameter snapshot for this scenario: `base` with the slack length
    /// resolved to meters. The rigid scenario leaves the tendon untouched.
    #[must_use]
    pub fn resolve(&self, base: &ParameterSet) -> ParameterSet {
        match self.tendon {
            TendonSetting::Rigid => *base,
            TendonSetting::Compliant { slack_multiple } => base.with_slack_multiple(slack_multiple),
        }
    }
}

/// Solution of either model.
#[derive(Debug, Clone, PartialEq)]
pub enum RunSolution {
    /// `[phi, phidot, a]` trajectory.
    Rigid(Solution<3>),
    /// `[phi, phidot, lm, a]` trajectory.
    Compliant(Solution<4>),
}

impl RunSolution {
    /// Sample times.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        match self {
            Self::Rigid(s) => s.trajectory.times(),
            Self::Compliant(s) => s.trajectory.times(),
        }
    }

    /// Knee angle history (rad).
    #[must_use]
    pub fn angles(&self) -> Vec<f64> {
        self.component(0)
    }

    /// Knee angular velocity history (rad/s).
    #[must_use]
    pub fn angular_velocities(&self) -> Vec<f64> {
        self.component(1)
    }

    /// Activation history.
    #[must_use]
    pub fn activations(&self) -> Vec<f64> {
        match self {
            Self::Rigid(_) => self.component(2),
            Self::Compliant(_) => self.component(3),
        }
    }

    /// Fiber length history (m); `None` for the rigid model.
    #[must_use]
    pub fn fiber_lengths(&self) -> Option<Vec<f64>> {
        match self {
            Self::Rigid(_) => None,
            Self::Compliant(s) => Some(s.trajectory.component(2)),
        }
    }

    /// Why the run stopped.
    #[must_use]
    pub fn termination(&self) -> Termination {
        match self {
            Self::Rigid(s) => s.termination,
            Self::Compliant(s) => s.termination,
        }
    }

    /// Step bookkeeping.
    #[must_use]
    pub fn stats(&self) -> SolverStats {
        match self {
            Self::Rigid(s) => s.stats,
            Self::Compliant(s) => s.stats,
        }
    }

    /// Rigid-model states, if this is a rigid run.
    #[must_use]
    pub fn rigid_states(&self) -> Option<Vec<RigidTendonState>> {
        match self {
            Self::Rigid(s) => Some(
                s.trajectory
                    .states()
                    .iter()
                    .map(RigidTendonState::from_vector)
                    .collect(),
            ),
            Self::Compliant(_) => None,
        }
    }

    /// Compliant-model states, if this is a compliant run.
    #[must_use]
    pub fn compliant_states(&self) -> Option<Vec<CompliantTendonState>> {
        match self {
            Self::Rigid(_) => None,
            Self::Compliant(s) => Some(
                s.trajectory
                    .states()
                    .iter()
                    .map(CompliantTendonState::from_vector)
                    .collect(),
            ),
        }
    }

    fn component(&self, index: usize) -> Vec<f64> {
        match self {
            Self::Rigid(s) => s.trajectory.component(index),
            Self::Compliant(s) => s.trajectory.component(index),
        }
    }
}

/// A completed scenario run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioRun {
    /// What was run.
    pub scenario: Scenario,
    /// Parameter snapshot the run used, slack length in meters.
    pub params: ParameterSet,
    /// Integrator output.
    pub solution: RunSolution,
}

impl ScenarioRun {
    /// Knee angular velocity (rad/s) at the last sample, the ball-contact
    /// velocity for an event-terminated run.
    #[must_use]
    pub fn final_angular_velocity(&self) -> f64 {
        self.solution
            .angular_velocities()
            .last()
            .copied()
            .unwrap_or(0.0)
    }

    /// Time of ground contact, if reached.
    #[must_use]
    pub fn contact_time(&self) -> Option<f64> {
        match self.solution.termination() {
            Termination::Event { time, .. } => Some(time),
            Termination::Horizon => None,
        }
    }

    /// Whether the run stopped on ground contact rather than the horizon.
    #[must_use]
    pub fn reached_contact(&self) -> bool {
        self.solution.termination().is_event()
    }
}

/// Run one scenario from the hanging rest state.
///
/// # Errors
///
/// Returns an error if the horizon is not positive, the resolved parameters
/// fail validation, or the integrator fails.
pub fn run_scenario(
    base: &ParameterSet,
    scenario: &Scenario,
    config: &IntegratorConfig,
    horizon: f64,
) -> Result<ScenarioRun> {
    if !horizon.is_finite() || horizon <= 0.0 {
        return Err(KickError::InvalidHorizon(horizon));
    }

    let params = scenario.resolve(base);
    debug!(
        scenario = %scenario.name,
        slack_length = params.tendon.slack_length,
        horizon,
        "running scenario"
    );

    let solution = match scenario.tendon {
        TendonSetting::Rigid => {
            let model = RigidTendonModel::new(params)?;
            RunSolution::Rigid(integrate(
                &model,
                RigidTendonState::initial().to_vector(),
                (0.0, horizon),
                &[ground_contact_event()],
                config,
            )?)
        }
        TendonSetting::Compliant { .. } => {
            let model = CompliantTendonModel::new(params)?;
            RunSolution::Compliant(integrate(
                &model,
                CompliantTendonState::initial(&params).to_vector(),
                (0.0, horizon),
                &[ground_contact_event()],
                config,
            )?)
        }
    };

    let run = ScenarioRun {
        scenario: scenario.clone(),
        params,
        solution,
    };

    let stats = run.solution.stats();
    match run.contact_time() {
        Some(time) => debug!(
            scenario = %run.scenario.name,
            contact_time = time,
            angular_velocity = run.final_angular_velocity(),
            accepted = stats.accepted,
            rejected = stats.rejected,
            "ground contact"
        ),
        None => warn!(
            scenario = %run.scenario.name,
            horizon,
            angular_velocity = run.final_angular_velocity(),
            "horizon reached before ground contact"
        ),
    }

    Ok(run)
}

/// A set of scenarios sharing base parameters, tolerances and horizon.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioBatch {
    /// Base parameters; each scenario resolves its own slack length from them.
    pub params: ParameterSet,
    /// Integrator settings.
    pub config: IntegratorConfig,
    /// Simulated time span (s).
    pub horizon: f64,
    /// Scenarios, in report order.
    pub scenarios: Vec<Scenario>,
}

impl Default for ScenarioBatch {
    fn default() -> Self {
        Self::new(ParameterSet::default())
    }
}

impl ScenarioBatch {
    /// Standard scenario set over `params`.
    #[must_use]
    pub fn new(params: ParameterSet) -> Self {
        Self {
            params,
            config: IntegratorConfig::default(),
            horizon: DEFAULT_HORIZON,
            scenarios: Scenario::standard_set(),
        }
    }

    /// Replace the scenario list.
    #[must_use]
    pub fn with_scenarios(mut self, scenarios: Vec<Scenario>) -> Self {
        self.scenarios = scenarios;
        self
    }

    /// Set the integrator settings.
    #[must_use]
    pub fn with_config(mut self, config: IntegratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the simulated time span.
    #[must_use]
    pub fn with_horizon(mut self, horizon: f64) -> Self {
        self.horizon = horizon;
        self
    }

    /// Number of scenarios.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// Whether there are no scenarios.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Run every scenario, results in scenario order.
    ///
    /// With the `parallel` feature the scenarios run on the rayon pool.
    /// Runs share nothing but the read-only base parameters, so the output
    /// is identical either way.
    pub fn run_all(&self) -> Vec<Result<ScenarioRun>> {
        let run = |scenario: &Scenario| {
            run_scenario(&self.params, scenario, &self.config, self.horizon)
        };

        #[cfg(feature = "parallel")]
        {
            use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
            self.scenarios.par_iter().map(run).collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            self.scenarios.iter().map(run).collect()
        }
    }
}
