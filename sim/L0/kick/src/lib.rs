//! Knee-extension kick simulation.
//!
//! A shank rotates about the knee under gravity and a single knee-extensor
//! muscle that is fully excited from rest. The kick ends when the knee
//! reaches full extension (ground contact); the knee angular velocity at that
//! moment is the quantity of interest.
//!
//! Two dynamics models are provided:
//!
//! - [`RigidTendonModel`] - no series elastic element, state `[phi, phidot, a]`
//! - [`CompliantTendonModel`] - compliant tendon, state `[phi, phidot, lm, a]`
//!
//! [`Scenario`]s pick a model and a tendon slack length; [`run_scenario`]
//! integrates one from the hanging rest state and [`ScenarioBatch`] runs a
//! set of them (in parallel with the `parallel` feature). [`ForceSeries`]
//! recovers muscle and tendon forces from a finished run.
//!
//! # Example
//!
//! ```
//! use kick_model::{ForceSeries, ScenarioBatch};
//!
//! let runs = ScenarioBatch::default().run_all();
//! for run in runs {
//!     let run = run?;
//!     assert!(run.reached_contact());
//!     assert!(run.final_angular_velocity() > 0.0);
//!     assert!(ForceSeries::recover(&run)?.peak_force() > 0.0);
//! }
//! # Ok::<(), kick_model::KickError>(())
//! ```

#![doc(html_root_url = "https://docs.rs/kick-model/0.1.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,
    clippy::suboptimal_flops,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::float_cmp))]

mod compliant;
mod error;
mod event;
mod forces;
pub mod limb;
mod rigid;
mod scenario;

pub use compliant::{CompliantTendonModel, FALLBACK_FIBER_VELOCITY, ISOMETRIC_FORCE_FLOOR};
pub use error::KickError;
pub use event::{CONTACT_ANGLE, ground_contact_event};
pub use forces::ForceSeries;
pub use limb::gravitational_moment;
pub use rigid::RigidTendonModel;
pub use scenario::{
    DEFAULT_HORIZON, RunSolution, STANDARD_SLACK_MULTIPLES, Scenario, ScenarioBatch,
    ScenarioRun, TendonSetting, run_scenario,
};

// Re-export the crates a caller needs to configure and read a run.
pub use kick_integrate::{IntegratorConfig, Solution, SolverStats, Termination};
pub use kick_types::{CompliantTendonState, ParameterSet, RigidTendonState};

/// Result type for scenario runs.
pub type Result<T> = std::result::Result<T, KickError>;
