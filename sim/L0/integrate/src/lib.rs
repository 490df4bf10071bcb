//! Adaptive ODE integration with event detection.
//!
//! This crate integrates fixed-size first-order systems `y' = f(t, y)` with
//! the Dormand-Prince 5(4) embedded pair:
//!
//! - [`integrate`] - Adaptive driver with PI step-size control
//! - [`EventSpec`] - Scalar event functions, terminal or recording
//! - [`Solution`] - Sampled [`Trajectory`], [`Termination`] reason and statistics
//! - [`IntegratorConfig`] - Tolerances and step limits
//!
//! Event crossings are located by bisection on the 4th-order continuous
//! extension of the accepted step, so no extra derivative evaluations are
//! spent on localization.
//!
//! # Example
//!
//! ```
//! use kick_integrate::{EventSpec, IntegratorConfig, Termination, integrate};
//! use nalgebra::Vector2;
//!
//! // Harmonic oscillator, stop when x first reaches zero.
//! let oscillator = |_t: f64, y: &Vector2<f64>| Vector2::new(y[1], -y[0]);
//! let event = EventSpec::terminal("x = 0", |y: &Vector2<f64>| y[0]);
//!
//! let solution = integrate(
//!     &oscillator,
//!     Vector2::new(1.0, 0.0),
//!     (0.0, 10.0),
//!     &[event],
//!     &IntegratorConfig::default(),
//! )?;
//!
//! assert!(matches!(solution.termination, Termination::Event { index: 0, .. }));
//! let t = solution.event_time().unwrap_or(f64::NAN);
//! assert!((t - std::f64::consts::FRAC_PI_2).abs() < 1e-5);
//! # Ok::<(), kick_integrate::IntegrateError>(())
//! ```
//!
//! # Determinism
//!
//! There is no randomness and no global state: identical inputs produce
//! bit-identical trajectories.

#![doc(html_root_url = "https://docs.rs/kick-integrate/0.1.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,
    clippy::suboptimal_flops,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::cast_precision_loss // state dimension to f64
)]
#![cfg_attr(
    test,
    allow(clippy::unwrap_used, clippy::float_cmp, clippy::panic)
)]

mod config;
pub mod controller;
mod error;
mod event;
mod solver;
mod tableau;
mod trajectory;

pub use config::IntegratorConfig;
pub use controller::PiController;
pub use error::IntegrateError;
pub use event::{EventDirection, EventFn, EventHit, EventSpec};
pub use solver::{OdeSystem, integrate};
pub use trajectory::{Solution, SolverStats, Termination, Trajectory};

/// Result type for integration.
pub type Result<T> = std::result::Result<T, IntegrateError>;
