//! Error types for scenario runs.

use kick_integrate::IntegrateError;
use kick_types::ParamError;
use thiserror::Error;

/// Failures of a single scenario run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KickError {
    /// The parameter snapshot failed validation.
    #[error("invalid parameters: {0}")]
    Params(#[from] ParamError),

    /// The integrator gave up.
    #[error("integration failed: {0}")]
    Integrate(#[from] IntegrateError),

    /// The simulation horizon is not a positive finite time.
    #[error("invalid horizon: {0} s")]
    InvalidHorizon(f64),
}
