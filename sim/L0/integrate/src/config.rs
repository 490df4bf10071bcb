//! Integrator configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::IntegrateError;

/// Tolerances and step limits for [`integrate`](crate::integrate).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IntegratorConfig {
    /// Relative tolerance on each state component.
    pub rtol: f64,

    /// Absolute tolerance on each state component.
    pub atol: f64,

    /// Maximum number of accepted steps before giving up.
    pub max_steps: usize,

    /// First trial step. Estimated from the initial derivative when `None`.
    pub initial_step: Option<f64>,

    /// Upper bound on the step size. The whole time span when `None`.
    pub max_step: Option<f64>,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            rtol: 1e-6,
            atol: 1e-8,
            max_steps: 100_000,
            initial_step: None,
            max_step: None,
        }
    }
}

impl IntegratorConfig {
    /// Create a configuration with the given tolerances.
    #[must_use]
    pub fn with_tolerances(rtol: f64, atol: f64) -> Self {
        Self {
            rtol,
            atol,
            ..Default::default()
        }
    }

    /// Tight tolerances for reference solutions.
    #[must_use]
    pub fn high_accuracy() -> Self {
        Self::with_tolerances(1e-10, 1e-12)
    }

    /// Set the accepted-step budget.
    #[must_use]
    pub fn max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Set the first trial step.
    #[must_use]
    pub fn initial_step(mut self, step: f64) -> Self {
        self.initial_step = Some(step);
        self
    }

    /// Set the maximum step size.
    #[must_use]
    pub fn max_step(mut self, step: f64) -> Self {
        self.max_step = Some(step);
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> crate::Result<()> {
        if !self.rtol.is_finite() || self.rtol <= 0.0 {
            return Err(IntegrateError::invalid_tolerance("rtol", self.rtol));
        }
        if !self.atol.is_finite() || self.atol <= 0.0 {
            return Err(IntegrateError::invalid_tolerance("atol", self.atol));
        }
        if self.max_steps == 0 {
            return Err(IntegrateError::invalid_tolerance("max_steps", 0.0));
        }
        for (name, step) in [
            ("initial_step", self.initial_step),
            ("max_step", self.max_step),
        ] {
            if let Some(h) = step {
                if !h.is_finite() || h <= 0.0 {
                    return Err(IntegrateError::invalid_tolerance(name, h));
                }
            }
        }
        Ok(())
    }
}
