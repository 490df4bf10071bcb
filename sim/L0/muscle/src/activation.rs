//! Muscle activation dynamics.
//!
//! Activation dynamics model the delay and filtering between neural excitation
//! (the control signal) and muscle activation (the actual contractile state).
//!
//! # Background
//!
//! When a motor neuron fires, it takes time for calcium to be released and
//! bind to troponin, allowing myosin heads to attach to actin. This process
//! is modeled as a first-order differential equation whose rate depends on
//! the excitation level.
//!
//! # Model
//!
//! ```text
//! da/dt = -(1/τ) (β + (1 - β) u) a + u / τ
//!
//! where:
//!   a = activation level (0 to 1)
//!   u = neural excitation (0 to 1)
//!   τ = activation time constant
//!   β = ratio of activation to deactivation rate
//! ```
//!
//! With `u = 1` the activation relaxes toward 1 with time constant `τ`; with
//! `u = 0` it decays toward 0 with the slower time constant `τ / β`.

use kick_types::ActivationParams;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Excitation applied throughout a kick: the muscle is driven maximally.
pub const MAX_EXCITATION: f64 = 1.0;

/// First-order excitation-to-activation dynamics.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActivationDynamics {
    /// Activation time constant, in seconds.
    pub time_constant: f64,

    /// Ratio of activation to deactivation rate, in (0, 1].
    pub deactivation_ratio: f64,
}

impl Default for ActivationDynamics {
    fn default() -> Self {
        Self::from_params(&ActivationParams::default())
    }
}

impl ActivationDynamics {
    /// Build from activation parameters.
    #[must_use]
    pub fn from_params(params: &ActivationParams) -> Self {
        Self {
            time_constant: params.time_constant,
            deactivation_ratio: params.deactivation_ratio,
        }
    }

    /// Effective time constant for a given excitation.
    ///
    /// Equals `τ` at full excitation and `τ / β` at rest.
    #[must_use]
    pub fn effective_time_constant(&self, excitation: f64) -> f64 {
        let u = excitation.clamp(0.0, 1.0);
        self.time_constant / (self.deactivation_ratio + (1.0 - self.deactivation_ratio) * u)
    }

    /// Compute the activation derivative (da/dt).
    ///
    /// # Arguments
    ///
    /// * `excitation` - Neural excitation signal, clamped to [0, 1]
    /// * `activation` - Current activation level
    ///
    /// # Returns
    ///
    /// The rate of change of activation (1/s).
    #[must_use]
    pub fn derivative(&self, excitation: f64, activation: f64) -> f64 {
        let u = excitation.clamp(0.0, 1.0);
        let beta = self.deactivation_ratio;
        let rate = 1.0 / self.time_constant;

        -rate * (beta + (1.0 - beta) * u) * activation + rate * u
    }

    /// Closed-form activation after `elapsed` seconds of constant excitation.
    ///
    /// Useful as a reference solution for the integrator.
    #[must_use]
    pub fn step_response(&self, excitation: f64, initial: f64, elapsed: f64) -> f64 {
        let u = excitation.clamp(0.0, 1.0);
        let beta = self.deactivation_ratio;
        let k = beta + (1.0 - beta) * u;
        let steady = u / k;
        let tau = self.time_constant / k;

        steady + (initial - steady) * (-elapsed / tau).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_activation_dynamics_default() {
        let dynamics = ActivationDynamics::default();

        assert!(dynamics.time_constant > 0.0);
        assert!(dynamics.deactivation_ratio > 0.0);
        assert!(dynamics.deactivation_ratio <= 1.0);
    }

    #[test]
    fn test_full_excitation_rate() {
        let dynamics = ActivationDynamics::default();

        // da/dt = (1 - a) / tau at u = 1, independent of beta.
        assert_relative_eq!(
            dynamics.derivative(MAX_EXCITATION, 0.0),
            1.0 / dynamics.time_constant,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            dynamics.derivative(MAX_EXCITATION, 0.4),
            0.6 / dynamics.time_constant,
            epsilon = 1e-9
        );
        assert_relative_eq!(dynamics.derivative(MAX_EXCITATION, 1.0), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_deactivation_is_slower() {
        let dynamics = ActivationDynamics::default();

        assert!(
            dynamics.effective_time_constant(0.0) > dynamics.effective_time_constant(1.0)
        );
        assert_relative_eq!(
            dynamics.derivative(0.0, 0.5),
            -dynamics.deactivation_ratio * 0.5 / dynamics.time_constant,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_excitation_clamping() {
        let dynamics = ActivationDynamics::default();

        assert_eq!(dynamics.derivative(2.0, 0.5), dynamics.derivative(1.0, 0.5));
        assert_eq!(dynamics.derivative(-1.0, 0.5), dynamics.derivative(0.0, 0.5));
    }

    #[test]
    fn test_step_response_matches_derivative() {
        let dynamics = ActivationDynamics::default();
        let h = 1e-7;
        let a0 = 0.2;

        let a1 = dynamics.step_response(MAX_EXCITATION, a0, h);
        let numeric = (a1 - a0) / h;
        assert_relative_eq!(numeric, dynamics.derivative(MAX_EXCITATION, a0), max_relative = 1e-4);
    }

    #[test]
    fn test_step_response_converges_to_excitation() {
        let dynamics = ActivationDynamics::default();

        let a = dynamics.step_response(MAX_EXCITATION, 0.0, 20.0 * dynamics.time_constant);
        assert_relative_eq!(a, 1.0, epsilon = 1e-6);
    }
}
