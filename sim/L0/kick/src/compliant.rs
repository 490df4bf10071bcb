//! Kick model with a compliant series tendon.
//!
//! The musculotendon length follows the knee angle; the fiber length is a
//! state of its own and the tendon takes up the difference:
//!
//! ```text
//! l_mt  = r_f (pi/2 - phi) + l_slack + l_opt
//! l_t   = l_mt - l_m - l_slack            (tendon elongation)
//! F_t   = sigma(l_t / l_slack) * A_t
//! F_iso = F_max f_L(l_m / l_opt) a
//! l_m'  = -f_V^-1(F_t / F_iso) v_max
//! ```
//!
//! Fiber and tendon are in series, so the tendon force is the muscle force;
//! the fiber velocity is whatever makes the contractile element produce it.
//! The ratio `F_t / F_iso` is indeterminate when the muscle cannot produce
//! isometric force (at `t = 0` activation is zero); the fiber then moves at a
//! fixed [`FALLBACK_FIBER_VELOCITY`].

use kick_integrate::OdeSystem;
use kick_muscle::{ActivationDynamics, Curve, MuscleForceCurves, TendonStressStrain};
use kick_types::{CompliantTendonState, ParameterSet, Vector4};
use std::f64::consts::FRAC_PI_2;
use tracing::trace;

use crate::limb::{activation_rate, angular_acceleration};

/// Isometric force (N) at or below which the force ratio is not formed.
pub const ISOMETRIC_FORCE_FLOOR: f64 = 1e-9;

/// Fiber velocity (m/s) used while the isometric force is below
/// [`ISOMETRIC_FORCE_FLOOR`]. A fitted convenience with no physiological
/// meaning; it only lasts while activation is negligible.
pub const FALLBACK_FIBER_VELOCITY: f64 = 0.15;

/// Four-state model `[phi, phidot, lm, a]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompliantTendonModel {
    params: ParameterSet,
    curves: MuscleForceCurves,
    tendon: TendonStressStrain,
    activation: ActivationDynamics,
}

impl CompliantTendonModel {
    /// Build the model from a parameter snapshot. The tendon slack length is
    /// read from `params.tendon.slack_length` and nowhere else.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters fail validation.
    pub fn new(params: ParameterSet) -> kick_types::Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            curves: MuscleForceCurves::default(),
            tendon: TendonStressStrain::from_params(&params.tendon),
            activation: ActivationDynamics::from_params(&params.activation),
        })
    }

    /// Parameter snapshot this model integrates with.
    #[must_use]
    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// Musculotendon length (m) at knee angle `angle`.
    #[must_use]
    pub fn musculotendon_length(&self, angle: f64) -> f64 {
        let p = &self.params;
        p.muscle.moment_arm * (FRAC_PI_2 - angle)
            + p.tendon.slack_length
            + p.muscle.optimal_fiber_length
    }

    /// Tendon elongation beyond slack (m); negative when the tendon is slack.
    #[must_use]
    pub fn tendon_elongation(&self, state: &CompliantTendonState) -> f64 {
        self.musculotendon_length(state.angle) - state.fiber_length - self.params.tendon.slack_length
    }

    /// Tendon strain, elongation over slack length.
    #[must_use]
    pub fn tendon_strain(&self, state: &CompliantTendonState) -> f64 {
        self.tendon_elongation(state) / self.params.tendon.slack_length
    }

    /// Tendon force (N), equal to the force the muscle transmits.
    #[must_use]
    pub fn tendon_force(&self, state: &CompliantTendonState) -> f64 {
        self.tendon.stress(self.tendon_strain(state)) * self.params.tendon.cross_section_area
    }

    /// Force (N) the fiber would produce isometrically at its current length
    /// and activation.
    #[must_use]
    pub fn isometric_force(&self, state: &CompliantTendonState) -> f64 {
        self.params.muscle.max_isometric_force
            * self
                .curves
                .evaluate_isometric(state.activation, state.normalized_fiber_length(&self.params))
    }

    /// Fiber velocity (m/s) that matches the contractile force to the tendon
    /// force. Positive values lengthen the fiber.
    #[must_use]
    pub fn fiber_velocity(&self, state: &CompliantTendonState) -> f64 {
        self.fiber_velocity_with(state, self.tendon_force(state))
    }

    fn fiber_velocity_with(&self, state: &CompliantTendonState, tendon_force: f64) -> f64 {
        let isometric = self.isometric_force(state);
        if isometric <= ISOMETRIC_FORCE_FLOOR {
            trace!(
                activation = state.activation,
                fiber_length = state.fiber_length,
                "isometric force below floor, using fallback fiber velocity"
            );
            return FALLBACK_FIBER_VELOCITY;
        }
        -self.curves.inverse_fv.evaluate(tendon_force / isometric)
            * self.params.muscle.max_shortening_velocity
    }

    /// Time derivative of `state`.
    #[must_use]
    pub fn state_derivative(&self, state: &CompliantTendonState) -> CompliantTendonState {
        let force = self.tendon_force(state);
        CompliantTendonState {
            angle: state.angular_velocity,
            angular_velocity: angular_acceleration(
                &self.params.limb,
                force,
                self.params.muscle.moment_arm,
                state.angle,
            ),
            fiber_length: self.fiber_velocity_with(state, force),
            activation: activation_rate(&self.activation, state.activation),
        }
    }
}

impl OdeSystem<4> for CompliantTendonModel {
    fn derivative(&self, _t: f64, y: &Vector4<f64>) -> Vector4<f64> {
        self.state_derivative(&CompliantTendonState::from_vector(y))
            .to_vector()
    }
}
