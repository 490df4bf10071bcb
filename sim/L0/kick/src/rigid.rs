//! Kick model without a series elastic element.
//!
//! The fiber length follows the knee angle directly and the fiber velocity
//! follows the knee angular velocity:
//!
//! ```text
//! l_rel = r_f (pi/2 - phi) / l_opt + 1
//! v_rel = r_f phidot / v_max          (positive when shortening)
//! F     = F_max f_L(l_rel) f_V(v_rel) a
//! ```

use kick_integrate::OdeSystem;
use kick_muscle::{ActivationDynamics, MuscleForceCurves};
use kick_types::{ParameterSet, RigidTendonState, Vector3};
use std::f64::consts::FRAC_PI_2;

use crate::limb::{activation_rate, angular_acceleration};

/// Three-state model `[phi, phidot, a]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidTendonModel {
    params: ParameterSet,
    curves: MuscleForceCurves,
    activation: ActivationDynamics,
}

impl RigidTendonModel {
    /// Build the model from a parameter snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters fail validation.
    pub fn new(params: ParameterSet) -> kick_types::Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            curves: MuscleForceCurves::default(),
            activation: ActivationDynamics::from_params(&params.activation),
        })
    }

    /// Parameter snapshot this model integrates with.
    #[must_use]
    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// Fiber length over optimal fiber length at knee angle `angle`.
    #[must_use]
    pub fn normalized_fiber_length(&self, angle: f64) -> f64 {
        let muscle = &self.params.muscle;
        muscle.moment_arm * (FRAC_PI_2 - angle) / muscle.optimal_fiber_length + 1.0
    }

    /// Shortening velocity over maximum shortening velocity.
    #[must_use]
    pub fn normalized_shortening_velocity(&self, angular_velocity: f64) -> f64 {
        let muscle = &self.params.muscle;
        muscle.moment_arm * angular_velocity / muscle.max_shortening_velocity
    }

    /// Muscle force (N) in `state`.
    #[must_use]
    pub fn muscle_force(&self, state: &RigidTendonState) -> f64 {
        self.params.muscle.max_isometric_force
            * self.curves.evaluate_active(
                state.activation,
                self.normalized_fiber_length(state.angle),
                self.normalized_shortening_velocity(state.angular_velocity),
            )
    }

    /// Force (N) the fiber would produce isometrically in `state`.
    #[must_use]
    pub fn isometric_force(&self, state: &RigidTendonState) -> f64 {
        self.params.muscle.max_isometric_force
            * self
                .curves
                .evaluate_isometric(state.activation, self.normalized_fiber_length(state.angle))
    }

    /// Time derivative of `state`.
    #[must_use]
    pub fn state_derivative(&self, state: &RigidTendonState) -> RigidTendonState {
        RigidTendonState {
            angle: state.angular_velocity,
            angular_velocity: angular_acceleration(
                &self.params.limb,
                self.muscle_force(state),
                self.params.muscle.moment_arm,
                state.angle,
            ),
            activation: activation_rate(&self.activation, state.activation),
        }
    }
}

impl OdeSystem<3> for RigidTendonModel {
    fn derivative(&self, _t: f64, y: &Vector3<f64>) -> Vector3<f64> {
        self.state_derivative(&RigidTendonState::from_vector(y))
            .to_vector()
    }
}
