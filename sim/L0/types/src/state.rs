//! Named views of the integrator state vectors.
//!
//! The integrator works on plain `SVector`s. These structs give each slot a
//! name and a unit so that a fiber length (m) can never be mistaken for an
//! angle or a normalized quantity when reading a trajectory back.

use nalgebra::{SVector, Vector3, Vector4};
use std::f64::consts::FRAC_PI_2;

use crate::ParameterSet;
use crate::error::ParamError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Knee angle at the start of every run: shank hanging vertically (rad).
pub const INITIAL_KNEE_ANGLE: f64 = FRAC_PI_2;

/// State of the model without a series elastic element: `[phi, phidot, a]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RigidTendonState {
    /// Knee angle (rad).
    pub angle: f64,
    /// Knee angular velocity (rad/s).
    pub angular_velocity: f64,
    /// Muscle activation (dimensionless, 0 to 1).
    pub activation: f64,
}

impl RigidTendonState {
    /// Dimension of the state vector.
    pub const DIM: usize = 3;

    /// Leg at rest, hanging, muscle inactive.
    #[must_use]
    pub fn initial() -> Self {
        Self {
            angle: INITIAL_KNEE_ANGLE,
            angular_velocity: 0.0,
            activation: 0.0,
        }
    }

    /// Pack into the integrator's vector layout.
    #[must_use]
    pub fn to_vector(&self) -> Vector3<f64> {
        Vector3::new(self.angle, self.angular_velocity, self.activation)
    }

    /// Unpack from the integrator's vector layout.
    #[must_use]
    pub fn from_vector(y: &Vector3<f64>) -> Self {
        Self {
            angle: y[0],
            angular_velocity: y[1],
            activation: y[2],
        }
    }

    /// Check that every component is finite.
    pub fn validate(&self) -> crate::Result<()> {
        check_finite(&self.to_vector())
    }
}

/// State of the model with a compliant tendon: `[phi, phidot, lm, a]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CompliantTendonState {
    /// Knee angle (rad).
    pub angle: f64,
    /// Knee angular velocity (rad/s).
    pub angular_velocity: f64,
    /// Muscle fiber length (m, absolute).
    pub fiber_length: f64,
    /// Muscle activation (dimensionless, 0 to 1).
    pub activation: f64,
}

impl CompliantTendonState {
    /// Dimension of the state vector.
    pub const DIM: usize = 4;

    /// Leg at rest, hanging, fiber at optimal length, muscle inactive.
    #[must_use]
    pub fn initial(params: &ParameterSet) -> Self {
        Self {
            angle: INITIAL_KNEE_ANGLE,
            angular_velocity: 0.0,
            fiber_length: params.muscle.optimal_fiber_length,
            activation: 0.0,
        }
    }

    /// Pack into the integrator's vector layout.
    #[must_use]
    pub fn to_vector(&self) -> Vector4<f64> {
        Vector4::new(
            self.angle,
            self.angular_velocity,
            self.fiber_length,
            self.activation,
        )
    }

    /// Unpack from the integrator's vector layout.
    #[must_use]
    pub fn from_vector(y: &Vector4<f64>) -> Self {
        Self {
            angle: y[0],
            angular_velocity: y[1],
            fiber_length: y[2],
            activation: y[3],
        }
    }

    /// Fiber length normalized by optimal fiber length (dimensionless).
    #[must_use]
    pub fn normalized_fiber_length(&self, params: &ParameterSet) -> f64 {
        self.fiber_length / params.muscle.optimal_fiber_length
    }

    /// Check that every component is finite.
    pub fn validate(&self) -> crate::Result<()> {
        check_finite(&self.to_vector())
    }
}

fn check_finite<const N: usize>(y: &SVector<f64, N>) -> crate::Result<()> {
    match y.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(ParamError::NonFiniteState {
            index,
            value: y[index],
        }),
        None => Ok(()),
    }
}
