//! Shank segment rotating about the knee.
//!
//! The knee angle `phi` is measured so that `phi = pi/2` is the shank hanging
//! vertically and `phi = pi` is full extension (horizontal shank). Gravity
//! pulls the shank back toward vertical:
//!
//! ```text
//! Mg = -m g r_cm sin(phi - pi/2)
//! ```

use kick_muscle::{ActivationDynamics, MAX_EXCITATION};
use kick_types::LimbParams;
use std::f64::consts::FRAC_PI_2;

/// Moment of gravity about the knee (N*m).
#[must_use]
pub fn gravitational_moment(limb: &LimbParams, angle: f64) -> f64 {
    -limb.mass * limb.gravity * limb.com_distance * (angle - FRAC_PI_2).sin()
}

/// Knee angular acceleration from the muscle force acting through the
/// moment arm plus gravity.
#[must_use]
pub fn angular_acceleration(
    limb: &LimbParams,
    muscle_force: f64,
    moment_arm: f64,
    angle: f64,
) -> f64 {
    (muscle_force * moment_arm + gravitational_moment(limb, angle)) / limb.inertia
}

/// Activation rate under maximal excitation.
#[must_use]
pub fn activation_rate(dynamics: &ActivationDynamics, activation: f64) -> f64 {
    dynamics.derivative(MAX_EXCITATION, activation)
}
