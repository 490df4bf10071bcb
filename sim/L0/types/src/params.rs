//! Physical and physiological constants of the knee-kick model.
//!
//! A [`ParameterSet`] is built once per run and never mutated while the run
//! is in flight. Every length stored here is an absolute length in meters.
//! Dimensionless multiples (such as "tendon slack = 3 × optimal fiber
//! length") are converted to meters by the builder methods and are never
//! stored in a length field.

use crate::error::ParamError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rigid-body properties of the shank-and-foot segment rotating about the knee.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LimbParams {
    /// Moment of inertia about the knee axis (kg·m²).
    pub inertia: f64,

    /// Segment mass (kg).
    pub mass: f64,

    /// Gravitational acceleration (m/s²).
    pub gravity: f64,

    /// Distance from the knee axis to the segment center of mass (m).
    pub com_distance: f64,
}

impl Default for LimbParams {
    fn default() -> Self {
        Self {
            inertia: 0.35,
            mass: 4.5,
            gravity: 9.81,
            com_distance: 0.25,
        }
    }
}

/// Contractile element and its attachment to the joint.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MuscleParams {
    /// Maximum isometric force (N).
    pub max_isometric_force: f64,

    /// Fiber length at which active force peaks (m).
    pub optimal_fiber_length: f64,

    /// Maximum fiber shortening velocity (m/s, absolute).
    pub max_shortening_velocity: f64,

    /// Constant moment arm of the muscle-tendon unit about the knee (m).
    pub moment_arm: f64,
}

impl Default for MuscleParams {
    fn default() -> Self {
        Self {
            max_isometric_force: 4000.0,
            optimal_fiber_length: 0.15,
            max_shortening_velocity: 0.3,
            moment_arm: 0.02,
        }
    }
}

/// First-order excitation-to-activation dynamics.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActivationParams {
    /// Activation time constant (s).
    pub time_constant: f64,

    /// Ratio of activation to deactivation rate (dimensionless, in (0, 1]).
    pub deactivation_ratio: f64,
}

impl Default for ActivationParams {
    fn default() -> Self {
        Self {
            time_constant: 0.01,
            deactivation_ratio: 0.25,
        }
    }
}

/// Series elastic tendon.
///
/// Strains are relative to [`slack_length`](Self::slack_length), never to the
/// optimal fiber length.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TendonParams {
    /// Strain at the boundary between the toe-in and linear regions.
    pub toe_strain: f64,

    /// Stress at the toe-in/linear boundary (Pa).
    pub toe_stress: f64,

    /// Elastic modulus in the linear region (Pa).
    pub modulus: f64,

    /// Tendon cross-sectional area (m²).
    pub cross_section_area: f64,

    /// Exponential shape factor of the toe-in region.
    pub toe_shape: f64,

    /// Length at which the tendon starts to carry load (m).
    pub slack_length: f64,
}

impl Default for TendonParams {
    fn default() -> Self {
        Self {
            toe_strain: 0.03,
            toe_stress: 11.4e6,
            modulus: 1.2e9,
            cross_section_area: 8.0e-4,
            toe_shape: 3.0,
            slack_length: MuscleParams::default().optimal_fiber_length,
        }
    }
}

/// Complete, immutable parameter snapshot for one integration run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParameterSet {
    /// Rigid-body limb properties.
    pub limb: LimbParams,

    /// Muscle properties.
    pub muscle: MuscleParams,

    /// Activation dynamics properties.
    pub activation: ActivationParams,

    /// Tendon properties, including the per-run slack length.
    pub tendon: TendonParams,
}

impl ParameterSet {
    /// Copy of this set whose tendon slack length is `multiple` optimal fiber
    /// lengths, resolved to meters.
    #[must_use]
    pub fn with_slack_multiple(mut self, multiple: f64) -> Self {
        self.tendon.slack_length = multiple * self.muscle.optimal_fiber_length;
        self
    }

    /// Copy of this set with an absolute tendon slack length (m).
    #[must_use]
    pub fn with_tendon_slack_length(mut self, slack_length: f64) -> Self {
        self.tendon.slack_length = slack_length;
        self
    }

    /// Set the limb properties.
    #[must_use]
    pub fn with_limb(mut self, limb: LimbParams) -> Self {
        self.limb = limb;
        self
    }

    /// Set the muscle properties.
    #[must_use]
    pub fn with_muscle(mut self, muscle: MuscleParams) -> Self {
        self.muscle = muscle;
        self
    }

    /// Set the activation properties.
    #[must_use]
    pub fn with_activation(mut self, activation: ActivationParams) -> Self {
        self.activation = activation;
        self
    }

    /// Set the tendon properties.
    #[must_use]
    pub fn with_tendon(mut self, tendon: TendonParams) -> Self {
        self.tendon = tendon;
        self
    }

    /// Tendon slack length expressed as a multiple of optimal fiber length.
    #[must_use]
    pub fn slack_multiple(&self) -> f64 {
        self.tendon.slack_length / self.muscle.optimal_fiber_length
    }

    /// Validate every field.
    pub fn validate(&self) -> crate::Result<()> {
        let positive = [
            ("limb.inertia", self.limb.inertia),
            ("limb.mass", self.limb.mass),
            ("limb.com_distance", self.limb.com_distance),
            ("muscle.max_isometric_force", self.muscle.max_isometric_force),
            ("muscle.optimal_fiber_length", self.muscle.optimal_fiber_length),
            (
                "muscle.max_shortening_velocity",
                self.muscle.max_shortening_velocity,
            ),
            ("muscle.moment_arm", self.muscle.moment_arm),
            ("activation.time_constant", self.activation.time_constant),
            ("tendon.toe_stress", self.tendon.toe_stress),
            ("tendon.modulus", self.tendon.modulus),
            ("tendon.cross_section_area", self.tendon.cross_section_area),
            ("tendon.toe_shape", self.tendon.toe_shape),
            ("tendon.slack_length", self.tendon.slack_length),
        ];

        for (name, value) in positive {
            if !value.is_finite() {
                return Err(ParamError::non_finite(name, value));
            }
            if value <= 0.0 {
                return Err(ParamError::out_of_range(name, value, "must be positive"));
            }
        }

        let gravity = self.limb.gravity;
        if !gravity.is_finite() {
            return Err(ParamError::non_finite("limb.gravity", gravity));
        }
        if gravity < 0.0 {
            return Err(ParamError::out_of_range(
                "limb.gravity",
                gravity,
                "must not be negative",
            ));
        }

        let beta = self.activation.deactivation_ratio;
        if !beta.is_finite() {
            return Err(ParamError::non_finite("activation.deactivation_ratio", beta));
        }
        if beta <= 0.0 || beta > 1.0 {
            return Err(ParamError::out_of_range(
                "activation.deactivation_ratio",
                beta,
                "must lie in (0, 1]",
            ));
        }

        let toe_strain = self.tendon.toe_strain;
        if !toe_strain.is_finite() {
            return Err(ParamError::non_finite("tendon.toe_strain", toe_strain));
        }
        if toe_strain <= 0.0 || toe_strain >= 1.0 {
            return Err(ParamError::out_of_range(
                "tendon.toe_strain",
                toe_strain,
                "must lie in (0, 1)",
            ));
        }

        Ok(())
    }
}
