//! Force-length and force-velocity curves for the contractile element.
//!
//! # Force-Length Relationship
//!
//! Active force depends on fiber length. The curve used here is a parabola
//! centered at optimal fiber length, reaching zero half an optimal length on
//! either side and clamped at zero outside. Passive force is a cubic that
//! rises once the fiber is stretched past optimal length.
//!
//! # Force-Velocity Relationship
//!
//! During shortening, force drops hyperbolically with velocity (Hill, 1938)
//! and vanishes at the maximum shortening velocity. Velocities here are
//! normalized by `vmax` and are **positive for shortening**.
//!
//! The inverse curve is a fitted closed form, valid on a finite domain of
//! force ratios and saturated outside it.
//!
//! # References
//!
//! - Hill, A.V. (1938). The heat of shortening and dynamic constants of muscle.
//! - Zajac, F.E. (1989). Muscle and tendon: properties, models, scaling, and
//!   application to biomechanics and motor control.

use crate::Curve;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Active force-length multiplier as a function of normalized fiber length.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActiveForceLengthCurve {
    /// Half-width of the parabola (normalized length units).
    pub width: f64,
}

impl Default for ActiveForceLengthCurve {
    fn default() -> Self {
        Self { width: 0.5 }
    }
}

impl ActiveForceLengthCurve {
    /// Create a curve with a custom half-width.
    #[must_use]
    pub fn new(width: f64) -> Self {
        Self {
            width: width.max(1e-3),
        }
    }

    /// Slope of the curve with respect to normalized length.
    ///
    /// Zero wherever the curve is clamped.
    #[must_use]
    pub fn derivative(&self, normalized_length: f64) -> f64 {
        if self.evaluate(normalized_length) <= 0.0 {
            return 0.0;
        }
        -2.0 * (normalized_length - 1.0) / (self.width * self.width)
    }
}

impl Curve for ActiveForceLengthCurve {
    /// Evaluate the multiplier at `normalized_length` (L / L_opt).
    ///
    /// Returns 1 at optimal length and 0 at `1 ± width` and beyond.
    fn evaluate(&self, normalized_length: f64) -> f64 {
        let x = (normalized_length - 1.0) / self.width;
        (1.0 - x * x).max(0.0)
    }
}

/// Passive force-length multiplier as a function of normalized fiber length.
///
/// Not used by the kick models; exposed so post-processing can compare
/// passive and active contributions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PassiveForceLengthCurve {
    /// Cubic coefficient.
    pub stiffness: f64,
}

impl Default for PassiveForceLengthCurve {
    fn default() -> Self {
        Self { stiffness: 8.0 }
    }
}

impl Curve for PassiveForceLengthCurve {
    fn evaluate(&self, normalized_length: f64) -> f64 {
        if normalized_length < 1.0 {
            return 0.0;
        }
        self.stiffness * (normalized_length - 1.0).powi(3)
    }
}

/// Hill force-velocity multiplier as a function of normalized shortening
/// velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ForceVelocityCurve {
    /// Hill curvature constant. Typical: 0.25.
    pub curvature: f64,
}

impl Default for ForceVelocityCurve {
    fn default() -> Self {
        Self { curvature: 0.25 }
    }
}

impl Curve for ForceVelocityCurve {
    /// Evaluate the multiplier at `normalized_velocity` (v / v_max, positive
    /// for shortening).
    ///
    /// - 1 when isometric
    /// - 0 at and beyond maximum shortening velocity
    fn evaluate(&self, normalized_velocity: f64) -> f64 {
        let v = normalized_velocity;
        ((1.0 - v) / (1.0 + v / self.curvature)).max(0.0)
    }
}

/// Fitted inverse of the force-velocity curve.
///
/// Maps a force ratio `F / F_iso` to a normalized shortening velocity using
/// `v = -c1 * cot(c2 f² + c3 f + c4)`. The fit only holds on
/// `0 <= f <= max_force_ratio`; outside it the result saturates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InverseForceVelocityCurve {
    /// Fitted coefficients `[c1, c2, c3, c4]`.
    pub coefficients: [f64; 4],

    /// Largest force ratio the fit is evaluated at.
    pub max_force_ratio: f64,

    /// Normalized velocity returned above `max_force_ratio` (lengthening).
    pub saturated_lengthening_velocity: f64,

    /// Normalized velocity returned for negative force ratios (full-speed
    /// shortening).
    pub saturated_shortening_velocity: f64,
}

impl Default for InverseForceVelocityCurve {
    fn default() -> Self {
        Self {
            coefficients: [-0.18713, 0.32094, 1.06485, 0.1850],
            max_force_ratio: 1.4,
            // The fit reaches about -0.169 at 1.4, so the curve jumps up at the bound.
            saturated_lengthening_velocity: -0.15,
            saturated_shortening_velocity: 1.0,
        }
    }
}

impl Curve for InverseForceVelocityCurve {
    /// Normalized shortening velocity for a given force ratio.
    fn evaluate(&self, force_ratio: f64) -> f64 {
        if force_ratio > self.max_force_ratio {
            return self.saturated_lengthening_velocity;
        }
        if force_ratio < 0.0 {
            return self.saturated_shortening_velocity;
        }

        let [c1, c2, c3, c4] = self.coefficients;
        let angle = c2 * force_ratio * force_ratio + c3 * force_ratio + c4;
        -c1 / angle.tan()
    }
}

/// Active force-length multiplier with the default curve.
#[must_use]
pub fn active_force_length(normalized_length: f64) -> f64 {
    ActiveForceLengthCurve::default().evaluate(normalized_length)
}

/// Passive force-length multiplier with the default curve.
#[must_use]
pub fn passive_force_length(normalized_length: f64) -> f64 {
    PassiveForceLengthCurve::default().evaluate(normalized_length)
}

/// Force-velocity multiplier with the default curve.
#[must_use]
pub fn force_velocity(normalized_velocity: f64) -> f64 {
    ForceVelocityCurve::default().evaluate(normalized_velocity)
}

/// Normalized shortening velocity for a force ratio, with the default fit.
#[must_use]
pub fn inverse_force_velocity(force_ratio: f64) -> f64 {
    InverseForceVelocityCurve::default().evaluate(force_ratio)
}

/// Force curves of the contractile element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MuscleForceCurves {
    /// Active force-length relationship.
    pub active_fl: ActiveForceLengthCurve,

    /// Passive force-length relationship.
    pub passive_fl: PassiveForceLengthCurve,

    /// Force-velocity relationship.
    pub fv: ForceVelocityCurve,

    /// Fitted inverse of the force-velocity relationship.
    pub inverse_fv: InverseForceVelocityCurve,
}

impl MuscleForceCurves {
    /// Active force multiplier `a * f_L(l) * f_V(v)`.
    #[must_use]
    pub fn evaluate_active(
        &self,
        activation: f64,
        normalized_length: f64,
        normalized_velocity: f64,
    ) -> f64 {
        activation
            * self.active_fl.evaluate(normalized_length)
            * self.fv.evaluate(normalized_velocity)
    }

    /// Isometric force multiplier `a * f_L(l)`.
    #[must_use]
    pub fn evaluate_isometric(&self, activation: f64, normalized_length: f64) -> f64 {
        activation * self.active_fl.evaluate(normalized_length)
    }
}
