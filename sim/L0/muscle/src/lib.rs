//! Hill-type muscle and tendon curves for the knee-kick model.
//!
//! This crate provides the constitutive relations that couple the mechanical
//! state of a muscle-tendon unit to its force:
//!
//! - Active force-length curve (sarcomere overlap)
//! - Passive force-length curve (parallel elastic tissue)
//! - Force-velocity curve and its fitted inverse (cross-bridge cycling)
//! - Tendon stress-strain curve, its inverse and its derivative
//! - Activation dynamics (neural excitation to contractile state)
//!
//! # Hill-Type Muscle Model
//!
//! ```text
//!                    ┌──────────────────────┐
//!                    │    Muscle-Tendon     │
//!                    │         Unit         │
//!                    │                      │
//!                    │  ┌────┐    ┌────┐    │
//!    Excitation ────►│  │ CE │────│ SE │────┼───► Force
//!        u           │  └────┘    └────┘    │
//!                    │                      │
//!                    └──────────────────────┘
//! ```
//!
//! Every curve is a pure function of its argument. Curves are small `Copy`
//! structs carrying their coefficients and implement [`Curve`], which also
//! provides elementwise evaluation over slices.
//!
//! # Quick Start
//!
//! ```
//! use kick_muscle::{Curve, TendonStressStrain, active_force_length, force_velocity};
//!
//! // Isometric contraction at optimal length produces full force.
//! assert_eq!(active_force_length(1.0) * force_velocity(0.0), 1.0);
//!
//! // Tendon stress at 2% strain, and back.
//! let tendon = TendonStressStrain::default();
//! let stress = tendon.stress(0.02);
//! assert!((tendon.strain(stress) - 0.02).abs() < 1e-12);
//!
//! // Vectorized evaluation.
//! let strains = [0.0, 0.01, 0.02];
//! let stresses = tendon.evaluate_many(&strains);
//! assert_eq!(stresses.len(), 3);
//! ```
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero rendering dependencies**.
//!
//! # References
//!
//! - Hill, A.V. (1938). The heat of shortening and the dynamic constants of muscle.
//! - Zajac, F.E. (1989). Muscle and tendon: properties, models, scaling.

#![doc(html_root_url = "https://docs.rs/kick-muscle/0.1.0")]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions,
    clippy::doc_markdown,
    clippy::must_use_candidate,
    clippy::suboptimal_flops,
    clippy::similar_names
)]
#![cfg_attr(test, allow(clippy::float_cmp))]

pub mod activation;
pub mod curves;
pub mod tendon;

// Re-export main types at crate root
pub use activation::{ActivationDynamics, MAX_EXCITATION};
pub use curves::{
    ActiveForceLengthCurve, ForceVelocityCurve, InverseForceVelocityCurve, MuscleForceCurves,
    PassiveForceLengthCurve, active_force_length, force_velocity, inverse_force_velocity,
    passive_force_length,
};
pub use tendon::{TendonStiffness, TendonStrainStress, TendonStressStrain};

/// A scalar constitutive relation.
///
/// Implementors only provide [`evaluate`](Curve::evaluate); elementwise
/// evaluation over a slice comes for free and never aliases its input.
pub trait Curve {
    /// Evaluate the curve at a single point.
    fn evaluate(&self, x: f64) -> f64;

    /// Evaluate the curve at every point of `xs`, preserving order and length.
    fn evaluate_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.evaluate(x)).collect()
    }
}
