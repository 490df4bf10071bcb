//! Core types for the knee-kick musculotendon model.
//!
//! This crate provides the pure data shared by every other crate in the
//! workspace:
//!
//! - [`ParameterSet`] - Limb, muscle, activation and tendon constants
//! - [`RigidTendonState`] - `[phi, phidot, a]` state of the no-tendon model
//! - [`CompliantTendonState`] - `[phi, phidot, lm, a]` state of the tendon model
//! - [`ParamError`] - Validation failures
//!
//! # Units
//!
//! All lengths are absolute lengths in meters. Normalized quantities (fiber
//! length over optimal fiber length, tendon strain over slack length) are
//! computed at the point of use and never stored in a length field.
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with **zero rendering dependencies**.
//!
//! # Example
//!
//! ```
//! use kick_types::{CompliantTendonState, ParameterSet};
//!
//! // Tendon slack length of three optimal fiber lengths, resolved to meters.
//! let params = ParameterSet::default().with_slack_multiple(3.0);
//! assert!(params.validate().is_ok());
//! assert!((params.tendon.slack_length - 0.45).abs() < 1e-12);
//!
//! let start = CompliantTendonState::initial(&params);
//! assert_eq!(start.fiber_length, params.muscle.optimal_fiber_length);
//! ```

#![doc(html_root_url = "https://docs.rs/kick-types/0.1.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn, // Many methods can't be const due to nalgebra
    clippy::suboptimal_flops,     // mul_add style changes aren't always clearer
    clippy::missing_errors_doc,   // Error docs added where non-obvious
)]

mod error;
mod params;
mod state;

pub use error::ParamError;
pub use params::{ActivationParams, LimbParams, MuscleParams, ParameterSet, TendonParams};
pub use state::{CompliantTendonState, INITIAL_KNEE_ANGLE, RigidTendonState};

// Re-export math types for convenience
pub use nalgebra::{SVector, Vector3, Vector4};

/// Result type for parameter validation.
pub type Result<T> = std::result::Result<T, ParamError>;
