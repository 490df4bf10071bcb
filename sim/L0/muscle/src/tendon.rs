//! Series elastic tendon stress-strain curve.
//!
//! The curve has an exponential toe-in region up to strain `l1`, where the
//! stress reaches `F1`, followed by a linear region of modulus `Kse`:
//!
//! ```text
//! strain <= l1:  sigma = F1 / (e^ksh - 1) * (e^(ksh * strain / l1) - 1)
//! strain >  l1:  sigma = Kse * (strain - l1) + F1
//! ```
//!
//! Strain is tendon elongation divided by the run's **tendon slack length**,
//! not by the optimal fiber length. Stress is in Pa; multiply by the
//! cross-sectional area to get a force.

use kick_types::TendonParams;

use crate::Curve;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stress (Pa) as a function of strain.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TendonStressStrain {
    /// Strain at the toe-in/linear boundary (`l1`).
    pub toe_strain: f64,

    /// Stress at the toe-in/linear boundary (`F1`, Pa).
    pub toe_stress: f64,

    /// Linear-region modulus (`Kse`, Pa).
    pub modulus: f64,

    /// Toe-in shape factor (`ksh`).
    pub toe_shape: f64,
}

impl Default for TendonStressStrain {
    fn default() -> Self {
        Self::from_params(&TendonParams::default())
    }
}

impl TendonStressStrain {
    /// Build the curve from tendon parameters. The slack length is not part
    /// of the curve; it only enters when converting elongation to strain.
    #[must_use]
    pub fn from_params(params: &TendonParams) -> Self {
        Self {
            toe_strain: params.toe_strain,
            toe_stress: params.toe_stress,
            modulus: params.modulus,
            toe_shape: params.toe_shape,
        }
    }

    /// Stress at `strain`.
    #[must_use]
    pub fn stress(&self, strain: f64) -> f64 {
        if strain > self.toe_strain {
            self.modulus * (strain - self.toe_strain) + self.toe_stress
        } else {
            self.toe_scale() * ((self.toe_shape / self.toe_strain * strain).exp() - 1.0)
        }
    }

    /// Strain at `stress`, the exact inverse of [`stress`](Self::stress).
    ///
    /// The toe-in curve approaches `-F1 / (e^ksh - 1)` as strain goes to
    /// negative infinity. Stresses at or below that compressive limit have no
    /// preimage and yield NaN (`-inf` exactly at the limit).
    #[must_use]
    pub fn strain(&self, stress: f64) -> f64 {
        if stress > self.toe_stress {
            (stress - self.toe_stress) / self.modulus + self.toe_strain
        } else {
            self.toe_strain / self.toe_shape * (stress / self.toe_scale() + 1.0).ln()
        }
    }

    /// Slope `d(stress)/d(strain)` at `strain` (Pa).
    #[must_use]
    pub fn tangent_modulus(&self, strain: f64) -> f64 {
        if strain > self.toe_strain {
            self.modulus
        } else {
            self.toe_scale() * self.toe_shape / self.toe_strain
                * (self.toe_shape / self.toe_strain * strain).exp()
        }
    }

    /// View of the inverse curve (strain as a function of stress).
    #[must_use]
    pub fn inverse(self) -> TendonStrainStress {
        TendonStrainStress { curve: self }
    }

    /// View of the derivative curve (tangent modulus as a function of strain).
    #[must_use]
    pub fn stiffness(self) -> TendonStiffness {
        TendonStiffness { curve: self }
    }

    fn toe_scale(&self) -> f64 {
        self.toe_stress / (self.toe_shape.exp() - 1.0)
    }
}

impl Curve for TendonStressStrain {
    fn evaluate(&self, strain: f64) -> f64 {
        self.stress(strain)
    }
}

/// Strain as a function of stress (Pa).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TendonStrainStress {
    curve: TendonStressStrain,
}

impl Curve for TendonStrainStress {
    fn evaluate(&self, stress: f64) -> f64 {
        self.curve.strain(stress)
    }
}

/// Tangent modulus (Pa) as a function of strain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TendonStiffness {
    curve: TendonStressStrain,
}

impl Curve for TendonStiffness {
    fn evaluate(&self, strain: f64) -> f64 {
        self.curve.tangent_modulus(strain)
    }
}
