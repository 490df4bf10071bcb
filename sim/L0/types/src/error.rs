//! Error types for parameter validation.

use thiserror::Error;

/// Errors raised when a [`ParameterSet`](crate::ParameterSet) or state vector
/// fails validation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParamError {
    /// A parameter is NaN or infinite.
    #[error("parameter {name} is not finite: {value}")]
    NonFinite {
        /// Dotted path of the offending field.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A parameter lies outside its physical range.
    #[error("parameter {name} = {value} {reason}")]
    OutOfRange {
        /// Dotted path of the offending field.
        name: &'static str,
        /// The rejected value.
        value: f64,
        /// Human-readable constraint.
        reason: &'static str,
    },

    /// A state vector has a NaN or infinite component.
    #[error("state component {index} is not finite: {value}")]
    NonFiniteState {
        /// Index of the component in the state vector.
        index: usize,
        /// The rejected value.
        value: f64,
    },
}

impl ParamError {
    /// Create a non-finite parameter error.
    #[must_use]
    pub fn non_finite(name: &'static str, value: f64) -> Self {
        Self::NonFinite { name, value }
    }

    /// Create an out-of-range parameter error.
    #[must_use]
    pub fn out_of_range(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::OutOfRange {
            name,
            value,
            reason,
        }
    }
}
