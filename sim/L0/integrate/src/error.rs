//! Error types for the integrator.

use thiserror::Error;

/// Fatal integrator failures.
///
/// Reaching the end of the time span without a terminal event is not an
/// error; it is reported as [`Termination::Horizon`](crate::Termination).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegrateError {
    /// The time span is empty, reversed or non-finite.
    #[error("invalid time span [{start}, {end}]")]
    InvalidTimeSpan {
        /// Requested start time.
        start: f64,
        /// Requested end time.
        end: f64,
    },

    /// A tolerance or step setting is not usable.
    #[error("invalid integrator setting {name} = {value}")]
    InvalidTolerance {
        /// Name of the offending setting.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// The initial state, or its derivative, contains NaN or infinity.
    #[error("initial state component {index} is not finite: {value}")]
    NonFiniteInitialState {
        /// Index of the offending component.
        index: usize,
        /// Offending value.
        value: f64,
    },

    /// The step size shrank below what the time resolution can represent.
    #[error("step size underflow at t = {time}: h = {step}")]
    StepSizeUnderflow {
        /// Time at which the controller gave up.
        time: f64,
        /// Last attempted step size.
        step: f64,
    },

    /// The accepted-step budget ran out before the end of the time span.
    #[error("exceeded {steps} steps at t = {time}")]
    MaxStepsExceeded {
        /// Time reached.
        time: f64,
        /// Number of accepted steps taken.
        steps: usize,
    },
}

impl IntegrateError {
    /// Create an invalid setting error.
    #[must_use]
    pub fn invalid_tolerance(name: &'static str, value: f64) -> Self {
        Self::InvalidTolerance { name, value }
    }

    /// Whether the error was raised before any step was taken.
    #[must_use]
    pub fn is_setup_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidTimeSpan { .. }
                | Self::InvalidTolerance { .. }
                | Self::NonFiniteInitialState { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IntegrateError::StepSizeUnderflow {
            time: 0.5,
            step: 1e-18,
        };
        assert!(err.to_string().contains("underflow"));

        let err = IntegrateError::invalid_tolerance("rtol", -1.0);
        assert!(err.to_string().contains("rtol"));
    }

    #[test]
    fn test_setup_classification() {
        assert!(IntegrateError::invalid_tolerance("atol", 0.0).is_setup_error());
        assert!(
            !IntegrateError::MaxStepsExceeded {
                time: 1.0,
                steps: 10
            }
            .is_setup_error()
        );
    }
}
