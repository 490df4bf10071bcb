//! Event functions and zero-crossing localization.
//!
//! An event is a scalar function of the state. After every accepted step the
//! solver compares its value at both ends of the step; a sign change in the
//! requested direction is refined by bisection on the step's dense output.

use nalgebra::SVector;

use crate::tableau::DenseOutput;

/// Bisection stops after this many halvings even if the bracket is still wide.
const MAX_BISECTIONS: usize = 200;

/// Which sign changes trigger an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventDirection {
    /// Either direction.
    #[default]
    Either,
    /// From negative to non-negative.
    Rising,
    /// From positive to non-positive.
    Falling,
}

impl EventDirection {
    /// Whether the change from `before` to `after` counts as a crossing.
    ///
    /// A value that starts exactly at zero never counts.
    #[must_use]
    pub fn crosses(self, before: f64, after: f64) -> bool {
        let rising = before < 0.0 && after >= 0.0;
        let falling = before > 0.0 && after <= 0.0;
        match self {
            Self::Either => rising || falling,
            Self::Rising => rising,
            Self::Falling => falling,
        }
    }
}

/// Scalar event function of the state.
pub type EventFn<const N: usize> = Box<dyn Fn(&SVector<f64, N>) -> f64 + Send + Sync>;

/// An event to watch for during integration.
pub struct EventSpec<const N: usize> {
    /// Short label used in logs.
    pub name: &'static str,
    /// Event value; the event fires when it crosses zero.
    pub function: EventFn<N>,
    /// Which crossings count.
    pub direction: EventDirection,
    /// Whether integration stops at the first crossing.
    pub terminal: bool,
}

impl<const N: usize> EventSpec<N> {
    /// Terminal event firing on a crossing in either direction.
    pub fn terminal<F>(name: &'static str, function: F) -> Self
    where
        F: Fn(&SVector<f64, N>) -> f64 + Send + Sync + 'static,
    {
        Self {
            name,
            function: Box::new(function),
            direction: EventDirection::Either,
            terminal: true,
        }
    }

    /// Non-terminal event: crossings are recorded and integration continues.
    pub fn recording<F>(name: &'static str, function: F) -> Self
    where
        F: Fn(&SVector<f64, N>) -> f64 + Send + Sync + 'static,
    {
        Self {
            name,
            function: Box::new(function),
            direction: EventDirection::Either,
            terminal: false,
        }
    }

    /// Restrict the crossing direction.
    #[must_use]
    pub fn direction(mut self, direction: EventDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Evaluate the event function.
    pub fn value(&self, state: &SVector<f64, N>) -> f64 {
        (self.function)(state)
    }
}

impl<const N: usize> std::fmt::Debug for EventSpec<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSpec")
            .field("name", &self.name)
            .field("direction", &self.direction)
            .field("terminal", &self.terminal)
            .finish_non_exhaustive()
    }
}

/// A located event crossing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventHit<const N: usize> {
    /// Index of the event in the list passed to the solver.
    pub index: usize,
    /// Crossing time.
    pub time: f64,
    /// Interpolated state at the crossing.
    pub state: SVector<f64, N>,
}

/// Locate the crossing of `event` inside an accepted step.
///
/// `before` is the event value at the start of the step. Returns the
/// fraction of the step on the far side of the crossing, so the event
/// value there has already changed sign.
pub(crate) fn locate_crossing<const N: usize>(
    event: &EventSpec<N>,
    dense: &DenseOutput<N>,
    h: f64,
    before: f64,
) -> f64 {
    let mut lo = 0.0_f64;
    let mut hi = 1.0_f64;
    let mut value_lo = before;

    for _ in 0..MAX_BISECTIONS {
        let t_hi = dense.time_at(hi);
        if (hi - lo) * h <= 4.0 * f64::EPSILON * t_hi.abs().max(1.0) {
            break;
        }
        let mid = 0.5 * (lo + hi);
        let value_mid = event.value(&dense.state_at(mid));
        if same_side(value_lo, value_mid) {
            lo = mid;
            value_lo = value_mid;
        } else {
            hi = mid;
        }
    }

    hi
}

fn same_side(a: f64, b: f64) -> bool {
    (a < 0.0 && b < 0.0) || (a > 0.0 && b > 0.0)
}
