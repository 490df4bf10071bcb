//! Integration output.

use nalgebra::SVector;

use crate::EventHit;

/// Time-ordered samples of the state at accepted steps.
///
/// Append-only while the solver runs; read-only afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Trajectory<const N: usize> {
    times: Vec<f64>,
    states: Vec<SVector<f64, N>>,
}

impl<const N: usize> Trajectory<N> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            times: Vec::with_capacity(capacity),
            states: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, time: f64, state: SVector<f64, N>) {
        debug_assert!(self.times.last().is_none_or(|&t| t < time));
        self.times.push(time);
        self.states.push(state);
    }

    /// Sample times, strictly increasing.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// States, aligned with [`times`](Self::times).
    #[must_use]
    pub fn states(&self) -> &[SVector<f64, N>] {
        &self.states
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether there are no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Final sample.
    #[must_use]
    pub fn last(&self) -> Option<(f64, &SVector<f64, N>)> {
        self.times.last().copied().zip(self.states.last())
    }

    /// Time history of one state component.
    ///
    /// Returns an empty vector for an out-of-range index.
    #[must_use]
    pub fn component(&self, index: usize) -> Vec<f64> {
        if index >= N {
            return Vec::new();
        }
        self.states.iter().map(|s| s[index]).collect()
    }

    /// Iterate over `(time, state)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &SVector<f64, N>)> + '_ {
        self.times.iter().copied().zip(self.states.iter())
    }
}

/// Why integration stopped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Termination {
    /// A terminal event fired.
    Event {
        /// Index of the event.
        index: usize,
        /// Crossing time.
        time: f64,
    },
    /// The end of the time span was reached without a terminal event.
    Horizon,
}

impl Termination {
    /// Whether a terminal event ended the run.
    #[must_use]
    pub fn is_event(&self) -> bool {
        matches!(self, Self::Event { .. })
    }
}

/// Step bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolverStats {
    /// Accepted steps.
    pub accepted: usize,
    /// Rejected steps.
    pub rejected: usize,
    /// Derivative evaluations.
    pub evaluations: usize,
}

/// Result of a successful integration.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<const N: usize> {
    /// Sampled trajectory, ending at the terminal crossing or the horizon.
    pub trajectory: Trajectory<N>,
    /// Why the run stopped.
    pub termination: Termination,
    /// Every event crossing located, in time order.
    pub events: Vec<EventHit<N>>,
    /// Step bookkeeping.
    pub stats: SolverStats,
}

impl<const N: usize> Solution<N> {
    /// Final time and state.
    #[must_use]
    pub fn final_state(&self) -> Option<(f64, &SVector<f64, N>)> {
        self.trajectory.last()
    }

    /// Time of the terminal event, if one fired.
    #[must_use]
    pub fn event_time(&self) -> Option<f64> {
        match self.termination {
            Termination::Event { time, .. } => Some(time),
            Termination::Horizon => None,
        }
    }
}
