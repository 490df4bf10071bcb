//! Adaptive driver loop.

use nalgebra::SVector;
use tracing::debug;

use crate::controller::PiController;
use crate::event::locate_crossing;
use crate::tableau::{DenseOutput, dormand_prince_step};
use crate::{
    EventHit, EventSpec, IntegrateError, IntegratorConfig, Result, Solution, SolverStats,
    Termination, Trajectory,
};

/// Derivative evaluations per trial step (the first stage is reused).
const EVALUATIONS_PER_STEP: usize = 6;

/// A first-order system `y' = f(t, y)` on a fixed-size state.
pub trait OdeSystem<const N: usize> {
    /// Time derivative of the state.
    fn derivative(&self, t: f64, y: &SVector<f64, N>) -> SVector<f64, N>;
}

impl<F, const N: usize> OdeSystem<N> for F
where
    F: Fn(f64, &SVector<f64, N>) -> SVector<f64, N>,
{
    fn derivative(&self, t: f64, y: &SVector<f64, N>) -> SVector<f64, N> {
        self(t, y)
    }
}

/// Integrate `system` from `y0` over `span = (t0, t_end)`.
///
/// Stops at the first terminal event crossing or at `t_end`, whichever
/// comes first. The returned trajectory holds the initial state, every
/// accepted step, and (for event termination) the interpolated crossing
/// state as its last sample.
///
/// # Errors
///
/// Returns an error for an invalid configuration, time span or initial
/// state, and when the step size underflows or the step budget runs out.
pub fn integrate<S, const N: usize>(
    system: &S,
    y0: SVector<f64, N>,
    span: (f64, f64),
    events: &[EventSpec<N>],
    config: &IntegratorConfig,
) -> Result<Solution<N>>
where
    S: OdeSystem<N> + ?Sized,
{
    config.validate()?;
    let (t0, t_end) = span;
    if !t0.is_finite() || !t_end.is_finite() || t_end <= t0 {
        return Err(IntegrateError::InvalidTimeSpan {
            start: t0,
            end: t_end,
        });
    }
    check_finite(&y0)?;

    let mut stats = SolverStats::default();
    let mut k1 = system.derivative(t0, &y0);
    stats.evaluations += 1;
    check_finite(&k1)?;

    let max_step = config.max_step.unwrap_or(t_end - t0).min(t_end - t0);
    let mut h = match config.initial_step {
        Some(h) => h,
        None => initial_step(system, t0, &y0, &k1, config, max_step, &mut stats),
    }
    .min(max_step);

    debug!(
        dim = N,
        t0,
        t_end,
        h0 = h,
        events = events.len(),
        "integration start"
    );

    let mut t = t0;
    let mut y = y0;
    let mut trajectory = Trajectory::with_capacity(64);
    trajectory.push(t, y);
    let mut hits = Vec::new();
    let mut event_values: Vec<f64> = events.iter().map(|e| e.value(&y)).collect();
    let mut controller = PiController::default();

    loop {
        if stats.accepted >= config.max_steps {
            return Err(IntegrateError::MaxStepsExceeded {
                time: t,
                steps: stats.accepted,
            });
        }

        let remaining = t_end - t;
        let min_step = 16.0 * f64::EPSILON * t.abs().max(1.0);
        // A remainder below the minimum step is absorbed into this one.
        let last = h >= remaining - min_step;
        if last {
            h = remaining;
        }
        if h < min_step {
            return Err(IntegrateError::StepSizeUnderflow { time: t, step: h });
        }

        let trial = dormand_prince_step(system, t, &y, &k1, h);
        stats.evaluations += EVALUATIONS_PER_STEP;
        let error = error_norm(&y, &trial.y_new, &trial.error, config);

        if error.is_nan() || error > 1.0 {
            stats.rejected += 1;
            h = controller.reject(h, error);
            continue;
        }

        stats.accepted += 1;
        let t_new = if last { t_end } else { t + h };
        let dense = DenseOutput::new(t, h, &y, &trial.y_new, &trial.stages);

        let new_values: Vec<f64> = events.iter().map(|e| e.value(&trial.y_new)).collect();
        let mut step_hits: Vec<(f64, EventHit<N>)> = Vec::new();
        for (index, event) in events.iter().enumerate() {
            let (before, after) = (event_values[index], new_values[index]);
            if event.direction.crosses(before, after) {
                let theta = locate_crossing(event, &dense, h, before);
                step_hits.push((
                    theta,
                    EventHit {
                        index,
                        time: dense.time_at(theta),
                        state: dense.state_at(theta),
                    },
                ));
            }
        }
        step_hits.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.index.cmp(&b.1.index)));

        for (theta, hit) in step_hits {
            hits.push(hit);
            let event = &events[hit.index];
            debug!(event = event.name, time = hit.time, "event crossing");
            if event.terminal {
                // Crossing state replaces the step end; theta = 1 lands on y_new.
                let time = if theta >= 1.0 { t_new } else { hit.time };
                if time > t {
                    trajectory.push(time, hit.state);
                }
                let termination = Termination::Event {
                    index: hit.index,
                    time,
                };
                debug!(
                    accepted = stats.accepted,
                    rejected = stats.rejected,
                    evaluations = stats.evaluations,
                    "integration stopped on event"
                );
                return Ok(Solution {
                    trajectory,
                    termination,
                    events: hits,
                    stats,
                });
            }
        }

        t = t_new;
        y = trial.y_new;
        k1 = trial.stages[6];
        event_values = new_values;
        trajectory.push(t, y);

        if last {
            debug!(
                accepted = stats.accepted,
                rejected = stats.rejected,
                evaluations = stats.evaluations,
                "integration reached horizon"
            );
            return Ok(Solution {
                trajectory,
                termination: Termination::Horizon,
                events: hits,
                stats,
            });
        }

        h = controller.accept(h, error).min(max_step);
    }
}

fn check_finite<const N: usize>(y: &SVector<f64, N>) -> Result<()> {
    match y.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        Some((index, &value)) => Err(IntegrateError::NonFiniteInitialState { index, value }),
        None => Ok(()),
    }
}

/// Root-mean-square of the error scaled by the mixed tolerance.
fn error_norm<const N: usize>(
    y0: &SVector<f64, N>,
    y1: &SVector<f64, N>,
    error: &SVector<f64, N>,
    config: &IntegratorConfig,
) -> f64 {
    let sum: f64 = y0
        .iter()
        .zip(y1.iter())
        .zip(error.iter())
        .map(|((a, b), e)| {
            let scaled = e / (config.atol + config.rtol * a.abs().max(b.abs()));
            scaled * scaled
        })
        .sum();
    (sum / N as f64).sqrt()
}

/// Hairer's starting step estimate.
///
/// Uses the sizes of `y0` and `f(t0, y0)` and one explicit Euler probe to
/// estimate the second derivative.
fn initial_step<S, const N: usize>(
    system: &S,
    t0: f64,
    y0: &SVector<f64, N>,
    f0: &SVector<f64, N>,
    config: &IntegratorConfig,
    max_step: f64,
    stats: &mut SolverStats,
) -> f64
where
    S: OdeSystem<N> + ?Sized,
{
    const ORDER: f64 = 5.0;

    let scale = y0.map(|v| config.atol + config.rtol * v.abs());
    let d0 = y0.component_div(&scale).norm();
    let d1 = f0.component_div(&scale).norm();

    let h0 = if d0 <= 1e-5 || d1 <= 1e-5 {
        1e-6
    } else {
        0.01 * d0 / d1
    }
    .min(max_step);

    let y_probe = y0 + f0 * h0;
    let f_probe = system.derivative(t0 + h0, &y_probe);
    stats.evaluations += 1;
    let d2 = (f_probe - f0).component_div(&scale).norm() / h0;

    let h1 = if d1.max(d2) <= 1e-15 {
        (h0 * 1e-3).max(1e-6)
    } else {
        (0.01 / d1.max(d2)).powf(1.0 / ORDER)
    };

    let h = (100.0 * h0).min(h1).min(max_step);
    if h.is_finite() && h > 0.0 { h } else { max_step.min(1e-6) }
}
