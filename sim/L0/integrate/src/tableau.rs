//! Dormand-Prince 5(4) Butcher tableau and continuous extension.
//!
//! Seven stages with the first-same-as-last property: the seventh stage is
//! evaluated at the accepted 5th-order solution and becomes the first stage
//! of the next step. The embedded 4th-order solution only enters through the
//! error weights [`DP_E`].
//!
//! # References
//!
//! - Dormand, J.R. & Prince, P.J. (1980). A family of embedded Runge-Kutta formulae.
//! - Hairer, Nørsett & Wanner (1993). Solving Ordinary Differential Equations I, §II.6.

use nalgebra::SVector;

use crate::OdeSystem;

/// Stage count.
pub(crate) const STAGES: usize = 7;

/// Stage coupling coefficients, row `i` feeds stage `i + 1`.
const DP_A: [[f64; 6]; 6] = [
    [1.0 / 5.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [3.0 / 40.0, 9.0 / 40.0, 0.0, 0.0, 0.0, 0.0],
    [44.0 / 45.0, -56.0 / 15.0, 32.0 / 9.0, 0.0, 0.0, 0.0],
    [
        19372.0 / 6561.0,
        -25360.0 / 2187.0,
        64448.0 / 6561.0,
        -212.0 / 729.0,
        0.0,
        0.0,
    ],
    [
        9017.0 / 3168.0,
        -355.0 / 33.0,
        46732.0 / 5247.0,
        49.0 / 176.0,
        -5103.0 / 18656.0,
        0.0,
    ],
    [
        35.0 / 384.0,
        0.0,
        500.0 / 1113.0,
        125.0 / 192.0,
        -2187.0 / 6784.0,
        11.0 / 84.0,
    ],
];

/// Stage times as fractions of the step.
const DP_C: [f64; STAGES] = [0.0, 1.0 / 5.0, 3.0 / 10.0, 4.0 / 5.0, 8.0 / 9.0, 1.0, 1.0];

/// 5th-order solution weights (equal to the last row of [`DP_A`]).
const DP_B: [f64; STAGES] = [
    35.0 / 384.0,
    0.0,
    500.0 / 1113.0,
    125.0 / 192.0,
    -2187.0 / 6784.0,
    11.0 / 84.0,
    0.0,
];

/// Difference between the 5th- and 4th-order weights.
const DP_E: [f64; STAGES] = [
    71.0 / 57600.0,
    0.0,
    -71.0 / 16695.0,
    71.0 / 1920.0,
    -17253.0 / 339_200.0,
    22.0 / 525.0,
    -1.0 / 40.0,
];

/// Weights of the 4th-order continuous extension (Hairer's `dopri5`).
const DP_D: [f64; STAGES] = [
    -12_715_105_075.0 / 11_282_082_432.0,
    0.0,
    87_487_479_700.0 / 32_700_410_799.0,
    -10_690_763_975.0 / 1_880_347_072.0,
    701_980_252_875.0 / 199_316_789_632.0,
    -1_453_857_185.0 / 822_651_844.0,
    69_997_945.0 / 29_380_423.0,
];

/// Result of one trial step.
pub(crate) struct TrialStep<const N: usize> {
    /// 5th-order solution at `t + h`.
    pub y_new: SVector<f64, N>,
    /// Local error estimate.
    pub error: SVector<f64, N>,
    /// Stage derivatives; `stages[6]` is `f(t + h, y_new)`.
    pub stages: [SVector<f64, N>; STAGES],
}

/// Take one Dormand-Prince step of size `h` from `(t, y)`, given `k1 = f(t, y)`.
///
/// Performs six derivative evaluations.
#[allow(clippy::needless_range_loop)] // indexing mirrors the tableau layout
pub(crate) fn dormand_prince_step<S, const N: usize>(
    system: &S,
    t: f64,
    y: &SVector<f64, N>,
    k1: &SVector<f64, N>,
    h: f64,
) -> TrialStep<N>
where
    S: OdeSystem<N> + ?Sized,
{
    let mut stages = [SVector::<f64, N>::zeros(); STAGES];
    stages[0] = *k1;

    for s in 1..STAGES {
        let mut y_stage = *y;
        for j in 0..s {
            let a = DP_A[s - 1][j];
            if a != 0.0 {
                y_stage += stages[j] * (h * a);
            }
        }
        stages[s] = system.derivative(t + DP_C[s] * h, &y_stage);
    }

    let mut y_new = *y;
    let mut error = SVector::<f64, N>::zeros();
    for s in 0..STAGES {
        if DP_B[s] != 0.0 {
            y_new += stages[s] * (h * DP_B[s]);
        }
        if DP_E[s] != 0.0 {
            error += stages[s] * (h * DP_E[s]);
        }
    }

    TrialStep {
        y_new,
        error,
        stages,
    }
}

/// 4th-order interpolant over one accepted step.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DenseOutput<const N: usize> {
    t0: f64,
    h: f64,
    coeffs: [SVector<f64, N>; 5],
}

impl<const N: usize> DenseOutput<N> {
    /// Build the interpolant for the step `(t0, y0) -> (t0 + h, y1)`.
    pub(crate) fn new(
        t0: f64,
        h: f64,
        y0: &SVector<f64, N>,
        y1: &SVector<f64, N>,
        stages: &[SVector<f64, N>; STAGES],
    ) -> Self {
        let diff = y1 - y0;
        let c3 = stages[0] * h - diff;
        let c4 = diff - stages[6] * h - c3;
        let mut c5 = SVector::<f64, N>::zeros();
        for (k, d) in stages.iter().zip(DP_D) {
            if d != 0.0 {
                c5 += k * (h * d);
            }
        }
        Self {
            t0,
            h,
            coeffs: [*y0, diff, c3, c4, c5],
        }
    }

    /// Time at fraction `theta` of the step.
    pub(crate) fn time_at(&self, theta: f64) -> f64 {
        self.t0 + theta * self.h
    }

    /// State at fraction `theta` in `[0, 1]` of the step.
    ///
    /// Exact at both ends: `theta = 0` gives `y0`, `theta = 1` gives `y1`.
    pub(crate) fn state_at(&self, theta: f64) -> SVector<f64, N> {
        let [c1, c2, c3, c4, c5] = &self.coeffs;
        let rest = 1.0 - theta;
        c1 + (c2 + (c3 + (c4 + c5 * rest) * theta) * rest) * theta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector1;

    fn exp_sin(t: f64, y: &Vector1<f64>) -> Vector1<f64> {
        Vector1::new(t.cos() * y[0])
    }

    #[test]
    fn test_tableau_consistency() {
        // Row sums of A equal the stage times.
        for (s, row) in DP_A.iter().enumerate() {
            let sum: f64 = row.iter().sum();
            assert_relative_eq!(sum, DP_C[s + 1], epsilon = 1e-14);
        }
        assert_relative_eq!(DP_B.iter().sum::<f64>(), 1.0, epsilon = 1e-14);
        assert_relative_eq!(DP_E.iter().sum::<f64>(), 0.0, epsilon = 1e-14);
        assert_eq!(&DP_B[..6], &DP_A[5][..]);
    }

    #[test]
    fn test_step_is_fifth_order() {
        let t: f64 = 0.3;
        let y = Vector1::new(t.sin().exp());
        let k1 = exp_sin(t, &y);

        let err = |h: f64| {
            let step = dormand_prince_step(&exp_sin, t, &y, &k1, h);
            (step.y_new[0] - (t + h).sin().exp()).abs()
        };

        // Halving h shrinks the local error by roughly 2^6.
        let ratio = err(0.1) / err(0.05);
        assert!(ratio > 30.0, "ratio {ratio}");
    }

    #[test]
    fn test_fsal_stage() {
        let t: f64 = 0.3;
        let y = Vector1::new(t.sin().exp());
        let k1 = exp_sin(t, &y);
        let step = dormand_prince_step(&exp_sin, t, &y, &k1, 0.1);

        assert_eq!(step.stages[6], exp_sin(t + 0.1, &step.y_new));
    }

    #[test]
    fn test_dense_output_endpoints_and_accuracy() {
        let t: f64 = 0.3;
        let h = 0.1;
        let y = Vector1::new(t.sin().exp());
        let k1 = exp_sin(t, &y);
        let step = dormand_prince_step(&exp_sin, t, &y, &k1, h);
        let dense = DenseOutput::new(t, h, &y, &step.y_new, &step.stages);

        assert_eq!(dense.state_at(0.0), y);
        assert_relative_eq!(dense.state_at(1.0)[0], step.y_new[0], epsilon = 1e-15);
        assert_relative_eq!(dense.time_at(0.5), t + 0.05, epsilon = 1e-15);

        for theta in [0.25, 0.4, 0.75] {
            let exact = (t + theta * h).sin().exp();
            assert_relative_eq!(dense.state_at(theta)[0], exact, epsilon = 1e-8);
        }
    }
}
