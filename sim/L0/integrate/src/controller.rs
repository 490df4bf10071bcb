//! Proportional-integral step-size controller.
//!
//! The next step is scaled from the normalized error of the current step
//! and the previous accepted one:
//!
//! ```text
//! h_new = h * safety * err^(-alpha) * err_prev^beta
//! ```
//!
//! with the factor clamped to `[min_factor, max_factor]`. `err` is already
//! divided by the mixed tolerance, so a step is acceptable when `err <= 1`.

/// PI controller for embedded Runge-Kutta pairs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PiController {
    /// Exponent on the current error.
    pub alpha: f64,
    /// Exponent on the previous accepted error.
    pub beta: f64,
    /// Safety factor applied to every proposal.
    pub safety: f64,
    /// Smallest allowed shrink factor.
    pub min_factor: f64,
    /// Largest allowed growth factor.
    pub max_factor: f64,
    prev_error: f64,
    rejected_last: bool,
}

impl Default for PiController {
    fn default() -> Self {
        Self {
            alpha: 0.17,
            beta: 0.04,
            safety: 0.9,
            min_factor: 0.2,
            max_factor: 10.0,
            prev_error: 1e-4,
            rejected_last: false,
        }
    }
}

/// Floor on the remembered error so a perfect step cannot blow up the
/// integral term.
const ERROR_FLOOR: f64 = 1e-4;

impl PiController {
    /// Propose the next step after accepting a step of size `h` with
    /// normalized error `error`.
    pub fn accept(&mut self, h: f64, error: f64) -> f64 {
        let factor = if error <= 0.0 {
            self.max_factor
        } else {
            (self.safety * error.powf(-self.alpha) * self.prev_error.powf(self.beta))
                .clamp(self.min_factor, self.max_factor)
        };
        let factor = if self.rejected_last {
            factor.min(1.0)
        } else {
            factor
        };

        self.prev_error = error.max(ERROR_FLOOR);
        self.rejected_last = false;
        h * factor
    }

    /// Propose a retry after rejecting a step of size `h`.
    ///
    /// A non-finite error shrinks by the smallest factor.
    pub fn reject(&mut self, h: f64, error: f64) -> f64 {
        self.rejected_last = true;
        if !error.is_finite() {
            return h * self.min_factor;
        }
        let factor = (self.safety * error.powf(-self.alpha)).clamp(self.min_factor, 1.0);
        h * factor
    }
}
