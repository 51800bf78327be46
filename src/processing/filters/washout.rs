use crate::error::{require_positive, ConfigError};

/// First-order washout (high-pass) filter.
///
/// Implements the zero-order-hold difference equation:
/// y[k] = c1*y[k-1] + c2*(x[k] - x[k-1]), c1 = exp(-dt/tau), c2 = 1/tau
///
/// Applied to acceleration it approximates jerk while rejecting any constant
/// offset, such as the gravity component on the sensed axis.
#[derive(Debug, Clone)]
pub struct WashoutFilter {
    c1: f64,
    c2: f64,
    past_input: f64,
    past_output: f64,
}

impl WashoutFilter {
    /// `dt` is the sampling period and `tau` the time constant, both in seconds.
    pub fn new(dt: f64, tau: f64) -> Result<Self, ConfigError> {
        require_positive("dt", dt)?;
        require_positive("tau", tau)?;

        Ok(Self {
            c1: (-dt / tau).exp(),
            c2: 1.0 / tau,
            past_input: 0.0,
            past_output: 0.0,
        })
    }

    pub fn step(&mut self, input: f64) -> f64 {
        let output = self.c1 * self.past_output + self.c2 * (input - self.past_input);

        // Update internal sample history
        self.past_input = input;
        self.past_output = output;

        output
    }

    /// Zeroes the history, coefficients are kept.
    pub fn reset(&mut self) {
        self.past_input = 0.0;
        self.past_output = 0.0;
    }

    pub fn coefficients(&self) -> (f64, f64) {
        (self.c1, self.c2)
    }

    pub fn last_output(&self) -> f64 {
        self.past_output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coefficients_follow_dt_and_tau() {
        let filter = WashoutFilter::new(0.02, 0.1).unwrap();
        let (c1, c2) = filter.coefficients();
        assert!((c1 - (-0.2f64).exp()).abs() < 1e-12);
        assert!((c2 - 10.0).abs() < 1e-12);
    }

    #[test]
    fn constant_input_washes_out() {
        let mut filter = WashoutFilter::new(0.02, 0.1).unwrap();
        let mut output = 0.0;
        for _ in 0..100 {
            output = filter.step(1.0);
        }
        assert!(output.abs() < 1e-6, "output {} did not decay", output);
    }

    #[test]
    fn first_step_sees_jump_from_zero() {
        let mut filter = WashoutFilter::new(0.02, 0.1).unwrap();
        assert!((filter.step(0.5) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn spike_produces_positive_then_negative_jerk() {
        let mut filter = WashoutFilter::new(0.02, 0.1).unwrap();
        let up = filter.step(0.5);
        let down = filter.step(0.0);
        assert!(up > 0.0);
        assert!(down < 0.0);
        // c1 * 5 - 5
        assert!((down - (5.0 * (-0.2f64).exp() - 5.0)).abs() < 1e-12);
    }

    #[test]
    fn reset_clears_history() {
        let mut filter = WashoutFilter::new(0.02, 0.1).unwrap();
        filter.step(3.0);
        filter.reset();
        assert_eq!(filter.last_output(), 0.0);
        assert!((filter.step(0.5) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_non_positive_parameters() {
        assert_eq!(
            WashoutFilter::new(0.0, 0.1).unwrap_err(),
            ConfigError::NonPositive { name: "dt", value: 0.0 }
        );
        assert_eq!(
            WashoutFilter::new(0.02, -1.0).unwrap_err(),
            ConfigError::NonPositive { name: "tau", value: -1.0 }
        );
        assert!(WashoutFilter::new(f64::NAN, 0.1).is_err());
    }
}
