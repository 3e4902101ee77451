use super::{ControlError, Controller};

// ---------------------------------------------------------------------------
// PD Controller (single axis, discrete time)
// ---------------------------------------------------------------------------

pub const DEFAULT_KP: f64 = 0.15;
pub const DEFAULT_KD: f64 = 0.6;

/// Discrete-time proportional-derivative controller.
///
/// `u[t] = kp * e[t] + kd * (e[t] - e[t-1]) / dt` with `e[t] = r[t] - y[t]`.
///
/// Gains and inputs are not validated. Non-finite references or
/// measurements pass straight through the arithmetic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdController {
    kp: f64,
    kd: f64,
    previous_error: f64,
}

impl PdController {
    pub fn new(kp: f64, kd: f64) -> Self {
        Self { kp, kd, previous_error: 0.0 }
    }

    pub fn kp(&self) -> f64 {
        self.kp
    }

    pub fn kd(&self) -> f64 {
        self.kd
    }

    /// Error seen on the previous successful call (0.0 after construction or reset).
    pub fn previous_error(&self) -> f64 {
        self.previous_error
    }

    /// Clear the previous error.
    pub fn reset(&mut self) {
        self.previous_error = 0.0;
    }

    /// Compute the control action for the current step.
    ///
    /// Fails with [`ControlError::InvalidArgument`] when `dt` is not strictly
    /// positive; the previous error is left untouched in that case.
    pub fn compute(&mut self, reference: f64, measured: f64, dt: f64) -> Result<f64, ControlError> {
        if dt.is_nan() || dt <= 0.0 {
            return Err(ControlError::InvalidArgument { dt });
        }
        Ok(self.step(reference - measured, dt))
    }

    /// [`compute`](Self::compute) with a unit time step.
    pub fn compute_unit(&mut self, reference: f64, measured: f64) -> f64 {
        self.step(reference - measured, 1.0)
    }

    // `dt` already checked by the caller.
    fn step(&mut self, error: f64, dt: f64) -> f64 {
        let derivative = (error - self.previous_error) / dt;
        self.previous_error = error;
        self.kp * error + self.kd * derivative
    }
}

impl Default for PdController {
    fn default() -> Self {
        Self::new(DEFAULT_KP, DEFAULT_KD)
    }
}

impl Controller for PdController {
    fn control(&mut self, reference: f64, measured: f64, dt: f64) -> Result<f64, ControlError> {
        self.compute(reference, measured, dt)
    }

    fn reset(&mut self) {
        PdController::reset(self);
    }

    fn name(&self) -> &str {
        "PD"
    }
}
