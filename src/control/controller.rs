use super::ControlError;

/// Trait for depth controllers.
///
/// Implement this to plug a custom controller into the closed-loop
/// simulation.
pub trait Controller {
    /// Compute the control action for one step from the reference and the
    /// measured output.
    fn control(&mut self, reference: f64, measured: f64, dt: f64) -> Result<f64, ControlError>;

    /// Reset controller internal state (e.g., previous error).
    fn reset(&mut self) {}

    /// Human-readable name for logging/display.
    fn name(&self) -> &str {
        "unnamed"
    }
}
