use thiserror::Error;

/// Failure of a single controller step.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ControlError {
    /// The time step was zero, negative or NaN.
    #[error("dt must be positive; received dt={dt}")]
    InvalidArgument { dt: f64 },
}
