pub mod controller;
pub mod error;
pub mod pd;

pub use controller::Controller;
pub use error::ControlError;
pub use pd::PdController;
