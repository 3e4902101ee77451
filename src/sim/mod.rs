pub mod runner;
pub mod trajectory;

pub use runner::{simulate_with, ClosedLoop, SimError};
pub use trajectory::Trajectory;
