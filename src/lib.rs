//! Discrete-time PD depth control for an uncrewed underwater vehicle.
//!
//! [`control::PdController`] is the controller itself. Everything else in
//! the crate is the harness that drives it: a point-mass plant, mission
//! profiles, the closed-loop runner and output writers.

pub mod config;
pub mod control;
pub mod io;
pub mod mission;
pub mod plant;
pub mod sim;

pub use control::{ControlError, Controller, PdController};
pub use mission::Mission;
pub use sim::{ClosedLoop, Trajectory};
