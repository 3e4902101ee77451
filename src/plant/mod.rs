pub mod submarine;

pub use submarine::{Submarine, SubmarineBuilder, SubmarineParams};
