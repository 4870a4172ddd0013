//! Input and output types for the comparison engine.

mod comparison;
mod extraction;

pub use comparison::*;
pub use extraction::*;
