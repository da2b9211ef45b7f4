//! Numeric helpers over the fetched rate series: point lookup, trailing
//! averages and surprise classification.

pub mod average;
pub mod lookup;
pub mod surprise;

pub use average::*;
pub use lookup::*;
pub use surprise::*;
