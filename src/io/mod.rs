//! Input/output helpers.
//!
//! - schedule TOML loading (`schedule`)
//! - iCalendar rendering (`ics`)
//! - writing calendar files (`export`)

pub mod export;
pub mod ics;
pub mod schedule;

pub use export::*;
pub use ics::*;
pub use schedule::*;
