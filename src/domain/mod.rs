//! Domain types shared by the fetch, schedule and rendering stages.
//!
//! - decision dates and institutions (`Institution`, `DecisionDate`)
//! - the fetched rate series (`RateObservation`, `RateSeries`)
//! - calendar events and their description block (`CalendarEvent`, `EventDescription`)
//! - the on-disk schedule configuration (`ScheduleConfig` and its sections)

pub mod config;
pub mod types;

pub use config::*;
pub use types::*;
