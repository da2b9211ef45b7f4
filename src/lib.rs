//! `juros-calendar` library crate.
//!
//! The `juros` binary is a thin wrapper around this library so the fetch,
//! scheduling and rendering stages can be tested without spawning processes
//! or touching the network.

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod report;
pub mod schedule;
