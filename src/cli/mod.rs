//! Command-line parsing.
//!
//! Every flag is optional; a bare `juros` fetches BCB data and writes
//! `juros.ics` from the built-in schedule.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "juros",
    version,
    about = "Generate an iCalendar file of COPOM and FOMC rate decisions"
)]
pub struct Cli {
    /// Schedule TOML (dates, output names, sources). Defaults to the built-in schedule.
    #[arg(short, long, value_name = "TOML")]
    pub config: Option<PathBuf>,

    /// Path of the combined calendar file.
    #[arg(short, long, value_name = "ICS")]
    pub output: Option<PathBuf>,

    /// Write separate COPOM and FED calendars instead of a combined one.
    #[arg(long)]
    pub split: bool,

    /// Do not contact the BCB APIs; rate fields fall back to placeholders.
    #[arg(long)]
    pub offline: bool,

    /// Fetch the Selic series but skip the market-expectations request.
    #[arg(long)]
    pub no_expectations: bool,

    /// Treat this date as today when separating past and future decisions (default: UTC date).
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub today: Option<NaiveDate>,

    /// Emit FOMC decisions as whole-day events.
    #[arg(long)]
    pub fomc_all_day: bool,
}
