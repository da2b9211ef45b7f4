//! Top-level application orchestration.
//!
//! `src/main.rs` stays tiny; this module is the real main:
//! - loads `.env` and sets up logging
//! - parses CLI arguments and the schedule
//! - runs the pipeline (fetch, build, render)
//! - writes the calendar file(s) and prints a summary

use chrono::Utc;
use clap::Parser;

use crate::cli::Cli;
use crate::error::AppError;
use crate::schedule::Schedule;

pub mod pipeline;

/// Entry point for the `juros` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut schedule = crate::io::load_schedule(cli.config.as_deref())?;
    apply_overrides(&mut schedule, &cli);

    let options = pipeline::RunOptions {
        offline: cli.offline,
        fetch_expectations: !cli.no_expectations,
        today: cli.today.unwrap_or_else(|| Utc::now().date_naive()),
        generated_at: Utc::now(),
    };
    log::info!(
        "building calendar for {} decisions (today = {})",
        schedule.decisions.len(),
        options.today
    );

    let output = pipeline::run(&schedule, &options)?;
    pipeline::write_outputs(&output)?;

    println!("{}", crate::report::format_run_summary(&output));
    Ok(())
}

/// Fold CLI flags into the loaded schedule.
pub fn apply_overrides(schedule: &mut Schedule, cli: &Cli) {
    if let Some(path) = &cli.output {
        schedule.output.combined = path.clone();
    }
    if cli.split {
        schedule.output.split = true;
    }
    if cli.fomc_all_day {
        schedule.announcement.timed = false;
    }
}
