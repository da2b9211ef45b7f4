//! The batch run, end to end:
//! fetch BCB data -> build events -> render calendar(s) -> write files.
//!
//! `run_with_data` is the pure middle of that chain, so tests exercise the
//! whole rendering path without a network.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};

use crate::data::{ExpectationsClient, MarketExpectation, SgsClient};
use crate::domain::{CalendarEvent, Institution, RateSeries};
use crate::error::AppError;
use crate::schedule::{Schedule, build_events};

/// Knobs for a single run that are not part of the schedule file.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Skip both HTTP fetches.
    pub offline: bool,
    /// Fetch the market expectation (ignored when offline).
    pub fetch_expectations: bool,
    /// Decisions on or before this date are treated as already announced.
    pub today: NaiveDate,
    pub generated_at: DateTime<Utc>,
}

/// Upstream data for the run; empty when offline.
#[derive(Debug, Clone, Default)]
pub struct FetchedData {
    pub series: RateSeries,
    pub expectation: MarketExpectation,
    pub offline: bool,
}

/// One calendar file, rendered but not yet written.
#[derive(Debug, Clone)]
pub struct RenderedCalendar {
    pub path: PathBuf,
    pub contents: String,
    pub event_count: usize,
}

#[derive(Debug, Clone)]
pub struct RunOutput {
    pub data: FetchedData,
    pub events: Vec<CalendarEvent>,
    pub calendars: Vec<RenderedCalendar>,
}

/// Fetch, build and render. Nothing is written to disk.
pub fn run(schedule: &Schedule, options: &RunOptions) -> Result<RunOutput, AppError> {
    let data = fetch_data(schedule, options)?;
    Ok(run_with_data(schedule, data, options))
}

/// Perform at most two sequential requests; any failure aborts the run.
pub fn fetch_data(schedule: &Schedule, options: &RunOptions) -> Result<FetchedData, AppError> {
    if options.offline {
        log::info!("offline run: skipping BCB requests");
        return Ok(FetchedData {
            offline: true,
            ..FetchedData::default()
        });
    }

    let series = SgsClient::from_env(&schedule.sources.sgs_url)
        .fetch_series(schedule.rates.series_start, schedule.rates.series_end)?;

    let expectation = if options.fetch_expectations {
        ExpectationsClient::from_env(&schedule.sources.expectations_url).fetch_latest()?
    } else {
        log::info!("skipping market expectations");
        MarketExpectation::default()
    };

    Ok(FetchedData {
        series,
        expectation,
        offline: false,
    })
}

/// Build events and render the calendar file(s) from already-fetched data.
pub fn run_with_data(schedule: &Schedule, data: FetchedData, options: &RunOptions) -> RunOutput {
    let events = build_events(schedule, &data.series, &data.expectation, options.today);
    log::debug!("built {} events", events.len());

    let header = &schedule.calendar;
    let calendars: Vec<RenderedCalendar> = if schedule.output.split {
        [
            (Institution::Copom, schedule.output.copom.clone()),
            (Institution::Fomc, schedule.output.fed.clone()),
        ]
        .into_iter()
        .map(|(institution, path)| {
            let subset: Vec<CalendarEvent> = events
                .iter()
                .filter(|e| e.institution == institution)
                .cloned()
                .collect();
            RenderedCalendar {
                path,
                contents: crate::io::render_calendar(header, &subset, options.generated_at),
                event_count: subset.len(),
            }
        })
        .collect()
    } else {
        vec![RenderedCalendar {
            path: schedule.output.combined.clone(),
            contents: crate::io::render_calendar(header, &events, options.generated_at),
            event_count: events.len(),
        }]
    };

    RunOutput {
        data,
        events,
        calendars,
    }
}

/// Write every rendered calendar; either all files land or none do.
pub fn write_outputs(output: &RunOutput) -> Result<(), AppError> {
    let files: Vec<(&Path, &str)> = output
        .calendars
        .iter()
        .map(|c| (c.path.as_path(), c.contents.as_str()))
        .collect();
    crate::io::write_calendars(&files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::io::parse_schedule;

    fn options(today: NaiveDate) -> RunOptions {
        RunOptions {
            offline: true,
            fetch_expectations: false,
            today,
            generated_at: Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn single_decision_without_data_renders_placeholders() {
        let schedule = parse_schedule("[dates]\ncopom = [\"2025-01-29\"]\n", "test").unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let out = run_with_data(&schedule, FetchedData::default(), &options(today));

        assert_eq!(out.calendars.len(), 1);
        let ics = out.calendars[0].contents.replace("\r\n ", "");
        assert!(ics.contains("taxa divulgada: a divulgar"));
        assert!(ics.contains("expectativa: a definir (mercado)"));
        assert!(ics.contains("DTSTART;VALUE=DATE:20250129"));
        assert!(ics.contains("DTEND;VALUE=DATE:20250130"));
        assert!(ics.contains("DTSTAMP:20261019T093000Z"));
    }

    #[test]
    fn split_output_writes_one_calendar_per_institution() {
        let mut schedule = crate::io::load_schedule(None).unwrap();
        schedule.output.split = true;
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let out = run_with_data(&schedule, FetchedData::default(), &options(today));

        assert_eq!(out.calendars.len(), 2);
        assert_eq!(out.calendars[0].path, PathBuf::from("copom.ics"));
        assert_eq!(out.calendars[0].event_count, 16);
        assert!(!out.calendars[0].contents.contains("fed-rate-"));
        assert_eq!(out.calendars[1].path, PathBuf::from("fed.ics"));
        assert!(out.calendars[1].contents.contains("fed-rate-20250129@juros"));
    }

    #[test]
    fn failed_fetch_aborts_before_any_file_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let mut schedule = crate::io::load_schedule(None).unwrap();
        schedule.sources.sgs_url =
            crate::data::test_server::serve_once("503 Service Unavailable", "{}");
        schedule.output.combined = dir.path().join("juros.ics");

        let mut opts = options(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        opts.offline = false;
        opts.fetch_expectations = false;

        let err = run(&schedule, &opts).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_UPSTREAM);
        assert!(!schedule.output.combined.exists());
    }

    #[test]
    fn split_write_puts_both_files_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let mut schedule = crate::io::load_schedule(None).unwrap();
        schedule.output.split = true;
        schedule.output.copom = dir.path().join("copom.ics");
        schedule.output.fed = dir.path().join("fed.ics");

        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let out = run_with_data(&schedule, FetchedData::default(), &options(today));
        write_outputs(&out).unwrap();

        let fed = std::fs::read_to_string(&schedule.output.fed).unwrap();
        assert!(fed.contains("fed-rate-20250129@juros"));
        assert!(schedule.output.copom.exists());
    }

    #[test]
    fn offline_fetch_makes_no_requests() {
        let schedule = crate::io::load_schedule(None).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let data = fetch_data(&schedule, &options(today)).unwrap();
        assert!(data.offline);
        assert!(data.series.is_empty());
        assert_eq!(data.expectation.median, None);
    }
}
