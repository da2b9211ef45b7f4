//! Resolved decision schedule and event construction.
//!
//! `Schedule` is the validated form of `ScheduleConfig`: dates sorted and
//! de-duplicated per institution, announcement time parsed, numeric knobs
//! range-checked.

use chrono::{NaiveDate, NaiveTime, TimeDelta};

use crate::domain::{
    CalendarSection, DecisionDate, Institution, OutputSection, RatesSection, ScheduleConfig,
    SourcesSection,
};
use crate::error::AppError;

pub mod dst;
pub mod events;

pub use dst::{fomc_announcement, is_us_dst};
pub use events::build_events;

/// FOMC announcement timing with the wall-clock time parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub timed: bool,
    pub time_et: NaiveTime,
    pub duration: TimeDelta,
    pub utc_offset_hours: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub calendar: CalendarSection,
    pub output: OutputSection,
    pub announcement: Announcement,
    pub rates: RatesSection,
    pub sources: SourcesSection,
    /// Sorted by institution, then date.
    pub decisions: Vec<DecisionDate>,
}

impl Schedule {
    pub fn from_config(config: ScheduleConfig) -> Result<Self, AppError> {
        let ScheduleConfig {
            calendar,
            output,
            announcement,
            rates,
            sources,
            dates,
        } = config;

        if rates.window == 0 {
            return Err(AppError::config("rates.window must be at least 1."));
        }
        if !(rates.tolerance.is_finite() && rates.tolerance >= 0.0) {
            return Err(AppError::config(format!(
                "rates.tolerance must be a non-negative number, got {}.",
                rates.tolerance
            )));
        }
        if rates.series_start > rates.series_end {
            return Err(AppError::config(format!(
                "rates.series_start ({}) is after rates.series_end ({}).",
                rates.series_start, rates.series_end
            )));
        }
        if !(-12..=14).contains(&announcement.utc_offset_hours) {
            return Err(AppError::config(format!(
                "announcement.utc_offset_hours out of range: {}.",
                announcement.utc_offset_hours
            )));
        }
        if calendar.timezone.trim().is_empty() {
            return Err(AppError::config("calendar.timezone must not be empty."));
        }

        let time_et = NaiveTime::parse_from_str(announcement.announcement_et.trim(), "%H:%M")
            .map_err(|e| {
                AppError::config(format!(
                    "announcement.announcement_et '{}' is not HH:MM: {e}",
                    announcement.announcement_et
                ))
            })?;

        let mut decisions = Vec::with_capacity(dates.copom.len() + dates.fomc.len());
        decisions.extend(tag_dates(Institution::Copom, dates.copom));
        decisions.extend(tag_dates(Institution::Fomc, dates.fomc));

        Ok(Self {
            calendar,
            output,
            announcement: Announcement {
                timed: announcement.timed,
                time_et,
                duration: TimeDelta::minutes(i64::from(announcement.duration_minutes)),
                utc_offset_hours: announcement.utc_offset_hours,
            },
            rates,
            sources,
            decisions,
        })
    }

    /// Decision dates of one institution, ascending.
    pub fn dates_for(&self, institution: Institution) -> Vec<NaiveDate> {
        self.decisions
            .iter()
            .filter(|d| d.institution == institution)
            .map(|d| d.date)
            .collect()
    }

    pub fn count_for(&self, institution: Institution) -> usize {
        self.decisions
            .iter()
            .filter(|d| d.institution == institution)
            .count()
    }
}

fn tag_dates(institution: Institution, mut dates: Vec<NaiveDate>) -> Vec<DecisionDate> {
    let before = dates.len();
    if !dates.is_sorted() {
        log::warn!("{} dates are not in order; sorting", institution.display_name());
        dates.sort_unstable();
    }
    dates.dedup();
    if dates.len() != before {
        log::warn!(
            "dropped {} duplicate {} date(s)",
            before - dates.len(),
            institution.display_name()
        );
    }
    dates
        .into_iter()
        .map(|date| DecisionDate { institution, date })
        .collect()
}
