//! Shared domain types.
//!
//! Everything here is built once per run and never mutated after the calendar
//! is rendered.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Placeholder for a rate that has not been published (or could not be found).
pub const PENDING_RATE: &str = "a divulgar";
/// Placeholder for an expectation that cannot be classified.
pub const PENDING_EXPECTATION: &str = "a definir (mercado)";
/// Placeholder for an average with no known inputs.
pub const PENDING_AVERAGE: &str = "a calcular";
/// Placeholder for an outlook with no reference data.
pub const PENDING_OUTLOOK: &str = "a definir";
/// Outlook for decisions that already happened.
pub const PAST_OUTLOOK: &str = "a definir (após comunicado/ata)";

/// Policy-rate committee whose decisions end up on the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Institution {
    /// Banco Central do Brasil, Comitê de Política Monetária.
    Copom,
    /// US Federal Open Market Committee.
    Fomc,
}

impl Institution {
    /// Namespace used in event UIDs.
    pub fn tag(self) -> &'static str {
        match self {
            Institution::Copom => "copom-rate",
            Institution::Fomc => "fed-rate",
        }
    }

    pub fn flag(self) -> &'static str {
        match self {
            Institution::Copom => "🇧🇷",
            Institution::Fomc => "🇺🇸",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Institution::Copom => "COPOM",
            Institution::Fomc => "FED",
        }
    }
}

/// A day on which a committee announces a rate decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DecisionDate {
    pub institution: Institution,
    pub date: NaiveDate,
}

/// One `(date, value)` point of a published rate series, value in % a.a.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateObservation {
    pub date: NaiveDate,
    pub value: f64,
}

/// A rate series whose observations are sorted by date, ascending.
///
/// Duplicate dates are allowed; lookups resolve them to the last entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateSeries {
    observations: Vec<RateObservation>,
}

impl RateSeries {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a series from observations that must already be in ascending date order.
    pub fn from_ascending(observations: Vec<RateObservation>) -> Result<Self, AppError> {
        for (idx, pair) in observations.windows(2).enumerate() {
            if pair[1].date < pair[0].date {
                return Err(AppError::upstream(format!(
                    "Rate series is not sorted: observation {} ({}) comes after {}.",
                    idx + 1,
                    pair[1].date,
                    pair[0].date
                )));
            }
        }
        if let Some(bad) = observations.iter().find(|o| !o.value.is_finite()) {
            return Err(AppError::upstream(format!(
                "Non-finite rate value on {}.",
                bad.date
            )));
        }
        Ok(Self { observations })
    }

    pub fn observations(&self) -> &[RateObservation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn last(&self) -> Option<&RateObservation> {
        self.observations.last()
    }
}

/// Outcome of comparing an announced rate against the market reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surprise {
    Within,
    Above,
    Below,
    /// Either side of the comparison is unknown.
    Undetermined,
}

impl Surprise {
    pub fn label(self) -> &'static str {
        match self {
            Surprise::Within => "dentro do esperado",
            Surprise::Above => "acima do esperado",
            Surprise::Below => "abaixo do esperado",
            Surprise::Undetermined => PENDING_EXPECTATION,
        }
    }
}

/// When an event happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventTiming {
    /// Whole-day event; `end_exclusive` is the following day.
    AllDay {
        start: NaiveDate,
        end_exclusive: NaiveDate,
    },
    /// Local wall-clock times in `tzid`.
    Timed {
        start: NaiveDateTime,
        end: NaiveDateTime,
        tzid: String,
    },
}

/// The four-line text block attached to every event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDescription {
    pub rate: String,
    pub expectation: String,
    pub average: String,
    pub outlook: String,
    /// Number of decisions behind `average`, shown in its label.
    pub window: usize,
}

impl EventDescription {
    /// Description with every field still pending.
    pub fn pending(window: usize) -> Self {
        Self {
            rate: PENDING_RATE.to_string(),
            expectation: PENDING_EXPECTATION.to_string(),
            average: PENDING_AVERAGE.to_string(),
            outlook: PENDING_OUTLOOK.to_string(),
            window,
        }
    }

    pub fn render(&self) -> String {
        [
            format!("taxa divulgada: {}", self.rate),
            format!("expectativa: {}", self.expectation),
            format!("média últimas {} decisões: {}", self.window, self.average),
            format!("perspectivas: {}", self.outlook),
        ]
        .join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub uid: String,
    pub institution: Institution,
    pub summary: String,
    pub timing: EventTiming,
    pub description: EventDescription,
}

/// Format a rate the way descriptions show it.
pub fn format_rate(value: f64) -> String {
    format!("{value:.2}% a.a.")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn series_rejects_descending_dates() {
        let obs = vec![
            RateObservation { date: d(2025, 2, 1), value: 13.25 },
            RateObservation { date: d(2025, 1, 1), value: 12.25 },
        ];
        let err = RateSeries::from_ascending(obs).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_UPSTREAM);
    }

    #[test]
    fn series_accepts_duplicates() {
        let obs = vec![
            RateObservation { date: d(2025, 1, 1), value: 12.25 },
            RateObservation { date: d(2025, 1, 1), value: 13.25 },
        ];
        assert_eq!(RateSeries::from_ascending(obs).unwrap().len(), 2);
    }

    #[test]
    fn description_renders_four_labelled_lines() {
        let text = EventDescription::pending(12).render();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "taxa divulgada: a divulgar",
                "expectativa: a definir (mercado)",
                "média últimas 12 decisões: a calcular",
                "perspectivas: a definir",
            ]
        );
    }

    #[test]
    fn average_label_follows_window() {
        let mut description = EventDescription::pending(6);
        description.average = "14.50% a.a.".to_string();
        assert!(
            description
                .render()
                .contains("média últimas 6 decisões: 14.50% a.a.")
        );
        assert!(!description.render().contains("12"));
    }

    #[test]
    fn rate_formatting_uses_two_decimals() {
        assert_eq!(format_rate(15.0), "15.00% a.a.");
        assert_eq!(format_rate(14.256), "14.26% a.a.");
    }
}
