//! On-disk schedule configuration.
//!
//! Every section has defaults matching the calendar we publish, so an almost
//! empty file (just the `[dates]` table) is enough to produce a calendar.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Deserialize;

/// BCB SGS series 432 (Meta Selic, % a.a.).
pub const DEFAULT_SGS_URL: &str = "https://api.bcb.gov.br/dados/serie/bcdata.sgs.432";
/// BCB Olinda market expectations for the Selic rate.
pub const DEFAULT_EXPECTATIONS_URL: &str =
    "https://olinda.bcb.gov.br/olinda/servico/Expectativas/versao/v1/odata/ExpectativasMercadoSelic";

/// Raw schedule file as deserialized from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleConfig {
    #[serde(default)]
    pub calendar: CalendarSection,
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub announcement: AnnouncementSection,
    #[serde(default)]
    pub rates: RatesSection,
    #[serde(default)]
    pub sources: SourcesSection,
    #[serde(default)]
    pub dates: DatesSection,
}

/// Calendar header metadata.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalendarSection {
    pub prodid: String,
    pub name: String,
    /// `X-WR-TIMEZONE` hint, also the `TZID` of timed events.
    pub timezone: String,
    /// Right-hand side of every event UID (`copom-rate-20250129@juros`).
    pub uid_domain: String,
}

impl Default for CalendarSection {
    fn default() -> Self {
        Self {
            prodid: "-//Calendario Taxa de Juros//PT-BR//v3.0".to_string(),
            name: "📈 Taxa de Juros (FED + COPOM)".to_string(),
            timezone: "America/Sao_Paulo".to_string(),
            uid_domain: "juros".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSection {
    /// Write one file per institution instead of a combined one.
    pub split: bool,
    pub combined: PathBuf,
    pub copom: PathBuf,
    pub fed: PathBuf,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            split: false,
            combined: PathBuf::from("juros.ics"),
            copom: PathBuf::from("copom.ics"),
            fed: PathBuf::from("fed.ics"),
        }
    }
}

/// FOMC announcement timing.
///
/// The output timezone is assumed to have a fixed UTC offset (no daylight
/// saving of its own); only the US side shifts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnnouncementSection {
    /// Emit FOMC decisions as timed events rather than whole-day ones.
    pub timed: bool,
    /// Eastern Time wall clock of the statement, `HH:MM`.
    pub announcement_et: String,
    pub duration_minutes: u32,
    /// Fixed UTC offset of `calendar.timezone`, in hours.
    pub utc_offset_hours: i32,
}

impl Default for AnnouncementSection {
    fn default() -> Self {
        Self {
            timed: true,
            announcement_et: "14:00".to_string(),
            duration_minutes: 60,
            utc_offset_hours: -3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RatesSection {
    /// Absolute tolerance, in percentage points, for "within expectation".
    pub tolerance: f64,
    /// Number of known decisions in the trailing average.
    pub window: usize,
    pub series_start: NaiveDate,
    pub series_end: NaiveDate,
}

impl Default for RatesSection {
    fn default() -> Self {
        Self {
            tolerance: 0.01,
            window: 12,
            series_start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            series_end: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourcesSection {
    pub sgs_url: String,
    pub expectations_url: String,
}

impl Default for SourcesSection {
    fn default() -> Self {
        Self {
            sgs_url: DEFAULT_SGS_URL.to_string(),
            expectations_url: DEFAULT_EXPECTATIONS_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatesSection {
    pub copom: Vec<NaiveDate>,
    pub fomc: Vec<NaiveDate>,
}
