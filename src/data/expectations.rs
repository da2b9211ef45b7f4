//! BCB Olinda "Expectativas" client.
//!
//! Only the most recent row is used: its median Selic forecast is the market
//! reference for surprise classification and the outlook of future meetings.

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::data::normalize::parse_br_decimal;
use crate::error::AppError;

/// Latest published market expectation for the Selic rate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MarketExpectation {
    pub median: Option<f64>,
    pub date: Option<NaiveDate>,
}

impl MarketExpectation {
    /// Outlook text for meetings that have not happened yet.
    pub fn outlook_text(&self) -> Option<String> {
        self.median
            .map(|m| format!("mediana atual (Expectativas BCB): {m:.2}% a.a."))
    }
}

#[derive(Debug, Deserialize)]
struct ODataResponse {
    #[serde(default)]
    value: Vec<Map<String, Value>>,
}

pub struct ExpectationsClient {
    client: Client,
    base_url: String,
}

impl ExpectationsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Use `BCB_EXPECTATIONS_URL` when set, otherwise `default_url`.
    pub fn from_env(default_url: &str) -> Self {
        Self::new(crate::data::url_from_env("BCB_EXPECTATIONS_URL", default_url))
    }

    /// OData query for the newest row. Olinda wants the `$` options verbatim.
    pub fn latest_url(&self) -> String {
        format!(
            "{}?$top=1&$orderby=Data%20desc&$format=json",
            self.base_url.trim_end_matches('/')
        )
    }

    pub fn fetch_latest(&self) -> Result<MarketExpectation, AppError> {
        let url = self.latest_url();
        log::info!("fetching latest Selic market expectation");

        let resp = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .map_err(|e| AppError::upstream(format!("Expectations request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::upstream(format!(
                "HTTP {} - {url}",
                resp.status()
            )));
        }

        let body: ODataResponse = resp.json().map_err(|e| {
            AppError::upstream(format!("Failed to parse expectations response: {e}"))
        })?;

        let expectation = parse_latest(&body.value)?;
        match (expectation.median, expectation.date) {
            (Some(m), Some(d)) => log::info!("market median {m:.2}% as of {d}"),
            (Some(m), None) => log::info!("market median {m:.2}% (undated)"),
            _ => log::warn!("expectations response carried no median"),
        }
        Ok(expectation)
    }
}

/// Field lookup tolerant to `Mediana` / `mediana` / `MEDIANA`.
fn field<'a>(row: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    row.iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v)
        .filter(|v| !v.is_null())
}

fn parse_latest(rows: &[Map<String, Value>]) -> Result<MarketExpectation, AppError> {
    let Some(row) = rows.first() else {
        return Ok(MarketExpectation::default());
    };

    let median = match field(row, "Mediana") {
        None => None,
        Some(Value::Number(n)) => n.as_f64().filter(|v| v.is_finite()),
        Some(Value::String(s)) => Some(parse_br_decimal(s).ok_or_else(|| {
            AppError::upstream(format!("Invalid expectations median '{s}'."))
        })?),
        Some(other) => {
            return Err(AppError::upstream(format!(
                "Unexpected expectations median {other}."
            )));
        }
    };

    let date = match field(row, "Data") {
        None => None,
        Some(Value::String(s)) => Some(NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(
            |e| AppError::upstream(format!("Invalid expectations date '{s}': {e}")),
        )?),
        Some(other) => {
            return Err(AppError::upstream(format!(
                "Unexpected expectations date {other}."
            )));
        }
    };

    Ok(MarketExpectation { median, date })
}
