//! Brazilian-locale normalization boundary.
//!
//! SGS returns dates as `dd/mm/yyyy` and values that may use a decimal comma.
//! Rows are validated strictly here; a malformed row fails the whole fetch
//! instead of being patched up with string replacement.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::{RateObservation, RateSeries};
use crate::error::AppError;

/// One raw SGS row: `{"data": "dd/mm/yyyy", "valor": "14.25"}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SgsRow {
    pub data: String,
    pub valor: RawValue,
}

/// SGS serves values as strings, but tolerate bare JSON numbers too.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Text(String),
    Number(f64),
}

impl std::fmt::Display for RawValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawValue::Text(s) => write!(f, "{s}"),
            RawValue::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Parse a `dd/mm/yyyy` date.
pub fn parse_br_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    // chrono accepts single-digit fields; SGS always pads, so insist on it.
    if trimmed.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%d/%m/%Y").ok()
}

/// Parse a decimal that uses either `,` or `.` as the separator.
///
/// Accepts an optional sign, digits, and at most one separator with digits on
/// both sides. Thousands separators, exponents and anything else are rejected.
pub fn parse_br_decimal(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let unsigned = trimmed
        .strip_prefix('-')
        .or_else(|| trimmed.strip_prefix('+'))
        .unwrap_or(trimmed);

    let mut parts = unsigned.splitn(2, [',', '.']);
    let int_part = parts.next().unwrap_or_default();
    let frac_part = parts.next();

    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) {
        return None;
    }
    if let Some(frac) = frac_part {
        if !all_digits(frac) {
            return None;
        }
    }

    let v = trimmed.replacen(',', ".", 1).parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

fn parse_value(raw: &RawValue) -> Option<f64> {
    match raw {
        RawValue::Text(s) => parse_br_decimal(s),
        RawValue::Number(n) if n.is_finite() => Some(*n),
        RawValue::Number(_) => None,
    }
}

/// Validate raw SGS rows and build an ascending `RateSeries`.
pub fn normalize_rows(rows: &[SgsRow]) -> Result<RateSeries, AppError> {
    let mut out = Vec::with_capacity(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        let date = parse_br_date(&row.data).ok_or_else(|| {
            AppError::upstream(format!("SGS row {idx}: invalid date '{}'.", row.data))
        })?;
        let value = parse_value(&row.valor).ok_or_else(|| {
            AppError::upstream(format!("SGS row {idx}: invalid value '{}'.", row.valor))
        })?;
        out.push(RateObservation { date, value });
    }
    RateSeries::from_ascending(out)
}
