//! BCB SGS client for the Meta Selic series.

use chrono::NaiveDate;
use reqwest::blocking::Client;

use crate::data::normalize::{SgsRow, normalize_rows};
use crate::domain::RateSeries;
use crate::error::AppError;

pub struct SgsClient {
    client: Client,
    base_url: String,
}

impl SgsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Use `BCB_SGS_URL` when set, otherwise `default_url`.
    pub fn from_env(default_url: &str) -> Self {
        Self::new(crate::data::url_from_env("BCB_SGS_URL", default_url))
    }

    pub fn series_url(&self) -> String {
        format!("{}/dados", self.base_url.trim_end_matches('/'))
    }

    /// Fetch every observation between `start` and `end`, inclusive.
    pub fn fetch_series(&self, start: NaiveDate, end: NaiveDate) -> Result<RateSeries, AppError> {
        let url = self.series_url();
        let start_br = start.format("%d/%m/%Y").to_string();
        let end_br = end.format("%d/%m/%Y").to_string();
        log::info!("fetching Meta Selic series {start} .. {end}");

        let resp = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&[
                ("formato", "json"),
                ("dataInicial", start_br.as_str()),
                ("dataFinal", end_br.as_str()),
            ])
            .send()
            .map_err(|e| AppError::upstream(format!("SGS request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::upstream(format!(
                "HTTP {} - {url}",
                resp.status()
            )));
        }

        let rows: Vec<SgsRow> = resp
            .json()
            .map_err(|e| AppError::upstream(format!("Failed to parse SGS response: {e}")))?;

        let series = normalize_rows(&rows)?;
        match series.last() {
            Some(last) => log::info!(
                "SGS returned {} observations (latest {} = {:.2})",
                series.len(),
                last.date,
                last.value
            ),
            None => log::warn!("SGS returned no observations for {start} .. {end}"),
        }
        Ok(series)
    }
}
