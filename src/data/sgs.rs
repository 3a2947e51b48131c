use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;

use crate::config::{DF, PROVIDERS, SgsConfig};
use crate::data::CentralBankProvider;
use crate::domain::{DateRange, RawObservation};
use crate::utils::TimeUtils;

/// Row layout of `bcdata.sgs.{code}/dados?formato=json`
#[derive(Debug, Deserialize)]
struct SgsRow {
    data: String,
    valor: String,
}

/// Banco Central do Brasil SGS time-series service.
pub struct SgsProvider {
    client: Client,
    config: &'static SgsConfig,
}

impl SgsProvider {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build SGS http client")?;
        Ok(Self {
            client,
            config: &PROVIDERS.sgs,
        })
    }

    fn series_url(&self, code: u32, window: &DateRange) -> String {
        format!(
            "{}/dados/serie/bcdata.sgs.{}/dados?formato=json&dataInicial={}&dataFinal={}",
            self.config.base_url,
            code,
            window.start().format(TimeUtils::SGS_DATE_FORMAT),
            window.end().format(TimeUtils::SGS_DATE_FORMAT),
        )
    }

    async fn fetch_window(&self, code: u32, window: &DateRange) -> Result<Vec<RawObservation>> {
        let url = self.series_url(code, window);
        if DF.log_provider_requests {
            log::info!("SGS request: {}", url);
        }

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("SGS request for series {} failed", code))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read SGS response for series {}", code))?;

        if !status.is_success() {
            bail!(
                "SGS returned status {} for series {}: {}",
                status,
                code,
                body.chars().take(200).collect::<String>()
            );
        }
        parse_sgs_body(&body).with_context(|| format!("Unexpected SGS payload for series {}", code))
    }
}

#[async_trait]
impl CentralBankProvider for SgsProvider {
    async fn fetch_series(&self, code: u32, range: &DateRange) -> Result<Vec<RawObservation>> {
        let mut rows = Vec::new();
        for window in range.windows(self.config.max_window_years) {
            rows.extend(self.fetch_window(code, &window).await?);
        }
        Ok(rows)
    }
}

/// A row with a blank or non-numeric `valor` is kept as a missing value.
fn parse_sgs_body(body: &str) -> Result<Vec<RawObservation>> {
    let rows: Vec<SgsRow> = serde_json::from_str(body)?;
    rows.into_iter()
        .map(|row| {
            let date = NaiveDate::parse_from_str(row.data.trim(), TimeUtils::SGS_DATE_FORMAT)
                .with_context(|| format!("Invalid SGS date '{}'", row.data))?;
            let value = row.valor.trim().parse::<f64>().ok();
            Ok(RawObservation::new(date, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_and_keeps_blank_values_as_missing() {
        let body = r#"[
            {"data": "02/01/2023", "valor": "0.050788"},
            {"data": "03/01/2023", "valor": ""},
            {"data": "04/01/2023", "valor": "0.050788"}
        ]"#;
        let rows = parse_sgs_body(body).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2023, 1, 2).unwrap());
        assert_eq!(rows[0].value, Some(0.050788));
        assert_eq!(rows[1].value, None);
    }

    #[test]
    fn error_object_is_rejected() {
        let body = r#"{"error": "Value(s) not found", "message": "series not found"}"#;
        assert!(parse_sgs_body(body).is_err());
    }

    #[test]
    fn bad_date_is_rejected() {
        let body = r#"[{"data": "2023-01-02", "valor": "1.0"}]"#;
        assert!(parse_sgs_body(body).is_err());
    }

    #[test]
    fn url_uses_day_first_dates() {
        let provider = SgsProvider::new().unwrap();
        let range = DateRange::parse("2023-01-01", "2023-01-10").unwrap();
        assert_eq!(
            provider.series_url(12, &range),
            "https://api.bcb.gov.br/dados/serie/bcdata.sgs.12/dados?formato=json&dataInicial=01/01/2023&dataFinal=10/01/2023"
        );
    }
}
