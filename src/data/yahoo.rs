use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use reqwest::{Client, header};
use serde::Deserialize;
use urlencoding::encode;

use crate::config::{DF, PROVIDERS, YahooConfig};
use crate::data::QuoteProvider;
use crate::domain::{DateRange, RawObservation};
use crate::utils::{TimeUtils, unix_midnight_utc};

// ============================================================================
// Chart API response models
// ============================================================================

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i64,
    symbol: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

// ============================================================================
// Yahoo Provider
// ============================================================================

/// Yahoo Finance daily closes from the v8 chart endpoint.
pub struct YahooProvider {
    client: Client,
    config: &'static YahooConfig,
}

impl YahooProvider {
    pub fn new() -> Result<Self> {
        let config = &PROVIDERS.yahoo;
        let client = Client::builder()
            .user_agent(config.user_agent)
            .build()
            .context("Failed to build Yahoo http client")?;
        Ok(Self { client, config })
    }

    /// `period2` is the midnight after `end`, which makes the end date inclusive.
    fn chart_url(&self, ticker: &str, range: &DateRange) -> String {
        let period1 = unix_midnight_utc(range.start());
        let period2 = unix_midnight_utc(range.end()) + TimeUtils::SECS_IN_DAY;
        format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval={}&events=history",
            self.config.base_url,
            encode(ticker),
            period1,
            period2,
            self.config.interval,
        )
    }
}

#[async_trait]
impl QuoteProvider for YahooProvider {
    async fn fetch_closes(&self, ticker: &str, range: &DateRange) -> Result<Vec<RawObservation>> {
        let url = self.chart_url(ticker, range);
        if DF.log_provider_requests {
            log::info!("Yahoo request: {}", url);
        }

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .with_context(|| format!("Yahoo request for {} failed", ticker))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read Yahoo response for {}", ticker))?;

        // Unknown tickers come back as 404 with a chart.error body; prefer that message.
        match parse_chart_body(&body) {
            Ok(rows) if status.is_success() => Ok(rows),
            Ok(_) => bail!("Yahoo returned status {} for {}", status, ticker),
            Err(e) => Err(e.context(format!("Yahoo chart for {} (status {})", ticker, status))),
        }
    }
}

fn parse_chart_body(body: &str) -> Result<Vec<RawObservation>> {
    let parsed: ChartResponse = serde_json::from_str(body)?;

    if let Some(err) = parsed.chart.error {
        bail!(
            "{}: {}",
            err.code.unwrap_or_else(|| "error".to_string()),
            err.description.unwrap_or_default()
        );
    }

    let result = parsed
        .chart
        .result
        .and_then(|mut r| if r.is_empty() { None } else { Some(r.swap_remove(0)) })
        .ok_or_else(|| anyhow!("chart response has no result"))?;

    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|q| q.close)
        .unwrap_or_default();

    if closes.len() != result.timestamp.len() && !closes.is_empty() {
        log::warn!(
            "Yahoo {}: {} timestamps but {} closes; extra rows ignored",
            result.meta.symbol.as_deref().unwrap_or("?"),
            result.timestamp.len(),
            closes.len()
        );
    }

    let offset = result.meta.gmtoffset;
    result
        .timestamp
        .iter()
        .zip(closes)
        .map(|(&ts, close)| Ok(RawObservation::new(exchange_date(ts, offset)?, close)))
        .collect()
}

/// Calendar date of a bar in the exchange's own timezone.
fn exchange_date(timestamp: i64, gmtoffset: i64) -> Result<NaiveDate> {
    DateTime::from_timestamp(timestamp + gmtoffset, 0)
        .map(|dt| dt.date_naive())
        .ok_or_else(|| anyhow!("invalid timestamp {}", timestamp))
}

#[cfg(test)]
mod tests {
    use super::*;

    const IBOV_BODY: &str = r#"{"chart":{"result":[{
        "meta":{"currency":"BRL","symbol":"^BVSP","gmtoffset":-10800,"timezone":"BRT"},
        "timestamp":[1672660800,1672747200,1672833600],
        "indicators":{"quote":[{"close":[106376.0,null,105334.0],"open":[1.0,2.0,3.0]}],
                      "adjclose":[{"adjclose":[106376.0,null,105334.0]}]}
    }],"error":null}}"#;

    #[test]
    fn closes_are_paired_with_exchange_dates() {
        let rows = parse_chart_body(IBOV_BODY).unwrap();
        assert_eq!(rows.len(), 3);
        // 1672660800 = 2023-01-02 12:00 UTC, 09:00 in Sao Paulo
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2023, 1, 2).unwrap());
        assert_eq!(rows[0].value, Some(106376.0));
        assert_eq!(rows[1].value, None);
        assert_eq!(rows[2].date, NaiveDate::from_ymd_opt(2023, 1, 4).unwrap());
    }

    #[test]
    fn negative_offset_can_move_bar_to_previous_day() {
        // 2023-01-03 01:00 UTC is still 2023-01-02 in UTC-3
        assert_eq!(
            exchange_date(1_672_707_600, -10_800).unwrap(),
            NaiveDate::from_ymd_opt(2023, 1, 2).unwrap()
        );
    }

    #[test]
    fn delisted_symbol_error_is_surfaced() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        let err = parse_chart_body(body).unwrap_err();
        assert!(format!("{:#}", err).contains("delisted"));
    }

    #[test]
    fn empty_result_list_is_an_error() {
        let body = r#"{"chart":{"result":[],"error":null}}"#;
        assert!(parse_chart_body(body).is_err());
    }

    #[test]
    fn no_trading_days_gives_no_rows() {
        let body = r#"{"chart":{"result":[{"meta":{"gmtoffset":0},"indicators":{"quote":[{}]}}],"error":null}}"#;
        assert!(parse_chart_body(body).unwrap().is_empty());
    }

    #[test]
    fn url_has_inclusive_end_and_escaped_caret() {
        let provider = YahooProvider::new().unwrap();
        let range = DateRange::parse("2023-01-01", "2023-01-10").unwrap();
        assert_eq!(
            provider.chart_url("^BVSP", &range),
            "https://query1.finance.yahoo.com/v8/finance/chart/%5EBVSP?period1=1672531200&period2=1673395200&interval=1d&events=history"
        );
    }

    #[test]
    fn reserved_ticker_characters_stay_inside_the_path_segment() {
        let provider = YahooProvider::new().unwrap();
        let range = DateRange::parse("2023-01-01", "2023-01-10").unwrap();
        let url = provider.chart_url("BRK/B+%#", &range);
        assert!(url.starts_with(
            "https://query1.finance.yahoo.com/v8/finance/chart/BRK%2FB%2B%25%23?period1="
        ));
        assert_eq!(url.matches('?').count(), 1);
        assert!(!url.contains('#'));
    }
}
