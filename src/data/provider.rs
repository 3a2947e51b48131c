use anyhow::Result;
use async_trait::async_trait;

use crate::config::DF;
use crate::data::{SgsProvider, YahooProvider};
use crate::domain::{DateRange, Indicator, RawObservation, SourceKind, TimeSeries};
use crate::engine::FetchError;

/// Central-bank style source: numeric series code -> dated values.
#[async_trait]
pub trait CentralBankProvider: Send + Sync {
    async fn fetch_series(&self, code: u32, range: &DateRange) -> Result<Vec<RawObservation>>;
}

/// Market quote source: ticker symbol -> daily closing prices.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    async fn fetch_closes(&self, ticker: &str, range: &DateRange) -> Result<Vec<RawObservation>>;
}

/// One fetch contract over both sources.
pub struct DataProviderAdapter {
    central_bank: Box<dyn CentralBankProvider>,
    quotes: Box<dyn QuoteProvider>,
}

impl DataProviderAdapter {
    pub fn new(
        central_bank: Box<dyn CentralBankProvider>,
        quotes: Box<dyn QuoteProvider>,
    ) -> Self {
        Self {
            central_bank,
            quotes,
        }
    }

    /// Adapter wired to the real SGS and Yahoo endpoints.
    pub fn live() -> Result<Self> {
        Ok(Self::new(
            Box::new(SgsProvider::new()?),
            Box::new(YahooProvider::new()?),
        ))
    }

    /// Fetches and normalizes one indicator. An empty `Ok` series means the provider
    /// answered but had no usable rows in range.
    pub async fn fetch(
        &self,
        indicator: &Indicator,
        range: &DateRange,
    ) -> Result<TimeSeries, FetchError> {
        let raw = match indicator.source {
            SourceKind::CentralBankSeries { code } => {
                self.central_bank.fetch_series(code, range).await
            }
            SourceKind::MarketQuote { ticker } => self.quotes.fetch_closes(ticker, range).await,
        }
        .map_err(|e| FetchError::new(indicator.name, &e))?;

        let raw_count = raw.len();
        let series = TimeSeries::from_raw(
            indicator.name,
            raw.into_iter().filter(|r| range.contains(r.date)),
        );

        if DF.log_queries {
            log::info!(
                "Fetched {} from {}: {} raw rows, {} kept",
                indicator.name,
                indicator.source,
                raw_count,
                series.len()
            );
        }
        Ok(series)
    }
}
