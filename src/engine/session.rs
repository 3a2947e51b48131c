use std::sync::mpsc::Sender;

use crate::analysis::{ChartState, MergedTable, outer_join};
use crate::config::DF;
use crate::data::{DataProviderAdapter, ResultStore, SeriesRegistry};
use crate::domain::DateRange;
use crate::engine::{FetchError, FetchStatus, ProgressEvent, QueryError};

/// A validated query: a well-formed range and a non-empty selection.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
    range: DateRange,
    indicators: Vec<String>,
}

impl QueryRequest {
    pub fn new(range: DateRange, indicators: Vec<String>) -> Result<Self, QueryError> {
        if indicators.is_empty() {
            return Err(QueryError::NoIndicatorSelected);
        }
        Ok(Self { range, indicators })
    }

    /// Validates raw user input in the order the checks are reported: dates, then selection.
    pub fn from_inputs(
        start: &str,
        end: &str,
        indicators: Vec<String>,
    ) -> Result<Self, QueryError> {
        let range = DateRange::parse(start, end)?;
        Self::new(range, indicators)
    }

    pub fn range(&self) -> &DateRange {
        &self.range
    }

    pub fn indicators(&self) -> &[String] {
        &self.indicators
    }
}

/// Everything produced by one successful query. Replaced wholesale by the next one.
#[derive(Debug, Clone)]
pub struct QuerySession {
    pub range: DateRange,
    pub store: ResultStore,
    pub chart: ChartState,
    /// Indicators that failed outright (empty-but-successful ones are not listed)
    pub failures: Vec<FetchError>,
}

impl QuerySession {
    fn new(range: DateRange, store: ResultStore, failures: Vec<FetchError>) -> Self {
        let chart = ChartState::from_store(&store);
        Self {
            range,
            store,
            chart,
            failures,
        }
    }

    pub fn merged(&self) -> MergedTable {
        outer_join(self.store.iter())
    }
}

fn report(progress: Option<&Sender<ProgressEvent>>, index: usize, name: &str, status: FetchStatus) {
    if let Some(tx) = progress {
        // Receiver gone means nobody is watching any more; the query still completes.
        let _ = tx.send(ProgressEvent {
            index,
            indicator: name.to_string(),
            status,
        });
    }
}

/// Fetches every selected indicator one at a time, in selection order, into a fresh store.
///
/// Failed and empty indicators are simply absent from the result. Only when nothing at
/// all came back is the query an error.
pub async fn run_query(
    adapter: &DataProviderAdapter,
    registry: &SeriesRegistry,
    request: &QueryRequest,
    progress: Option<&Sender<ProgressEvent>>,
) -> Result<QuerySession, QueryError> {
    let range = *request.range();
    if DF.log_queries {
        log::info!(
            "Query {} for [{}]",
            range,
            request.indicators().join(", ")
        );
    }

    for (index, name) in request.indicators().iter().enumerate() {
        report(progress, index, name, FetchStatus::Pending);
    }

    let mut store = ResultStore::new();
    let mut failures = Vec::new();

    for (index, name) in request.indicators().iter().enumerate() {
        let Some(indicator) = registry.get(name) else {
            log::warn!("Unknown indicator '{}' skipped", name);
            report(progress, index, name, FetchStatus::Failed("unknown indicator".into()));
            continue;
        };

        report(progress, index, name, FetchStatus::Fetching);
        match adapter.fetch(indicator, &range).await {
            Ok(series) if series.is_empty() => {
                log::warn!("{} returned no rows for {}", name, range);
                report(progress, index, name, FetchStatus::Empty);
            }
            Ok(series) => {
                report(progress, index, name, FetchStatus::Completed(series.len()));
                store.put(name, series);
            }
            Err(e) => {
                log::warn!("{}", e);
                report(progress, index, name, FetchStatus::Failed(e.cause.clone()));
                failures.push(e);
            }
        }
    }

    if store.is_empty() {
        log::warn!("No data available for any selected indicator in {}", range);
        return Err(QueryError::NoDataAvailable { failures });
    }

    if DF.log_queries {
        log::info!(
            "Query complete: {} of {} indicators, {} points",
            store.len(),
            request.indicators().len(),
            store.total_points()
        );
    }
    Ok(QuerySession::new(range, store, failures))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CentralBankProvider, QuoteProvider, REGISTRY};
    use crate::domain::RawObservation;
    use anyhow::{Result, bail};
    use async_trait::async_trait;
    use std::sync::mpsc;

    struct OneRowEach;

    #[async_trait]
    impl CentralBankProvider for OneRowEach {
        async fn fetch_series(&self, code: u32, range: &DateRange) -> Result<Vec<RawObservation>> {
            match code {
                // IPCA: answers, but nothing in range
                433 => Ok(vec![]),
                _ => Ok(vec![RawObservation::new(range.start(), Some(code as f64))]),
            }
        }
    }

    #[async_trait]
    impl QuoteProvider for OneRowEach {
        async fn fetch_closes(&self, ticker: &str, range: &DateRange) -> Result<Vec<RawObservation>> {
            if ticker == "^IXIC" {
                bail!("connection reset");
            }
            Ok(vec![RawObservation::new(range.end(), Some(1.0))])
        }
    }

    fn adapter() -> DataProviderAdapter {
        DataProviderAdapter::new(Box::new(OneRowEach), Box::new(OneRowEach))
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn validation_checks_dates_before_selection() {
        assert!(matches!(
            QueryRequest::from_inputs("2023-02-01", "2023-01-01", vec![]),
            Err(QueryError::InvalidDateRange(_))
        ));
        assert_eq!(
            QueryRequest::from_inputs("2023-01-01", "2023-02-01", vec![]),
            Err(QueryError::NoIndicatorSelected)
        );
        assert!(QueryError::NoIndicatorSelected.is_validation());
        assert!(!QueryError::NoDataAvailable { failures: vec![] }.is_validation());
    }

    #[tokio::test]
    async fn failures_and_empties_are_absent_from_store() {
        let request = QueryRequest::from_inputs(
            "2023-01-01",
            "2023-01-10",
            names(&["NASDAQ", "CDI", "IPCA", "IBOV"]),
        )
        .unwrap();
        let session = run_query(&adapter(), &REGISTRY, &request, None)
            .await
            .unwrap();

        assert_eq!(session.store.names(), vec!["CDI", "IBOV"]);
        assert_eq!(session.chart.series().len(), 2);
        assert_eq!(session.failures.len(), 1);
        assert_eq!(session.failures[0].indicator, "NASDAQ");
        assert_eq!(session.merged().columns, vec!["CDI", "IBOV"]);
    }

    #[tokio::test]
    async fn nothing_fetched_is_no_data_available() {
        let request =
            QueryRequest::from_inputs("2023-01-01", "2023-01-10", names(&["NASDAQ", "IPCA"]))
                .unwrap();
        match run_query(&adapter(), &REGISTRY, &request, None).await {
            Err(QueryError::NoDataAvailable { failures }) => {
                assert_eq!(failures.len(), 1);
            }
            other => panic!("expected NoDataAvailable, got {:?}", other.map(|s| s.store)),
        }
    }

    #[tokio::test]
    async fn progress_reports_each_indicator_in_order() {
        let (tx, rx) = mpsc::channel();
        let request = QueryRequest::from_inputs(
            "2023-01-01",
            "2023-01-10",
            names(&["CDI", "Unknown", "NASDAQ"]),
        )
        .unwrap();
        let _ = run_query(&adapter(), &REGISTRY, &request, Some(&tx)).await;
        drop(tx);

        let events: Vec<ProgressEvent> = rx.iter().collect();
        let finals: Vec<(usize, FetchStatus)> = events
            .iter()
            .filter(|e| e.status.is_finished())
            .map(|e| (e.index, e.status.clone()))
            .collect();
        assert_eq!(finals.len(), 3);
        assert_eq!(finals[0], (0, FetchStatus::Completed(1)));
        assert!(matches!(finals[1], (1, FetchStatus::Failed(_))));
        assert!(matches!(finals[2], (2, FetchStatus::Failed(_))));
        assert!(events.iter().take(3).all(|e| e.status == FetchStatus::Pending));
    }
}
