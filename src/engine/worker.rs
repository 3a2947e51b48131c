use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use anyhow::{Context, Result};
use tokio::runtime::Builder;

use crate::data::{DataProviderAdapter, REGISTRY};
use crate::engine::{FetchError, ProgressEvent, QueryError, QueryRequest, QuerySession, run_query};

/// UI side of a query running on a background thread.
pub struct QueryHandle {
    progress_rx: Receiver<ProgressEvent>,
    result_rx: Receiver<Result<QuerySession, QueryError>>,
}

impl QueryHandle {
    /// Drains whatever progress is queued right now.
    pub fn poll_progress(&self) -> Vec<ProgressEvent> {
        self.progress_rx.try_iter().collect()
    }

    /// The outcome, once the worker has finished. A worker that died without
    /// answering is reported as a query that produced nothing.
    pub fn try_result(&self) -> Option<Result<QuerySession, QueryError>> {
        match self.result_rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                log::error!("Query worker exited without a result");
                Some(Err(QueryError::NoDataAvailable { failures: vec![] }))
            }
        }
    }
}

/// Runs `request` against the live providers without blocking the caller.
pub fn spawn_query(request: QueryRequest) -> QueryHandle {
    spawn_query_with(request, DataProviderAdapter::live)
}

/// Same as [`spawn_query`], with the adapter built on the worker thread by `make_adapter`.
pub fn spawn_query_with<F>(request: QueryRequest, make_adapter: F) -> QueryHandle
where
    F: FnOnce() -> Result<DataProviderAdapter> + Send + 'static,
{
    let (result_tx, result_rx) = mpsc::channel();
    let (progress_tx, progress_rx) = mpsc::channel();

    thread::spawn(move || {
        let outcome = match make_adapter().and_then(|adapter| {
            let rt = Builder::new_current_thread()
                .enable_all()
                .build()
                .context("Failed to create runtime")?;
            Ok((adapter, rt))
        }) {
            Ok((adapter, rt)) => {
                rt.block_on(run_query(&adapter, &REGISTRY, &request, Some(&progress_tx)))
            }
            Err(e) => {
                log::error!("Query could not start: {:#}", e);
                Err(QueryError::NoDataAvailable {
                    failures: request
                        .indicators()
                        .iter()
                        .map(|name| FetchError::new(name.as_str(), &e))
                        .collect(),
                })
            }
        };
        let _ = result_tx.send(outcome);
    });

    QueryHandle {
        progress_rx,
        result_rx,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CentralBankProvider, QuoteProvider};
    use crate::domain::{DateRange, RawObservation};
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::time::Duration;

    struct Fixed;

    #[async_trait]
    impl CentralBankProvider for Fixed {
        async fn fetch_series(&self, _code: u32, range: &DateRange) -> Result<Vec<RawObservation>> {
            Ok(vec![RawObservation::new(range.start(), Some(13.65))])
        }
    }

    #[async_trait]
    impl QuoteProvider for Fixed {
        async fn fetch_closes(&self, _ticker: &str, range: &DateRange) -> Result<Vec<RawObservation>> {
            Ok(vec![RawObservation::new(range.end(), Some(104_000.0))])
        }
    }

    fn wait(handle: &QueryHandle) -> Result<QuerySession, QueryError> {
        for _ in 0..500 {
            if let Some(result) = handle.try_result() {
                return result;
            }
            thread::sleep(Duration::from_millis(10));
        }
        panic!("worker did not finish");
    }

    fn request() -> QueryRequest {
        QueryRequest::from_inputs(
            "2023-01-01",
            "2023-01-10",
            vec!["CDI".to_string(), "IBOV".to_string()],
        )
        .unwrap()
    }

    #[test]
    fn background_query_delivers_session() {
        let handle = spawn_query_with(request(), || {
            Ok(DataProviderAdapter::new(Box::new(Fixed), Box::new(Fixed)))
        });
        let session = wait(&handle).unwrap();
        assert_eq!(session.store.names(), vec!["CDI", "IBOV"]);
        assert!(!handle.poll_progress().is_empty());
    }

    #[test]
    fn adapter_failure_fails_every_indicator() {
        let handle = spawn_query_with(request(), || Err(anyhow!("no tls backend")));
        match wait(&handle) {
            Err(QueryError::NoDataAvailable { failures }) => {
                assert_eq!(failures.len(), 2);
                assert!(failures[0].cause.contains("no tls backend"));
            }
            other => panic!("unexpected {:?}", other.map(|s| s.store)),
        }
    }
}
