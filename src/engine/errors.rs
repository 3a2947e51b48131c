use thiserror::Error;

/// A single indicator could not be fetched. Recovered locally: the indicator is
/// left out of the session and the query carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to fetch {indicator}: {cause}")]
pub struct FetchError {
    pub indicator: String,
    pub cause: String,
}

impl FetchError {
    pub fn new(indicator: impl Into<String>, cause: &anyhow::Error) -> Self {
        Self {
            indicator: indicator.into(),
            cause: format!("{:#}", cause),
        }
    }
}

/// Reasons a query does not produce a session. None of them are fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    #[error("Select at least one indicator.")]
    NoIndicatorSelected,

    #[error("Could not get data for the selected indicators.")]
    NoDataAvailable { failures: Vec<FetchError> },
}

impl QueryError {
    /// Validation errors are raised before any fetch and leave the previous session in place.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidDateRange(_) | Self::NoIndicatorSelected)
    }
}
