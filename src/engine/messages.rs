/// Per-indicator state while a query runs
#[derive(Debug, Clone, PartialEq)]
pub enum FetchStatus {
    Pending,
    Fetching,
    /// Number of rows kept
    Completed(usize),
    /// Provider answered with no usable rows
    Empty,
    Failed(String),
}

impl FetchStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Completed(_) | Self::Empty | Self::Failed(_))
    }
}

/// Progress update sent from the worker thread to the UI
#[derive(Debug, Clone)]
pub struct ProgressEvent {
    /// Position of the indicator within the request's selection
    pub index: usize,
    pub indicator: String,
    pub status: FetchStatus,
}
