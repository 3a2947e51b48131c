// src/app/state.rs

use std::collections::BTreeMap;

use crate::engine::{FetchStatus, ProgressEvent, QueryRequest};

#[derive(Clone, Default)]
pub(crate) struct IdleState;

pub(crate) enum AppState {
    Idle(IdleState),
    Fetching(FetchingState),
}

impl Default for AppState {
    fn default() -> Self {
        AppState::Idle(IdleState)
    }
}

#[derive(Default, Clone)]
pub(crate) struct FetchingState {
    /// Keyed by position in the selection so the grid keeps selection order
    pub(crate) rows: BTreeMap<usize, (String, FetchStatus)>,
    pub(crate) range_label: String,
}

impl FetchingState {
    pub(crate) fn new(request: &QueryRequest) -> Self {
        Self {
            rows: request
                .indicators()
                .iter()
                .enumerate()
                .map(|(i, name)| (i, (name.clone(), FetchStatus::Pending)))
                .collect(),
            range_label: request.range().to_string(),
        }
    }

    pub(crate) fn apply(&mut self, event: ProgressEvent) {
        self.rows.insert(event.index, (event.indicator, event.status));
    }

    pub(crate) fn finished(&self) -> usize {
        self.rows.values().filter(|(_, s)| s.is_finished()).count()
    }
}

/// Blocking message shown in a modal window until acknowledged.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Dialog {
    pub(crate) title: String,
    pub(crate) message: String,
    pub(crate) details: Vec<String>,
    pub(crate) is_error: bool,
}

impl Dialog {
    pub(crate) fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            details: Vec::new(),
            is_error: true,
        }
    }

    pub(crate) fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            is_error: false,
            ..Self::error(title, message)
        }
    }

    pub(crate) fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }
}
