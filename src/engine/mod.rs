mod errors;
mod messages;
mod session;
mod worker;

pub use {
    errors::{FetchError, QueryError},
    messages::{FetchStatus, ProgressEvent},
    session::{QueryRequest, QuerySession, run_query},
    worker::{QueryHandle, spawn_query, spawn_query_with},
};
