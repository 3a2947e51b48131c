pub mod date_range;
pub mod indicator;
pub mod time_series;

pub use {
    date_range::DateRange,
    indicator::{Indicator, SourceKind},
    time_series::{Observation, RawObservation, TimeSeries},
};
