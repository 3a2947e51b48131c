pub mod chart_state;
pub mod hit_test;
pub mod merge;

pub use {
    chart_state::{ChartState, PlottedSeries},
    hit_test::{HoverHit, hit_test, nearest_point},
    merge::{MergedTable, outer_join},
};
