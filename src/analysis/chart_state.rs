use chrono::NaiveDate;

use crate::data::ResultStore;
use crate::domain::TimeSeries;
use crate::utils::date_to_ordinal;

/// One drawn line in plot coordinates: x = ordinal day, y = value.
#[derive(Debug, Clone, PartialEq)]
pub struct PlottedSeries {
    pub name: String,
    pub points: Vec<[f64; 2]>,
    pub dates: Vec<NaiveDate>,
}

impl PlottedSeries {
    pub fn from_series(series: &TimeSeries) -> Self {
        let (points, dates) = series
            .observations()
            .iter()
            .map(|o| ([date_to_ordinal(o.date), o.value], o.date))
            .unzip();
        Self {
            name: series.name().to_string(),
            points,
            dates,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Everything currently on the chart, in store order. Rebuilt whenever the store is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartState {
    series: Vec<PlottedSeries>,
}

impl ChartState {
    pub fn from_store(store: &ResultStore) -> Self {
        Self {
            series: store.iter().map(PlottedSeries::from_series).collect(),
        }
    }

    pub fn series(&self) -> &[PlottedSeries] {
        &self.series
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// (x_min, x_max, y_min, y_max) over every point, or None when nothing is plotted.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let mut points = self.series.iter().flat_map(|s| s.points.iter());
        let first = points.next()?;
        let init = (first[0], first[0], first[1], first[1]);
        Some(points.fold(init, |(x0, x1, y0, y1), p| {
            (x0.min(p[0]), x1.max(p[0]), y0.min(p[1]), y1.max(p[1]))
        }))
    }
}
