use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::TimeSeries;

/// Wide table keyed by date: one column per series, `None` where a series has no row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MergedTable {
    pub columns: Vec<String>,
    pub rows: Vec<(NaiveDate, Vec<Option<f64>>)>,
}

impl MergedTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn cell(&self, date: NaiveDate, column: &str) -> Option<f64> {
        let col = self.column_index(column)?;
        let idx = self.rows.binary_search_by_key(&date, |(d, _)| *d).ok()?;
        self.rows[idx].1[col]
    }
}

/// Sequential outer join on date. Columns keep the input order; rows are the union of
/// all dates, ascending.
pub fn outer_join<'a>(series: impl IntoIterator<Item = &'a TimeSeries>) -> MergedTable {
    let mut columns: Vec<String> = Vec::new();
    let mut by_date: BTreeMap<NaiveDate, Vec<Option<f64>>> = BTreeMap::new();

    for ts in series {
        let col = columns.len();
        columns.push(ts.name().to_string());
        // Dates first seen in this series start with gaps for every earlier column.
        for row in by_date.values_mut() {
            row.push(None);
        }
        for obs in ts.observations() {
            let row = by_date
                .entry(obs.date)
                .or_insert_with(|| vec![None; col + 1]);
            row[col] = Some(obs.value);
        }
    }

    MergedTable {
        columns,
        rows: by_date.into_iter().collect(),
    }
}
