use crate::domain::TimeSeries;

/// Fetched series for one query session, keyed by indicator name.
/// Iterates in insertion order; that order becomes the export column order.
#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    entries: Vec<TimeSeries>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Replaces any prior entry with the same name in place, otherwise appends.
    pub fn put(&mut self, name: &str, series: TimeSeries) {
        let series = series.with_name(name);
        match self.entries.iter_mut().find(|s| s.name() == name) {
            Some(slot) => *slot = series,
            None => self.entries.push(series),
        }
    }

    pub fn get(&self, name: &str) -> Option<&TimeSeries> {
        self.entries.iter().find(|s| s.name() == name)
    }

    pub fn all(&self) -> &[TimeSeries] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimeSeries> {
        self.entries.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_points(&self) -> usize {
        self.entries.iter().map(|s| s.len()).sum()
    }
}
