use chrono::NaiveDate;

/// One row as delivered by a provider, before normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawObservation {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

impl RawObservation {
    pub fn new(date: NaiveDate, value: Option<f64>) -> Self {
        Self { date, value }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
}

/// Date-indexed values for one indicator.
/// Ascending by date, one value per date, never a missing or non-finite value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeSeries {
    name: String,
    observations: Vec<Observation>,
}

impl TimeSeries {
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            observations: Vec::new(),
        }
    }

    /// Drops rows with no usable value, sorts by date and keeps the last row seen for a repeated date.
    pub fn from_raw(name: impl Into<String>, raw: impl IntoIterator<Item = RawObservation>) -> Self {
        let mut observations: Vec<Observation> = raw
            .into_iter()
            .filter_map(|r| match r.value {
                Some(value) if value.is_finite() => Some(Observation {
                    date: r.date,
                    value,
                }),
                _ => None,
            })
            .collect();

        // Stable sort keeps provider order among equal dates, so the later row is last.
        observations.sort_by_key(|o| o.date);
        let mut deduped: Vec<Observation> = Vec::with_capacity(observations.len());
        for obs in observations {
            match deduped.last_mut() {
                Some(last) if last.date == obs.date => *last = obs,
                _ => deduped.push(obs),
            }
        }

        Self {
            name: name.into(),
            observations: deduped,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// The value column label, equal to the owning indicator's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn value_on(&self, date: NaiveDate) -> Option<f64> {
        self.observations
            .binary_search_by_key(&date, |o| o.date)
            .ok()
            .map(|idx| self.observations[idx].value)
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.observations.first().map(|o| o.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.observations.last().map(|o| o.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, day).unwrap()
    }

    #[test]
    fn missing_and_non_finite_values_are_dropped() {
        let ts = TimeSeries::from_raw(
            "CDI",
            vec![
                RawObservation::new(d(2), Some(0.05)),
                RawObservation::new(d(3), None),
                RawObservation::new(d(4), Some(f64::NAN)),
                RawObservation::new(d(5), Some(0.06)),
            ],
        );
        assert_eq!(ts.name(), "CDI");
        assert_eq!(ts.len(), 2);
        assert_eq!(ts.value_on(d(3)), None);
        assert_eq!(ts.value_on(d(5)), Some(0.06));
    }

    #[test]
    fn rows_are_sorted_and_later_duplicate_wins() {
        let ts = TimeSeries::from_raw(
            "IBOV",
            vec![
                RawObservation::new(d(5), Some(3.0)),
                RawObservation::new(d(2), Some(1.0)),
                RawObservation::new(d(5), Some(4.0)),
            ],
        );
        let dates: Vec<_> = ts.observations().iter().map(|o| o.date).collect();
        assert_eq!(dates, vec![d(2), d(5)]);
        assert_eq!(ts.value_on(d(5)), Some(4.0));
        assert_eq!(ts.first_date(), Some(d(2)));
        assert_eq!(ts.last_date(), Some(d(5)));
    }

    #[test]
    fn all_missing_gives_empty_series() {
        let ts = TimeSeries::from_raw("X", vec![RawObservation::new(d(2), None)]);
        assert!(ts.is_empty());
        assert_eq!(TimeSeries::empty("X"), ts);
    }
}
