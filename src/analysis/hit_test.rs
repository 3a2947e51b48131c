//! Nearest-point lookup for hover tooltips.
//!
//! Distances are plain Euclidean in (ordinal day, value) space. One day on the x axis
//! weighs the same as one unit of value, so for series with large values the
//! tooltip effectively only appears when the pointer is within the threshold on the
//! value axis. That is the intended behaviour, not an oversight.

use chrono::NaiveDate;

use crate::analysis::PlottedSeries;
use crate::utils::format_date;

/// The point a tooltip should be anchored to.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverHit {
    pub series_idx: usize,
    pub point_idx: usize,
    pub name: String,
    pub date: NaiveDate,
    pub value: f64,
    /// Plot-space position of the point, for anchoring
    pub position: [f64; 2],
    pub distance: f64,
}

impl HoverHit {
    pub fn tooltip_text(&self) -> String {
        format!(
            "{}\nDate: {}\nValue: {:.2}",
            self.name,
            format_date(self.date),
            self.value
        )
    }
}

/// Global nearest point over all series. Equal distances keep the earlier series,
/// and within a series the earlier point; the tie order carries no meaning.
pub fn nearest_point(series: &[PlottedSeries], pointer: [f64; 2]) -> Option<HoverHit> {
    // Pointer x is taken as the day it falls in.
    let px = pointer[0].floor();
    let py = pointer[1];

    let mut best: Option<(usize, usize, f64)> = None;
    for (series_idx, s) in series.iter().enumerate() {
        let mut series_best: Option<(usize, f64)> = None;
        for (point_idx, p) in s.points.iter().enumerate() {
            let dist = (p[0] - px).hypot(p[1] - py);
            if dist.is_nan() {
                continue;
            }
            if series_best.is_none_or(|(_, d)| dist < d) {
                series_best = Some((point_idx, dist));
            }
        }
        if let Some((point_idx, dist)) = series_best {
            if best.is_none_or(|(_, _, d)| dist < d) {
                best = Some((series_idx, point_idx, dist));
            }
        }
    }

    let (series_idx, point_idx, distance) = best?;
    let s = &series[series_idx];
    let position = s.points[point_idx];
    Some(HoverHit {
        series_idx,
        point_idx,
        name: s.name.clone(),
        date: s.dates[point_idx],
        value: position[1],
        position,
        distance,
    })
}

/// Tooltip decision for one pointer event. `pointer` is None when the pointer is
/// outside the plotting area, which always hides the tooltip.
pub fn hit_test(
    series: &[PlottedSeries],
    pointer: Option<[f64; 2]>,
    threshold: f64,
) -> Option<HoverHit> {
    let hit = nearest_point(series, pointer?)?;
    (hit.distance < threshold).then_some(hit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::date_to_ordinal;

    fn series(name: &str, rows: &[(u32, f64)]) -> PlottedSeries {
        let dates: Vec<NaiveDate> = rows
            .iter()
            .map(|(day, _)| NaiveDate::from_ymd_opt(2023, 1, *day).unwrap())
            .collect();
        PlottedSeries {
            name: name.to_string(),
            points: dates
                .iter()
                .zip(rows)
                .map(|(d, (_, v))| [date_to_ordinal(*d), *v])
                .collect(),
            dates,
        }
    }

    fn x(day: u32) -> f64 {
        date_to_ordinal(NaiveDate::from_ymd_opt(2023, 1, day).unwrap())
    }

    fn three_series() -> Vec<PlottedSeries> {
        vec![
            series("CDI", &[(2, 13.65), (3, 13.65), (4, 13.65)]),
            series("SELIC", &[(2, 20.0), (3, 21.0), (4, 22.0)]),
            series("IPCA", &[(2, 0.5), (5, 0.6)]),
        ]
    }

    #[test]
    fn picks_global_minimum_across_series() {
        let all = three_series();
        let hit = nearest_point(&all, [x(3) + 0.4, 20.8]).unwrap();
        assert_eq!(hit.name, "SELIC");
        assert_eq!(hit.date, NaiveDate::from_ymd_opt(2023, 1, 3).unwrap());
        assert_eq!(hit.value, 21.0);
        assert!((hit.distance - 0.2).abs() < 1e-9);

        let hit = nearest_point(&all, [x(5), 1.0]).unwrap();
        assert_eq!(hit.name, "IPCA");
        assert_eq!(hit.point_idx, 1);
    }

    #[test]
    fn matches_brute_force_reference() {
        let all = three_series();
        let pointer = [x(4), 5.0];
        let expected = all
            .iter()
            .flat_map(|s| s.points.iter())
            .map(|p| ((p[0] - pointer[0]).powi(2) + (p[1] - pointer[1]).powi(2)).sqrt())
            .fold(f64::INFINITY, f64::min);
        let hit = nearest_point(&all, pointer).unwrap();
        assert!((hit.distance - expected).abs() < 1e-12);
    }

    #[test]
    fn pointer_x_is_floored_to_its_day() {
        let all = vec![series("A", &[(2, 0.0), (3, 0.0)])];
        let hit = nearest_point(&all, [x(2) + 0.9, 0.0]).unwrap();
        assert_eq!(hit.point_idx, 0);
        assert_eq!(hit.distance, 0.0);
    }

    #[test]
    fn far_pointer_yields_no_tooltip() {
        let all = three_series();
        assert!(hit_test(&all, Some([x(3), 500.0]), 50.0).is_none());
        // Exactly at the threshold is not "strictly below"
        let edge = vec![series("A", &[(2, 0.0)])];
        assert!(hit_test(&edge, Some([x(2), 50.0]), 50.0).is_none());
        assert!(hit_test(&edge, Some([x(2), 49.99]), 50.0).is_some());
    }

    #[test]
    fn pointer_outside_plot_hides_tooltip() {
        assert!(hit_test(&three_series(), None, 50.0).is_none());
    }

    #[test]
    fn empty_inputs_never_panic() {
        assert!(nearest_point(&[], [x(2), 0.0]).is_none());
        let with_empty = vec![series("EMPTY", &[]), series("B", &[(2, 1.0)])];
        let hit = hit_test(&with_empty, Some([x(2), 1.0]), 50.0).unwrap();
        assert_eq!(hit.name, "B");
        assert_eq!(hit.series_idx, 1);
        assert!(hit_test(&[series("EMPTY", &[])], Some([x(2), 1.0]), 50.0).is_none());
    }

    #[test]
    fn ties_resolve_to_first_series() {
        let all = vec![series("FIRST", &[(2, 10.0)]), series("SECOND", &[(2, 10.0)])];
        let hit = nearest_point(&all, [x(2), 11.0]).unwrap();
        assert_eq!(hit.name, "FIRST");
    }

    #[test]
    fn tooltip_shows_name_date_and_two_decimals() {
        let all = three_series();
        let hit = hit_test(&all, Some([x(2), 13.0]), 50.0).unwrap();
        assert_eq!(hit.tooltip_text(), "CDI\nDate: 2023-01-02\nValue: 13.65");
    }
}
