use chrono::{Datelike, NaiveDate};

pub struct TimeUtils;

impl TimeUtils {
    pub const SECS_IN_DAY: i64 = 86_400;
    /// Format used for user input, axis labels, tooltips and csv output.
    pub const STANDARD_DATE_FORMAT: &str = "%Y-%m-%d";
    /// Format the SGS service expects in its query string and returns in `data`.
    pub const SGS_DATE_FORMAT: &str = "%d/%m/%Y";
}

pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), TimeUtils::STANDARD_DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(TimeUtils::STANDARD_DATE_FORMAT).to_string()
}

/// Proleptic Gregorian day number, 0001-01-01 = 1.
pub fn date_to_ordinal(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

/// Inverse of `date_to_ordinal`. Fractional days are floored.
pub fn date_from_ordinal(ordinal: f64) -> Option<NaiveDate> {
    if !ordinal.is_finite() || ordinal < i32::MIN as f64 || ordinal > i32::MAX as f64 {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(ordinal.floor() as i32)
}

pub fn unix_midnight_utc(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}
