use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::engine::QueryError;
use crate::utils::{format_date, parse_date};

/// Inclusive on both ends. `start <= end` always holds for a constructed range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, QueryError> {
        if start > end {
            return Err(QueryError::InvalidDateRange(format!(
                "start date {} is after end date {}",
                format_date(start),
                format_date(end)
            )));
        }
        Ok(Self { start, end })
    }

    /// Parses two `YYYY-MM-DD` inputs as typed by the user.
    pub fn parse(start: &str, end: &str) -> Result<Self, QueryError> {
        let parse_one = |label: &str, input: &str| {
            parse_date(input).ok_or_else(|| {
                QueryError::InvalidDateRange(format!(
                    "{} date '{}' is not a valid YYYY-MM-DD date",
                    label,
                    input.trim()
                ))
            })
        };
        Self::new(parse_one("start", start)?, parse_one("end", end)?)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Splits the range into consecutive sub-ranges spanning at most `years` calendar years each.
    pub fn windows(&self, years: i32) -> Vec<DateRange> {
        let years = years.max(1);
        let mut out = Vec::new();
        let mut cursor = self.start;
        loop {
            let limit = add_years(cursor, years)
                .and_then(|d| d.pred_opt())
                .unwrap_or(self.end);
            let window_end = limit.min(self.end);
            out.push(DateRange {
                start: cursor,
                end: window_end,
            });
            match window_end.succ_opt() {
                Some(next) if window_end < self.end => cursor = next,
                _ => break,
            }
        }
        out
    }
}

fn add_years(date: NaiveDate, years: i32) -> Option<NaiveDate> {
    let year = date.year() + years;
    // 29 Feb rolls back to 28 Feb in non-leap target years
    date.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, date.month(), 28))
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", format_date(self.start), format_date(self.end))
    }
}
