mod perf;
mod time_utils;

pub use time_utils::{
    TimeUtils, date_from_ordinal, date_to_ordinal, format_date, parse_date, unix_midnight_utc,
};
