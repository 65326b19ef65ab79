//! Small comparisons shared by the hard-reject gates and the waterfall stages.

use chrono::{Duration, NaiveDate};

pub const BUREAU_DATE_FORMAT: &str = "%Y-%m-%d";

/// Where a bureau date falls relative to a lookback window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recency {
    Recent,
    Stale,
    Unparsable,
}

pub fn parse_bureau_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), BUREAU_DATE_FORMAT).ok()
}

/// A date is inside the window when it is strictly after `as_of - days`.
pub fn within_window(date: NaiveDate, as_of: NaiveDate, days: i64) -> bool {
    date > as_of - Duration::days(days)
}

pub fn recency(raw: &str, as_of: NaiveDate, days: i64) -> Recency {
    match parse_bureau_date(raw) {
        Some(date) if within_window(date, as_of, days) => Recency::Recent,
        Some(_) => Recency::Stale,
        None => Recency::Unparsable,
    }
}

/// Counts dates inside the window; unparsable dates never count.
pub fn count_recent<'a, I>(dates: I, as_of: NaiveDate, days: i64) -> usize
where
    I: IntoIterator<Item = &'a str>,
{
    dates
        .into_iter()
        .filter(|raw| recency(raw, as_of, days) == Recency::Recent)
        .count()
}

pub fn meets_minimum(value: f64, minimum: f64) -> bool {
    value >= minimum
}

pub fn exceeds(value: f64, threshold: f64) -> bool {
    value > threshold
}

pub fn within_inclusive<T: PartialOrd>(value: T, min: T, max: T) -> bool {
    min <= value && value <= max
}

/// `None` when the denominator cannot carry a ratio.
pub fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    (denominator > 0.0).then(|| numerator / denominator)
}
