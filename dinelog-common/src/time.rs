//! Timestamp utilities

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Current calendar date in UTC
pub fn today() -> NaiveDate {
    now().date_naive()
}

/// Midnight UTC at the start of `date`
///
/// Visit dates carry no time of day; they are anchored at 00:00 UTC.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Whole days elapsed from the start of `date` until `at`, rounded down
///
/// Negative when `date` lies after `at`.
pub fn days_since(date: NaiveDate, at: DateTime<Utc>) -> i64 {
    let elapsed = at.signed_duration_since(start_of_day(date));
    elapsed.num_seconds().div_euclid(86_400)
}
