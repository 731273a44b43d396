//! Week bucketing

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};

/// Weekday every aggregation bucket starts on
pub const WEEK_START: Weekday = Weekday::Sun;

/// Start-of-week date (UTC calendar) of the week containing `at`
pub fn week_start(at: DateTime<Utc>) -> NaiveDate {
    week_start_of_date(at.date_naive())
}

pub fn week_start_of_date(date: NaiveDate) -> NaiveDate {
    let offset = (7 + date.weekday().num_days_from_sunday()
        - WEEK_START.num_days_from_sunday())
        % 7;
    date - Duration::days(offset as i64)
}
