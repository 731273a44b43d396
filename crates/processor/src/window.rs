//! Date-range pre-filter

use chrono::{DateTime, Months, NaiveDate, NaiveTime, TimeZone, Utc};
use common::Result;
use github::PullRequest;
use tracing::debug;

/// Midnight UTC of the calendar date `months` months before `now`
pub fn lookback_cutoff(now: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    let date = now
        .date_naive()
        .checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN);
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// Keep PRs created at or after `cutoff`
pub fn retain_recent(prs: Vec<PullRequest>, cutoff: DateTime<Utc>) -> Result<Vec<PullRequest>> {
    let total = prs.len();
    let mut retained = Vec::with_capacity(total);
    for pr in prs {
        if pr.created_at()? >= cutoff {
            retained.push(pr);
        }
    }
    debug!(
        "Retained {}/{} PRs created since {}",
        retained.len(),
        total,
        cutoff
    );
    Ok(retained)
}
