// SPDX-License-Identifier: MIT

//! Shared helpers for date/time formatting and day boundaries.

use chrono::{DateTime, Duration, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Start of the current UTC calendar day, RFC3339.
///
/// Stored timestamps use the same fixed-width format, so string comparison
/// against this boundary matches chronological order.
pub fn start_of_today_rfc3339() -> String {
    let start = Utc::now()
        .date_naive()
        .and_time(chrono::NaiveTime::MIN)
        .and_utc();
    format_utc_rfc3339(start)
}

/// RFC3339 timestamp `days` days before now (history window lower bound).
pub fn days_ago_rfc3339(days: i64) -> String {
    format_utc_rfc3339(Utc::now() - Duration::days(days))
}
