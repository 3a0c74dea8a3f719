//! Time related utils.

use chrono::TimeZone;
use chrono::Utc;

/// DateTime is the alias for `chrono::DateTime<Utc>`.
pub type DateTime = chrono::DateTime<Utc>;

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Convert unix timestamp (seconds) into datetime.
///
/// Returns `None` if the timestamp is out of chrono's supported range.
pub fn from_timestamp(secs: i64) -> Option<DateTime> {
    Utc.timestamp_opt(secs, 0).single()
}
