//! Time utilities for log lines and file names.

use chrono::{DateTime, Local, SecondsFormat, Utc};

/// Formats the current local time according to the specified format string.
///
/// The format string follows the same syntax as `chrono::format::strftime`.
///
/// # Examples
///
/// ```
/// use cutil::time::local_now;
///
/// let formatted = local_now("%H:%M:%S");
/// assert_eq!(formatted.len(), 8);
/// ```
pub fn local_now(format: &str) -> String {
    Local::now().format(format).to_string()
}

/// Formats a UTC instant as ISO-8601 with millisecond precision.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use cutil::time::iso8601;
///
/// let t = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
/// assert_eq!(iso8601(&t), "2024-01-02T03:04:05.000Z");
/// ```
pub fn iso8601(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// ISO-8601 timestamp with the `-`, `:` and `.` separators removed.
///
/// Suitable as a file name component on every platform.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use cutil::time::compact_iso8601;
///
/// let t = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
/// assert_eq!(compact_iso8601(&t), "20240102T030405000Z");
/// ```
pub fn compact_iso8601(time: &DateTime<Utc>) -> String {
    iso8601(time)
        .chars()
        .filter(|c| !matches!(c, '-' | ':' | '.'))
        .collect()
}
