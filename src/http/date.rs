//! HTTP date handling module
//!
//! Parsing and formatting for the date-valued conditional headers and
//! `Last-Modified`, per RFC 7231 section 7.1.1.1.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Preferred IMF-fixdate format, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`
const IMF_FIXDATE: &str = "%a, %d %b %Y %H:%M:%S GMT";
/// Obsolete RFC 850 format, e.g. `Sunday, 06-Nov-94 08:49:37 GMT`
const RFC_850: &str = "%A, %d-%b-%y %H:%M:%S GMT";
/// Obsolete asctime format, e.g. `Sun Nov  6 08:49:37 1994`
const ASCTIME: &str = "%a %b %e %H:%M:%S %Y";

/// Parse an HTTP-date header value (any of the three RFC 7231 formats)
///
/// Total over malformed input: an unparsable date is `None`, which makes
/// the conditional rule carrying it inapplicable rather than an error.
///
/// # Examples
/// ```
/// use statik::http::date::parse_http_date;
///
/// assert!(parse_http_date("Sun, 06 Nov 1994 08:49:37 GMT").is_some());
/// assert!(parse_http_date("last tuesday").is_none());
/// ```
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    [IMF_FIXDATE, RFC_850, ASCTIME]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
}

/// Format a timestamp as an IMF-fixdate, the only format to send.
pub fn format_http_date(stamp: DateTime<Utc>) -> String {
    stamp.format(IMF_FIXDATE).to_string()
}
