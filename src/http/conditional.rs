//! Conditional request evaluation module
//!
//! The RFC 7232/7233 precedence chain over the date-valued conditional
//! headers and the Range header, against one resource's size and
//! modification time. Evaluation is total: every input combination maps to
//! an outcome, never an error.

use chrono::{DateTime, Utc};
use hyper::StatusCode;

use crate::http::headers::ConditionalHeaders;
use crate::http::range::parse_range;

/// Final decision for one request's body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionalOutcome {
    /// No partial content; 200, 304, 412 or 416
    Full(StatusCode),
    /// Serve a slice; implies status 206
    Partial { skip: u64, length: u64 },
}

/// Evaluate the conditional headers for a GET request.
///
/// Ordered rules, first one that fires wins:
/// 1. `If-Modified-Since`: equal stamp is 304; a different stamp skips
///    straight to the unconditional rule.
/// 2. `If-Unmodified-Since`: equal stamp falls through to the
///    unconditional rule; a different stamp is 412.
/// 3. `If-Range` with `Range`: equal stamp honors the range; a stale
///    stamp ignores it and serves the full body. `If-Range` without
///    `Range` does not fire.
/// 4. Unconditional: honor `Range` if present, else plain 200.
///
/// Comparisons are exact at second precision; HTTP dates carry nothing
/// finer. A missing or unparsable date simply skips its rule.
pub fn evaluate(
    headers: &ConditionalHeaders,
    size: u64,
    modified: DateTime<Utc>,
) -> ConditionalOutcome {
    if let Some(stamp) = headers.if_modified_since {
        if same_second(stamp, modified) {
            return ConditionalOutcome::Full(StatusCode::NOT_MODIFIED);
        }
        return unconditional(headers, size);
    }

    if let Some(stamp) = headers.if_unmodified_since {
        if same_second(stamp, modified) {
            return unconditional(headers, size);
        }
        return ConditionalOutcome::Full(StatusCode::PRECONDITION_FAILED);
    }

    if let (Some(stamp), Some(raw)) = (headers.if_range, headers.range.as_deref()) {
        if same_second(stamp, modified) {
            return ranged(raw, size);
        }
        // The client's cached reference is stale; the range is meaningless
        return ConditionalOutcome::Full(StatusCode::OK);
    }

    unconditional(headers, size)
}

/// Evaluate for a HEAD request: only `If-Modified-Since` applies.
///
/// A body-less response has no partial-content concept, so Range and the
/// remaining conditionals are not consulted at all.
pub fn evaluate_head(headers: &ConditionalHeaders, modified: DateTime<Utc>) -> ConditionalOutcome {
    match headers.if_modified_since {
        Some(stamp) if same_second(stamp, modified) => {
            ConditionalOutcome::Full(StatusCode::NOT_MODIFIED)
        }
        _ => ConditionalOutcome::Full(StatusCode::OK),
    }
}

fn unconditional(headers: &ConditionalHeaders, size: u64) -> ConditionalOutcome {
    match headers.range.as_deref() {
        Some(raw) => ranged(raw, size),
        None => ConditionalOutcome::Full(StatusCode::OK),
    }
}

fn ranged(raw: &str, size: u64) -> ConditionalOutcome {
    match parse_range(raw, size) {
        Some((skip, length)) => ConditionalOutcome::Partial { skip, length },
        None => ConditionalOutcome::Full(StatusCode::RANGE_NOT_SATISFIABLE),
    }
}

fn same_second(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.timestamp() == b.timestamp()
}
