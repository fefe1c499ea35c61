//! HTTP Range request parsing module
//!
//! Byte-range parsing against a known resource size, single range only,
//! per RFC 7233.

/// Body slice selected for a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSpec {
    /// The whole resource of the given size
    Entire(u64),
    /// A slice; `skip + length <= size` holds once constructed
    Part {
        /// Bytes to skip from the start
        skip: u64,
        /// Bytes to serve
        length: u64,
    },
}

impl RangeSpec {
    /// Number of body bytes this spec selects
    #[inline]
    pub const fn length(&self) -> u64 {
        match *self {
            Self::Entire(size) => size,
            Self::Part { length, .. } => length,
        }
    }
}

/// Parse an HTTP Range header value into a `(skip, length)` pair
///
/// Supported formats:
/// - `bytes=start-end` - Specific range, `start <= end < size`
/// - `bytes=start-` - From start to end of resource
/// - `bytes=-suffix` - Last suffix bytes
///
/// Total over malformed input: anything else - a bound outside the
/// resource, an inverted pair, non-numeric bounds, multiple ranges, a
/// non-`bytes` unit, or a zero-length resource - is `None`, which the
/// conditional evaluator maps to 416.
///
/// # Examples
/// ```
/// use statik::http::range::parse_range;
///
/// assert_eq!(parse_range("bytes=0-99", 1000), Some((0, 100)));
/// assert_eq!(parse_range("bytes=-100", 1000), Some((900, 100)));
/// assert_eq!(parse_range("bytes=1000-", 1000), None);
/// ```
pub fn parse_range(raw: &str, size: u64) -> Option<(u64, u64)> {
    let value = raw.trim().strip_prefix("bytes=")?;

    // A zero-length resource has no satisfiable range at all
    if size == 0 {
        return None;
    }

    // Single range only; multi-range requests are one opaque parse failure
    if value.contains(',') {
        return None;
    }

    let (start_str, end_str) = value.split_once('-')?;
    let (start_str, end_str) = (start_str.trim(), end_str.trim());

    if start_str.is_empty() {
        return parse_suffix_range(end_str, size);
    }

    let start: u64 = start_str.parse().ok()?;
    if start >= size {
        return None;
    }

    if end_str.is_empty() {
        // Open-ended range: everything from start
        return Some((start, size - start));
    }

    let end: u64 = end_str.parse().ok()?;
    if end < start || end >= size {
        return None;
    }
    Some((start, end - start + 1))
}

/// Parse a suffix range (e.g., `-500`: the last 500 bytes)
fn parse_suffix_range(suffix_str: &str, size: u64) -> Option<(u64, u64)> {
    let suffix: u64 = suffix_str.parse().ok()?;
    if suffix == 0 {
        return None;
    }

    // A suffix longer than the resource selects the whole resource
    let skip = size.saturating_sub(suffix);
    Some((skip, size - skip))
}
