//! Conditional header extraction module
//!
//! One-shot extraction of the headers the decision engine cares about,
//! pulled from an already-parsed header map. Date values are parsed here;
//! a present-but-unparsable date behaves as if the header were absent.

use chrono::{DateTime, Utc};
use hyper::header::{self, HeaderMap, HeaderName};

use crate::http::date::parse_http_date;

/// Conditional and range headers of one request
#[derive(Debug, Clone, Default)]
pub struct ConditionalHeaders {
    pub if_modified_since: Option<DateTime<Utc>>,
    pub if_unmodified_since: Option<DateTime<Utc>>,
    pub if_range: Option<DateTime<Utc>>,
    /// Raw Range value; parsed later against a known resource size
    pub range: Option<String>,
    /// Raw Accept-Language value, input to suffix derivation
    pub accept_language: Option<String>,
}

impl ConditionalHeaders {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            if_modified_since: date_header(headers, header::IF_MODIFIED_SINCE),
            if_unmodified_since: date_header(headers, header::IF_UNMODIFIED_SINCE),
            if_range: date_header(headers, header::IF_RANGE),
            range: text_header(headers, header::RANGE),
            accept_language: text_header(headers, header::ACCEPT_LANGUAGE),
        }
    }
}

fn text_header(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string)
}

fn date_header(headers: &HeaderMap, name: HeaderName) -> Option<DateTime<Utc>> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_http_date)
}
