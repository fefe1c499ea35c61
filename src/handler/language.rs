//! Language preference module
//!
//! Turns an `Accept-Language` value into the ordered suffix list the
//! variant resolver probes. Order encodes precedence; the list always ends
//! with the unsuffixed form and the configured terminal fallback, so a
//! terminal candidate exists even when the header is absent or exhausted.

use std::cmp::Ordering;

/// Ordered candidate suffixes for one request
///
/// Client preferences become `Some(".tag")` entries sorted by q-weight
/// (descending, stable for ties); `*` and zero-weight entries are skipped.
/// Duplicates are not collapsed: every probe revalidates on its own, so a
/// repeated candidate is merely a repeated lookup.
pub fn language_suffixes(
    accept_language: Option<&str>,
    fallback_suffix: &str,
) -> Vec<Option<String>> {
    let mut weighted: Vec<(f32, String)> = Vec::new();

    if let Some(value) = accept_language {
        for item in value.split(',') {
            let mut parts = item.split(';');
            let tag = parts.next().unwrap_or("").trim();
            if tag.is_empty() || tag == "*" {
                continue;
            }
            let weight = parts.find_map(parse_weight).unwrap_or(1.0);
            if weight <= 0.0 {
                continue;
            }
            weighted.push((weight, format!(".{}", tag.to_ascii_lowercase())));
        }
    }

    // sort_by is stable: equal weights keep header order
    weighted.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

    let mut suffixes: Vec<Option<String>> = weighted.into_iter().map(|(_, s)| Some(s)).collect();
    suffixes.push(None);
    suffixes.push(Some(fallback_suffix.to_string()));
    suffixes
}

/// Parse a `q=0.8` style parameter
fn parse_weight(param: &str) -> Option<f32> {
    let (key, value) = param.trim().split_once('=')?;
    if key.trim() != "q" {
        return None;
    }
    value.trim().parse().ok()
}
