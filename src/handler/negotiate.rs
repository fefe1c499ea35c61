//! Variant resolution module
//!
//! Content negotiation by existence: walk a short ordered candidate list
//! and keep the first path the metadata provider knows. The same search is
//! used for language-suffixed variants and for redirect candidates.

use std::path::Path;

use crate::metadata::{MetadataProvider, ResourceMetadata};

/// First existing candidate over a lazily-produced path sequence
///
/// One provider query per candidate, in order; a miss is a plain miss and
/// the next candidate is probed. No caching, no retries.
pub async fn first_existing<P, I>(provider: &P, candidates: I) -> Option<(String, ResourceMetadata)>
where
    P: MetadataProvider,
    I: IntoIterator<Item = String>,
{
    for candidate in candidates {
        if let Some(meta) = provider.lookup(Path::new(&candidate)).await {
            return Some((candidate, meta));
        }
    }
    None
}

/// Candidate physical paths for `base`, one per suffix, preference order
pub fn variant_candidates<'a>(
    base: &'a str,
    suffixes: &'a [Option<String>],
) -> impl Iterator<Item = String> + 'a {
    suffixes.iter().map(move |entry| match entry {
        Some(suffix) => format!("{base}{suffix}"),
        None => base.to_string(),
    })
}

/// Resolve `base` against the suffix list: the first acceptable language
/// that actually has a file wins, not the best-matching language.
pub async fn resolve_variant<P: MetadataProvider>(
    provider: &P,
    base: &str,
    suffixes: &[Option<String>],
) -> Option<(String, ResourceMetadata)> {
    first_existing(provider, variant_candidates(base, suffixes)).await
}
