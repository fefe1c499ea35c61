//! Resource metadata module
//!
//! The existence/stat boundary between the decision engine and the outside
//! world. Lookups are queried once per candidate path and never cached;
//! any failure is normalized to "does not exist".

use std::path::Path;

use chrono::{DateTime, TimeZone, Utc};

use crate::logger;

/// Size and modification time of one resolved resource.
///
/// Immutable for the lifetime of a single request's evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceMetadata {
    /// Resource size in bytes
    pub size: u64,
    /// Modification time, whole seconds only
    pub modified: DateTime<Utc>,
}

impl ResourceMetadata {
    /// `modified` is truncated to whole seconds on construction; HTTP dates
    /// carry no finer resolution and the conditional rules compare exactly.
    pub fn new(size: u64, modified: DateTime<Utc>) -> Self {
        let modified = Utc
            .timestamp_opt(modified.timestamp(), 0)
            .single()
            .unwrap_or(modified);
        Self { size, modified }
    }
}

/// Existence/stat queries for candidate paths.
///
/// Implementations must be safe to call repeatedly and cheaply; the
/// resolver probes several candidates per request with no caching.
#[allow(async_fn_in_trait)]
pub trait MetadataProvider {
    /// Metadata for `path`, or `None` when the candidate does not exist.
    /// Lookup failure and absence are indistinguishable to the caller.
    async fn lookup(&self, path: &Path) -> Option<ResourceMetadata>;
}

/// Stock provider backed by `tokio::fs`. Regular files only.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsMetadataProvider;

impl MetadataProvider for FsMetadataProvider {
    async fn lookup(&self, path: &Path) -> Option<ResourceMetadata> {
        let meta = match tokio::fs::metadata(path).await {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                logger::log_warning(&format!(
                    "Metadata lookup failed for '{}': {e}",
                    path.display()
                ));
                return None;
            }
        };

        if !meta.is_file() {
            return None;
        }
        let modified = match meta.modified() {
            Ok(time) => DateTime::<Utc>::from(time),
            Err(_) => return None,
        };

        Some(ResourceMetadata::new(meta.len(), modified))
    }
}
