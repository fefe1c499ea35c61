//! Request decision module
//!
//! Entry point of the engine: method gate, directory handling, variant
//! resolution, conditional evaluation, and assembly of the final
//! `ResponseSpec`. One call per request, no state kept across calls.

use hyper::header::{self, HeaderMap, HeaderValue};
use hyper::{Method, StatusCode};

use crate::config::ResourcesConfig;
use crate::handler::language::language_suffixes;
use crate::handler::negotiate::resolve_variant;
use crate::http::conditional::{self, ConditionalOutcome};
use crate::http::date::format_http_date;
use crate::http::headers::ConditionalHeaders;
use crate::http::range::RangeSpec;
use crate::http::response::{insert_header, BodyDisposition, ResponseSpec};
use crate::logger;
use crate::metadata::{MetadataProvider, ResourceMetadata};

/// Request facts the decision needs, extracted once
pub struct RequestContext<'a> {
    pub method: &'a Method,
    /// Request path, also the base resource identifier handed to the provider
    pub path: &'a str,
    /// Request scheme, for redirect Location values
    pub scheme: &'a str,
    /// Request authority (host, plus port when explicit), for redirects
    pub authority: &'a str,
    pub headers: ConditionalHeaders,
}

impl<'a> RequestContext<'a> {
    pub fn new(
        method: &'a Method,
        path: &'a str,
        scheme: &'a str,
        authority: &'a str,
        headers: &HeaderMap,
    ) -> Self {
        Self {
            method,
            path,
            scheme,
            authority,
            headers: ConditionalHeaders::from_headers(headers),
        }
    }
}

/// Decide status, headers, and body disposition for one request.
///
/// Flow: method gate (before any provider I/O), index-file handling for
/// directory-shaped paths, variant resolution over the language-suffix
/// list, conditional evaluation, assembly. When nothing resolves, a
/// redirect candidate is probed before settling on 404.
pub async fn decide<P: MetadataProvider>(
    ctx: &RequestContext<'_>,
    provider: &P,
    resources: &ResourcesConfig,
) -> ResponseSpec {
    if !matches!(*ctx.method, Method::GET | Method::HEAD) {
        logger::log_rejected_method(ctx.method);
        return ResponseSpec::status_page(StatusCode::METHOD_NOT_ALLOWED)
            .with_header(header::ALLOW, "GET, HEAD");
    }
    let is_head = *ctx.method == Method::HEAD;

    let suffixes = language_suffixes(
        ctx.headers.accept_language.as_deref(),
        &resources.fallback_suffix,
    );

    // A directory-shaped path means the index file, language-negotiated
    let base = if ctx.path.ends_with('/') {
        format!("{}{}", ctx.path, resources.index_file)
    } else {
        ctx.path.to_string()
    };

    if let Some((path, meta)) = resolve_variant(provider, &base, &suffixes).await {
        let outcome = if is_head {
            conditional::evaluate_head(&ctx.headers, meta.modified)
        } else {
            conditional::evaluate(&ctx.headers, meta.size, meta.modified)
        };
        return assemble(is_head, path, &meta, outcome);
    }

    // `/docs` redirects to `/docs/` only when an index variant actually
    // exists there; a directory-shaped path that missed never redirects
    if !ctx.path.ends_with('/') {
        let index_base = format!("{}/{}", ctx.path, resources.index_file);
        if resolve_variant(provider, &index_base, &suffixes).await.is_some() {
            let location = format!("{}://{}{}/", ctx.scheme, ctx.authority, ctx.path);
            return ResponseSpec::status_page(StatusCode::MOVED_PERMANENTLY)
                .with_header(header::LOCATION, &location);
        }
    }

    ResponseSpec::status_page(StatusCode::NOT_FOUND)
}

/// Combine the resolved resource and the conditional outcome.
///
/// Headers are computed here, from the same metadata and range the status
/// decision used, so status and `Content-Length` can never disagree.
fn assemble(
    is_head: bool,
    path: String,
    meta: &ResourceMetadata,
    outcome: ConditionalOutcome,
) -> ResponseSpec {
    let mut headers = HeaderMap::new();

    let (status, body) = match outcome {
        ConditionalOutcome::Partial { skip, length } => {
            file_headers(&mut headers, meta, length);
            insert_header(
                &mut headers,
                header::CONTENT_RANGE,
                &format!("bytes {}-{}/{}", skip, skip + length - 1, meta.size),
            );
            (
                StatusCode::PARTIAL_CONTENT,
                BodyDisposition::File {
                    path,
                    range: RangeSpec::Part { skip, length },
                },
            )
        }
        ConditionalOutcome::Full(status) if status == StatusCode::OK => {
            file_headers(&mut headers, meta, meta.size);
            (
                StatusCode::OK,
                BodyDisposition::File {
                    path,
                    range: RangeSpec::Entire(meta.size),
                },
            )
        }
        ConditionalOutcome::Full(status) if status == StatusCode::RANGE_NOT_SATISFIABLE => {
            insert_header(
                &mut headers,
                header::CONTENT_RANGE,
                &format!("bytes */{}", meta.size),
            );
            (status, BodyDisposition::FileNoBody)
        }
        // 304 and 412: headers only, stamped like the file they refer to
        ConditionalOutcome::Full(status) => {
            insert_header(
                &mut headers,
                header::LAST_MODIFIED,
                &format_http_date(meta.modified),
            );
            (status, BodyDisposition::FileNoBody)
        }
    };

    let spec = ResponseSpec { status, headers, body };
    if is_head {
        spec.without_body()
    } else {
        spec
    }
}

fn file_headers(headers: &mut HeaderMap, meta: &ResourceMetadata, content_length: u64) {
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(content_length));
    insert_header(
        headers,
        header::LAST_MODIFIED,
        &format_http_date(meta.modified),
    );
    headers.insert(header::ACCEPT_RANGES, HeaderValue::from_static("bytes"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::collections::HashMap;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MapProvider(HashMap<String, ResourceMetadata>);

    impl MapProvider {
        fn with(entries: &[(&str, u64)]) -> Self {
            Self(
                entries
                    .iter()
                    .map(|(p, size)| {
                        let meta =
                            ResourceMetadata::new(*size, Utc.timestamp_opt(1_000, 0).unwrap());
                        ((*p).to_string(), meta)
                    })
                    .collect(),
            )
        }
    }

    impl MetadataProvider for MapProvider {
        async fn lookup(&self, path: &Path) -> Option<ResourceMetadata> {
            self.0.get(path.to_str()?).copied()
        }
    }

    struct CountingProvider(AtomicUsize);

    impl MetadataProvider for CountingProvider {
        async fn lookup(&self, _path: &Path) -> Option<ResourceMetadata> {
            self.0.fetch_add(1, Ordering::Relaxed);
            None
        }
    }

    fn ctx<'a>(method: &'a Method, path: &'a str) -> RequestContext<'a> {
        RequestContext {
            method,
            path,
            scheme: "http",
            authority: "example.com",
            headers: ConditionalHeaders::default(),
        }
    }

    fn resources() -> ResourcesConfig {
        ResourcesConfig::default()
    }

    #[tokio::test]
    async fn test_disallowed_method_skips_io() {
        let provider = CountingProvider(AtomicUsize::new(0));
        let spec = decide(&ctx(&Method::POST, "/page"), &provider, &resources()).await;
        assert_eq!(spec.status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(spec.body, BodyDisposition::StatusPage);
        assert_eq!(spec.headers.get(header::ALLOW).unwrap(), "GET, HEAD");
        assert_eq!(provider.0.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn test_get_resolved_full_body() {
        let provider = MapProvider::with(&[("/site/page.en", 10)]);
        let spec = decide(&ctx(&Method::GET, "/site/page"), &provider, &resources()).await;
        assert_eq!(spec.status, StatusCode::OK);
        assert_eq!(spec.headers.get(header::CONTENT_LENGTH).unwrap(), "10");
        assert!(spec.headers.get(header::LAST_MODIFIED).is_some());
        assert_eq!(spec.headers.get(header::ACCEPT_RANGES).unwrap(), "bytes");
        assert_eq!(
            spec.body,
            BodyDisposition::File {
                path: "/site/page.en".to_string(),
                range: RangeSpec::Entire(10),
            }
        );
    }

    #[tokio::test]
    async fn test_directory_path_uses_index_variant() {
        let provider = MapProvider::with(&[("/site/index.html.en", 7)]);
        let spec = decide(&ctx(&Method::GET, "/site/"), &provider, &resources()).await;
        assert_eq!(spec.status, StatusCode::OK);
        assert_eq!(
            spec.body,
            BodyDisposition::File {
                path: "/site/index.html.en".to_string(),
                range: RangeSpec::Entire(7),
            }
        );
    }

    #[tokio::test]
    async fn test_redirect_only_when_index_exists() {
        let provider = MapProvider::with(&[("/docs/index.html", 3)]);
        let spec = decide(&ctx(&Method::GET, "/docs"), &provider, &resources()).await;
        assert_eq!(spec.status, StatusCode::MOVED_PERMANENTLY);
        assert_eq!(spec.body, BodyDisposition::StatusPage);
        assert_eq!(
            spec.headers.get(header::LOCATION).unwrap(),
            "http://example.com/docs/"
        );
    }

    #[tokio::test]
    async fn test_no_index_no_redirect() {
        let provider = MapProvider::with(&[]);
        let spec = decide(&ctx(&Method::GET, "/docs"), &provider, &resources()).await;
        assert_eq!(spec.status, StatusCode::NOT_FOUND);
        assert_eq!(spec.body, BodyDisposition::StatusPage);
    }

    #[tokio::test]
    async fn test_directory_path_never_redirects() {
        // `/docs/` missing its index is a plain 404, not a redirect loop
        let provider = MapProvider::with(&[]);
        let spec = decide(&ctx(&Method::GET, "/docs/"), &provider, &resources()).await;
        assert_eq!(spec.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_language_preference_order() {
        let provider = MapProvider::with(&[("/p.en", 1), ("/p.fr", 2)]);
        let mut context = ctx(&Method::GET, "/p");
        context.headers.accept_language = Some("fr, en;q=0.5".to_string());
        let spec = decide(&context, &provider, &resources()).await;
        assert_eq!(
            spec.body,
            BodyDisposition::File {
                path: "/p.fr".to_string(),
                range: RangeSpec::Entire(2),
            }
        );
    }

    #[tokio::test]
    async fn test_range_request_partial() {
        let provider = MapProvider::with(&[("/p", 100)]);
        let mut context = ctx(&Method::GET, "/p");
        context.headers.range = Some("bytes=10-19".to_string());
        let spec = decide(&context, &provider, &resources()).await;
        assert_eq!(spec.status, StatusCode::PARTIAL_CONTENT);
        assert_eq!(spec.headers.get(header::CONTENT_LENGTH).unwrap(), "10");
        assert_eq!(
            spec.headers.get(header::CONTENT_RANGE).unwrap(),
            "bytes 10-19/100"
        );
        assert_eq!(
            spec.body,
            BodyDisposition::File {
                path: "/p".to_string(),
                range: RangeSpec::Part { skip: 10, length: 10 },
            }
        );
    }

    #[tokio::test]
    async fn test_unsatisfiable_range() {
        let provider = MapProvider::with(&[("/p", 100)]);
        let mut context = ctx(&Method::GET, "/p");
        context.headers.range = Some("bytes=500-".to_string());
        let spec = decide(&context, &provider, &resources()).await;
        assert_eq!(spec.status, StatusCode::RANGE_NOT_SATISFIABLE);
        assert_eq!(spec.body, BodyDisposition::FileNoBody);
        assert_eq!(
            spec.headers.get(header::CONTENT_RANGE).unwrap(),
            "bytes */100"
        );
    }

    #[tokio::test]
    async fn test_not_modified_headers() {
        let provider = MapProvider::with(&[("/p", 100)]);
        let mut context = ctx(&Method::GET, "/p");
        context.headers.if_modified_since = Some(Utc.timestamp_opt(1_000, 0).unwrap());
        let spec = decide(&context, &provider, &resources()).await;
        assert_eq!(spec.status, StatusCode::NOT_MODIFIED);
        assert_eq!(spec.body, BodyDisposition::FileNoBody);
        assert!(spec.headers.get(header::LAST_MODIFIED).is_some());
        assert!(spec.headers.get(header::CONTENT_LENGTH).is_none());
    }

    #[tokio::test]
    async fn test_head_never_yields_file_body() {
        let provider = MapProvider::with(&[("/p", 100)]);
        let mut context = ctx(&Method::HEAD, "/p");
        context.headers.range = Some("bytes=0-9".to_string());
        let spec = decide(&context, &provider, &resources()).await;
        assert_eq!(spec.status, StatusCode::OK);
        assert_eq!(spec.body, BodyDisposition::FileNoBody);
        // HEAD carries the same headers a GET 200 would
        assert_eq!(spec.headers.get(header::CONTENT_LENGTH).unwrap(), "100");
    }
}
