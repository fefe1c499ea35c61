//! HTTP response specification and building module
//!
//! `ResponseSpec` is the engine's sole output: status, headers, and the
//! shape of the body. Everything except actual file bytes can be rendered
//! here into a hyper response; byte transfer stays with the caller.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{self, HeaderMap, HeaderName, HeaderValue};
use hyper::{Response, StatusCode};

use crate::http::range::RangeSpec;
use crate::logger;

/// Shape of the response body, independent of the status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyDisposition {
    /// Status line and headers only
    NoBody,
    /// A short generated page describing the status
    StatusPage,
    /// Headers describe a file but no bytes follow (HEAD, 304, 412, 416)
    FileNoBody,
    /// The caller streams the named file slice
    File { path: String, range: RangeSpec },
}

/// Complete response decision for one request
#[derive(Debug, Clone)]
pub struct ResponseSpec {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: BodyDisposition,
}

impl ResponseSpec {
    /// A generated-page response with no file behind it (404, 405, 301)
    pub fn status_page(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: BodyDisposition::StatusPage,
        }
    }

    /// Attach one header, dropping it with a warning if unencodable
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: &str) -> Self {
        insert_header(&mut self.headers, name, value);
        self
    }

    /// HEAD normalization: same status and headers, no body of any kind
    #[must_use]
    pub fn without_body(mut self) -> Self {
        self.body = match self.body {
            BodyDisposition::File { .. } => BodyDisposition::FileNoBody,
            BodyDisposition::StatusPage => BodyDisposition::NoBody,
            other => other,
        };
        self
    }
}

/// Insert a header computed from request data, logging instead of
/// panicking when the value cannot be encoded
pub fn insert_header(headers: &mut HeaderMap, name: HeaderName, value: &str) {
    match HeaderValue::from_str(value) {
        Ok(parsed) => {
            headers.insert(name, parsed);
        }
        Err(_) => logger::log_warning(&format!("Dropping unencodable {name} header: {value}")),
    }
}

/// Render every disposition except `File`, whose bytes are the caller's job
///
/// Status pages get a plain-text body (empty for HEAD) with matching
/// `Content-Type` and `Content-Length`; headers-only dispositions get an
/// empty body and the spec's headers verbatim.
pub fn render(spec: &ResponseSpec, is_head: bool) -> Option<Response<Full<Bytes>>> {
    match spec.body {
        BodyDisposition::File { .. } => None,
        BodyDisposition::NoBody | BodyDisposition::FileNoBody => {
            Some(build_response(spec, None, Bytes::new()))
        }
        BodyDisposition::StatusPage => {
            let page = status_page_text(spec.status);
            let body = if is_head {
                Bytes::new()
            } else {
                Bytes::from(page.clone())
            };
            Some(build_response(spec, Some(page.len()), body))
        }
    }
}

/// Generated status-page text, e.g. `404 Not Found`
fn status_page_text(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {reason}", status.as_u16()),
        None => status.as_u16().to_string(),
    }
}

fn build_response(spec: &ResponseSpec, page_len: Option<usize>, body: Bytes) -> Response<Full<Bytes>> {
    let mut builder = Response::builder().status(spec.status);

    if let Some(headers) = builder.headers_mut() {
        headers.extend(spec.headers.clone());
        if let Some(len) = page_len {
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            );
            headers.insert(header::CONTENT_LENGTH, HeaderValue::from(len));
        }
    }

    builder.body(Full::new(body)).unwrap_or_else(|e| {
        logger::log_error(&format!("Failed to build {} response: {e}", spec.status));
        Response::new(Full::new(Bytes::new()))
    })
}
