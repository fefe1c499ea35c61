//! statik - decision engine for static-resource HTTP requests
//!
//! Given a request's conditional and range headers plus a resolved
//! resource's metadata (size, modification time), the engine decides the
//! exact status, headers, and body disposition to return. It performs no
//! byte transfer itself: transport, file reads, and MIME inference belong
//! to the surrounding server, which talks to this crate through
//! [`RequestContext`], [`MetadataProvider`], and [`ResponseSpec`].

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod metadata;

// Re-export the request-facing surface
pub use config::{Config, ResourcesConfig};
pub use handler::{decide, RequestContext};
pub use http::response::{render, BodyDisposition, ResponseSpec};
pub use metadata::{FsMetadataProvider, MetadataProvider, ResourceMetadata};
