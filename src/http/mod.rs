//! HTTP protocol layer module
//!
//! Protocol-level pieces of the decision engine, decoupled from the
//! resolution flow: date handling, range parsing, conditional evaluation,
//! header extraction, and response building.

pub mod conditional;
pub mod date;
pub mod headers;
pub mod range;
pub mod response;

// Re-export commonly used types
pub use conditional::ConditionalOutcome;
pub use headers::ConditionalHeaders;
pub use range::{parse_range, RangeSpec};
pub use response::{render, BodyDisposition, ResponseSpec};
