//! Diagnostics logging module
//!
//! Free functions writing tagged lines to the standard streams. The engine
//! only logs anomalies; access logging belongs to the surrounding server.

use hyper::Method;

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}

/// Warn about a request method the engine refuses outright.
pub fn log_rejected_method(method: &Method) {
    log_warning(&format!("Method not allowed: {method}"));
}
