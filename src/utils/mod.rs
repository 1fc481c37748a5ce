//! Utility functions and helper modules.
//!
//! Client IP extraction, metric route labels, log redaction and
//! query-parameter validation.

pub mod http;
pub mod redact;
pub mod route;
pub mod validation;

pub use http::*;
pub use redact::*;
pub use route::*;
pub use validation::*;
