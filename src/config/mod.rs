//! Configuration structures and loading utilities.
//!
//! Every concern has its own config struct with a `Default` impl and a
//! `from_env()` constructor that falls back to those defaults.

pub mod hotelbeds;
pub mod metrics;
pub mod providers;
pub mod server;
pub mod upstream;

pub use hotelbeds::*;
pub use metrics::*;
pub use providers::*;
pub use server::*;
