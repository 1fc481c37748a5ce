//! Business logic and service layer modules.
//!
//! The hotel search path (signature strategies, resolver, signed transport)
//! plus the event discovery, event storage and flight search services and
//! the shared metrics collector.

pub mod event_store;
pub mod events;
pub mod flights;
pub mod hotels;
pub mod metrics;
pub mod resolver;
pub mod signature;
pub mod transport;
pub mod upstream_client;

pub use event_store::*;
pub use events::*;
pub use flights::*;
pub use hotels::*;
pub use metrics::*;
pub use resolver::*;
pub use signature::*;
pub use transport::*;
pub use upstream_client::*;
