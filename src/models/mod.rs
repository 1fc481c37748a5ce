//! Data models for the travel gateway.
//!
//! Request/query models derive `Apiv2Schema` so they show up in the
//! generated OpenAPI document; response bodies that embed raw upstream JSON
//! are plain serde types.

pub mod api;
pub mod events;
pub mod flights;
pub mod hotels;

pub use api::*;
pub use events::*;
pub use flights::*;
pub use hotels::*;
