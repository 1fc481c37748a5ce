//! HTTP request handlers for API endpoints.
//!
//! Services are looked up from app data per request; a missing service
//! answers 503 so partially configured apps (tests) still route.

pub mod events;
pub mod flights;
pub mod health;
pub mod hotels;
pub mod metrics;
pub mod openapi;
pub mod version;

pub use events::*;
pub use flights::*;
pub use health::*;
pub use hotels::*;
pub use metrics::*;
pub use openapi::*;
pub use version::*;

use crate::models::ErrorResponse;
use actix_web::{Error, HttpRequest, HttpResponse, http::StatusCode, web};

/// Shared service registered with `App::app_data`
pub(crate) fn app_service<T: 'static>(req: &HttpRequest) -> Result<web::Data<T>, Error> {
    req.app_data::<web::Data<T>>()
        .cloned()
        .ok_or_else(|| actix_web::error::ErrorServiceUnavailable("Service not available"))
}

pub(crate) fn json_error(status: u16, body: ErrorResponse) -> HttpResponse {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status).json(body)
}
