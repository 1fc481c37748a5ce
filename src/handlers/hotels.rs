//! Hotel availability search endpoint.

use super::{app_service, json_error};
use crate::{
    config::MetricsConfig,
    middleware::RequestId,
    models::{AttemptRecord, ErrorResponse, HotelSearchQuery},
    services::{AppMetrics, HotelSearchService},
};
use actix_web::{Error, HttpMessage, HttpRequest, HttpResponse, Result, web};
use paperclip::actix::api_v2_operation;
use tracing::{info, warn};

/// Search hotel availability.
///
/// The gateway sweeps the known request-signature formats until the hotel
/// API accepts one. Every attempt is listed in the response so operators can
/// pin the working format with `HOTELBEDS_SIGNATURE_FORMAT`.
#[api_v2_operation(
    summary = "Hotel Availability Search",
    description = "Searches hotel availability for a destination and stay. Tries each supported signature format in order until the hotel API accepts one; `format` restricts the search to a single format. The response reports the accepted format and every attempt made.",
    tags("Hotels"),
    responses(
        (status = 200, description = "Hotels found; includes the accepted signature format and attempt trail"),
        (status = 400, description = "Missing or invalid destination, checkIn or checkOut"),
        (status = 401, description = "The hotel API rejected every signature format"),
        (status = 500, description = "Credentials missing, unknown format, or the hotel API failed")
    )
)]
pub async fn search_hotels(
    req: HttpRequest,
    query: web::Query<HotelSearchQuery>,
) -> Result<HttpResponse, Error> {
    let criteria = match query.into_inner().into_criteria() {
        Ok(criteria) => criteria,
        Err(message) => return Ok(json_error(400, ErrorResponse::new(message))),
    };

    let service = app_service::<HotelSearchService>(&req)?;
    let request_id = req
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_default();

    let result = service.search(&criteria).await;

    let attempts = match &result {
        Ok(response) => response.attempts.as_slice(),
        Err(e) => e.attempts(),
    };
    record_attempts(&req, attempts);

    match result {
        Ok(response) => {
            info!(
                request_id = %request_id,
                destination = %criteria.destination,
                used_format = %response.used_format,
                attempts = response.attempts.len(),
                count = response.count,
                "Hotel search succeeded"
            );
            Ok(HttpResponse::Ok().json(response))
        }
        Err(e) => {
            warn!(
                request_id = %request_id,
                destination = %criteria.destination,
                attempts = e.attempts().len(),
                error = %e,
                "Hotel search failed"
            );
            Ok(json_error(
                e.http_status(),
                ErrorResponse::new(e.user_message()).with_details(e.details()),
            ))
        }
    }
}

fn record_attempts(req: &HttpRequest, attempts: &[AttemptRecord]) {
    let tracking = req
        .app_data::<web::Data<MetricsConfig>>()
        .map(|config| config.enabled && config.track_signature_attempts)
        .unwrap_or(true);
    if !tracking {
        return;
    }
    if let Some(metrics) = req.app_data::<web::Data<AppMetrics>>() {
        metrics.record_signature_attempts(attempts);
    }
}
