//! Flight search endpoint.

use super::{app_service, json_error};
use crate::{
    models::{ErrorResponse, FlightSearchQuery},
    services::{FlightSearchError, FlightSearchService},
};
use actix_web::{Error, HttpRequest, HttpResponse, Result, web};
use paperclip::actix::api_v2_operation;
use serde_json::json;
use tracing::error;

#[api_v2_operation(
    summary = "Flight Search",
    description = "Finds the best round-trip offer between two airports (IATA codes) for the given dates (YYYY-MM-DD).",
    tags("Flights"),
    responses(
        (status = 200, description = "Best offer with price, booking token and segments"),
        (status = 400, description = "Missing or malformed parameters"),
        (status = 404, description = "No usable offer for this route"),
        (status = 500, description = "Flight search is not configured"),
        (status = 502, description = "Flight search API failed")
    )
)]
pub async fn search_flights(
    req: HttpRequest,
    query: web::Query<FlightSearchQuery>,
) -> Result<HttpResponse, Error> {
    let route = match query.into_inner().into_route() {
        Ok(route) => route,
        Err(message) => return Ok(json_error(400, ErrorResponse::new(message))),
    };

    let service = app_service::<FlightSearchService>(&req)?;
    match service.search(&route).await {
        Ok(offer) => Ok(HttpResponse::Ok().json(json!({
            "status": "success",
            "data": offer,
        }))),
        Err(e) => {
            let status = match &e {
                FlightSearchError::MissingApiKey => 500,
                e if e.is_no_result() => 404,
                _ => 502,
            };
            if status >= 500 {
                error!(error = %e, "Flight search failed");
            }
            Ok(json_error(status, ErrorResponse::new(e.user_message())))
        }
    }
}
