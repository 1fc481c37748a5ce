//! Event discovery proxy and saved-event endpoints.

use super::{app_service, json_error};
use crate::{
    models::{
        ErrorResponse, EventListQuery, EventSearchQuery, NewEventRequest,
        SaveUpstreamEventRequest,
    },
    services::{EventDiscoveryService, EventServiceError, EventStore, StoreError, extract_event},
    utils::{is_valid_country_code, parse_iso_date},
};
use actix_web::{Error, HttpRequest, HttpResponse, Result, web};
use paperclip::actix::api_v2_operation;
use serde_json::json;
use tracing::{error, info};

/// Run a blocking store call on the worker pool
async fn with_store<F, R>(store: web::Data<EventStore>, f: F) -> Result<R, StoreError>
where
    F: FnOnce(&EventStore) -> Result<R, StoreError> + Send + 'static,
    R: Send + 'static,
{
    web::block(move || f(store.get_ref()))
        .await
        .map_err(|_| StoreError::WorkerUnavailable)?
}

fn store_error_response(e: &StoreError) -> HttpResponse {
    match e {
        StoreError::Validation(message) => json_error(400, ErrorResponse::new(message.clone())),
        _ => {
            error!(error = %e, "Event database error");
            json_error(500, ErrorResponse::new(e.user_message()))
        }
    }
}

fn discovery_error_response(e: &EventServiceError) -> HttpResponse {
    error!(error = %e, "Event discovery request failed");
    json_error(500, ErrorResponse::new(e.user_message()))
}

#[api_v2_operation(
    summary = "List Upstream Events",
    description = "Lists events from the event discovery API for a country, optionally filtered by keyword. The upstream JSON is returned unchanged.",
    tags("Events"),
    responses(
        (status = 200, description = "Upstream event listing"),
        (status = 400, description = "Invalid countryCode"),
        (status = 500, description = "Event discovery API failed or is not configured")
    )
)]
pub async fn list_events(
    req: HttpRequest,
    query: web::Query<EventListQuery>,
) -> Result<HttpResponse, Error> {
    let mut query = query.into_inner();
    query.country_code = query.country_code.trim().to_ascii_uppercase();
    if !is_valid_country_code(&query.country_code) {
        return Ok(json_error(
            400,
            ErrorResponse::new("countryCode must be a two-letter country code"),
        ));
    }

    let service = app_service::<EventDiscoveryService>(&req)?;
    match service.list_events(&query).await {
        Ok(body) => Ok(HttpResponse::Ok().json(body)),
        Err(e) => Ok(discovery_error_response(&e)),
    }
}

#[api_v2_operation(
    summary = "Search Upstream Events",
    description = "Searches the event discovery API by name, city, country or day (YYYY-MM-DD). Returns `{count, events}`, or `{message}` when nothing matched.",
    tags("Events"),
    responses(
        (status = 200, description = "Matching events or a not-found message"),
        (status = 400, description = "Invalid date or countryCode"),
        (status = 500, description = "Event discovery API failed or is not configured")
    )
)]
pub async fn search_events(
    req: HttpRequest,
    query: web::Query<EventSearchQuery>,
) -> Result<HttpResponse, Error> {
    let mut query = query.into_inner();
    query.country_code = query
        .country_code
        .map(|code| code.trim().to_ascii_uppercase());
    if let Some(date) = query.date.as_deref().filter(|d| !d.is_empty()) {
        if parse_iso_date(date).is_none() {
            return Ok(json_error(
                400,
                ErrorResponse::new("date must be formatted as YYYY-MM-DD"),
            ));
        }
    }
    if let Some(code) = query.country_code.as_deref().filter(|c| !c.is_empty()) {
        if !is_valid_country_code(code) {
            return Ok(json_error(
                400,
                ErrorResponse::new("countryCode must be a two-letter country code"),
            ));
        }
    }

    let service = app_service::<EventDiscoveryService>(&req)?;
    match service.search_events(&query).await {
        Ok(body) => Ok(HttpResponse::Ok().json(body)),
        Err(e) => Ok(discovery_error_response(&e)),
    }
}

#[api_v2_operation(
    summary = "Save Event",
    description = "Stores an event in the local database. `event_id` and `name` are required.",
    tags("Database"),
    responses(
        (status = 200, description = "Event saved"),
        (status = 400, description = "event_id or name missing"),
        (status = 500, description = "Database error")
    )
)]
pub async fn create_event(
    req: HttpRequest,
    body: web::Json<NewEventRequest>,
) -> Result<HttpResponse, Error> {
    let event = match body.into_inner().into_new_event() {
        Ok(event) => event,
        Err(message) => return Ok(json_error(400, ErrorResponse::new(message))),
    };

    let store = app_service::<EventStore>(&req)?;
    match with_store(store, move |store| store.insert(&event)).await {
        Ok(id) => Ok(HttpResponse::Ok().json(json!({
            "message": "Event saved",
            "id": id,
        }))),
        Err(e) => Ok(store_error_response(&e)),
    }
}

#[api_v2_operation(
    summary = "List Saved Events",
    description = "Returns every stored event, newest first.",
    tags("Database"),
    responses(
        (status = 200, description = "Saved events as `{count, events}`"),
        (status = 500, description = "Database error")
    )
)]
pub async fn list_saved_events(req: HttpRequest) -> Result<HttpResponse, Error> {
    let store = app_service::<EventStore>(&req)?;
    match with_store(store, |store| store.list()).await {
        Ok(events) => Ok(HttpResponse::Ok().json(json!({
            "count": events.len(),
            "events": events,
        }))),
        Err(e) => Ok(store_error_response(&e)),
    }
}

#[api_v2_operation(
    summary = "Save Upstream Event",
    description = "Fetches an event from the event discovery API by id and stores its name, local start date and first venue.",
    tags("Database"),
    responses(
        (status = 200, description = "Event fetched and saved"),
        (status = 400, description = "id missing or event not found"),
        (status = 500, description = "Event discovery API or database failed")
    )
)]
pub async fn save_upstream_event(
    req: HttpRequest,
    body: web::Json<SaveUpstreamEventRequest>,
) -> Result<HttpResponse, Error> {
    let Some(id) = body
        .into_inner()
        .id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
    else {
        return Ok(json_error(
            400,
            ErrorResponse::new("An upstream event id (id) is required"),
        ));
    };

    let service = app_service::<EventDiscoveryService>(&req)?;
    let upstream = match service.get_event(&id).await {
        Ok(upstream) => upstream,
        Err(EventServiceError::NotFound(_)) => {
            return Ok(json_error(400, ErrorResponse::new("Event not found")));
        }
        Err(e) => {
            error!(event_id = %id, error = %e, "Failed to fetch upstream event");
            return Ok(json_error(
                500,
                ErrorResponse::new("Failed to fetch or save the upstream event")
                    .with_details(json!(e.user_message())),
            ));
        }
    };

    let Some(event) = extract_event(&id, &upstream) else {
        return Ok(json_error(400, ErrorResponse::new("Event not found")));
    };

    let store = app_service::<EventStore>(&req)?;
    let saved = event.clone();
    match with_store(store, move |store| store.insert(&event)).await {
        Ok(row_id) => {
            info!(event_id = %saved.event_id, row_id, "Saved upstream event");
            Ok(HttpResponse::Ok().json(json!({
                "message": "Upstream event saved",
                "id": row_id,
                "saved": saved,
            })))
        }
        Err(e) => Ok(store_error_response(&e)),
    }
}
