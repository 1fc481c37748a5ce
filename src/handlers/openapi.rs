//! OpenAPI specification generation and app factory.

use crate::{
    handlers::{
        create_event, get_metrics, health, list_events, list_saved_events, save_upstream_event,
        search_events, search_flights, search_hotels, version,
    },
    middleware::{MetricsMiddleware, RequestIdMiddleware},
    state::AppState,
};
use actix_web::App;
use paperclip::actix::{OpenApiExt, web};
use paperclip::v2::models::{DefaultApiRaw, Info};

/// Creates the shared OpenAPI specification for the gateway
pub fn create_openapi_spec() -> DefaultApiRaw {
    DefaultApiRaw {
        info: Info {
            title: "Travel Gateway".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            description: Some(
                "Gateway for event discovery, saved events, hotel availability and flight search.\n\n\
                ## Hotel request signing\n\
                The hotel API authenticates every request with an `Api-key` header and an \
                `X-Signature` header derived from the API key, the shared secret and a Unix \
                timestamp. Several signature formats are in circulation, so `/hotels` tries \
                them in a fixed order and keeps the first one the hotel API accepts:\n\
                \n\
                1. `hmac:apiKey+timestamp`\n\
                2. `hmac:timestamp+apiKey`\n\
                3. `hmac:apiKey+secret+timestamp`\n\
                4. `sha256:secret+apiKey+timestamp`\n\
                5. `sha256:apiKey+secret+timestamp`\n\
                6. `sha256:secret+timestamp+apiKey`\n\
                \n\
                Only a 401 moves on to the next format; any other failure ends the search. \
                Successful responses report `usedFormat`; pin it with \
                `HOTELBEDS_SIGNATURE_FORMAT` or the `format` query parameter to skip the sweep.\n\
                \n\
                ## Errors\n\
                Failures are returned as `{error, details}`."
                    .into(),
            ),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Creates the gateway application around shared state.
///
/// Used by `main` for every worker and by the integration tests.
pub fn create_app(
    state: AppState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(RequestIdMiddleware)
        .wrap(MetricsMiddleware)
        .wrap_api_with_spec(create_openapi_spec())
        .app_data(state.hotels)
        .app_data(state.events)
        .app_data(state.flights)
        .app_data(state.store)
        .app_data(state.metrics)
        .app_data(state.metrics_config)
        .service(web::resource("/api/health").route(web::get().to(health)))
        .service(web::resource("/api/version").route(web::get().to(version)))
        .service(web::resource("/api/metrics").route(web::get().to(get_metrics)))
        .service(
            web::resource("/events")
                .route(web::get().to(list_events))
                .route(web::post().to(create_event)),
        )
        .service(web::resource("/events/db").route(web::get().to(list_saved_events)))
        .service(
            web::resource("/events/save-ticketmaster").route(web::post().to(save_upstream_event)),
        )
        .service(web::resource("/search-event").route(web::get().to(search_events)))
        .service(web::resource("/hotels").route(web::get().to(search_hotels)))
        .service(web::resource("/flights").route(web::get().to(search_flights)))
        .with_json_spec_at("/api/spec/v2")
        .build()
}
