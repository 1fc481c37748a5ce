mod common;

use actix_web::{http::StatusCode, test};
use common::{ScriptedTransport, hotel_config, hotels_found, status, unauthorized};
use serde_json::{Value, json};
use std::sync::Arc;
use travel_gateway::{
    AppMetrics, AppState, EventDiscoveryService, EventStore, FlightSearchService,
    HotelSearchService, HotelbedsConfig, MetricsConfig, RetryConfig, SerpApiConfig, SignatureStrategy,
    TicketmasterConfig, UpstreamClient, UpstreamClientConfig, create_app,
};

/// App state around a scripted hotel API, an in-memory store, and
/// unconfigured event and flight providers
fn state_with(config: &HotelbedsConfig, transport: Arc<ScriptedTransport>) -> AppState {
    let metrics = AppMetrics::new().unwrap();
    let upstream = UpstreamClient::new(UpstreamClientConfig::default(), Some(metrics.clone()))
        .unwrap();

    AppState::new(
        HotelSearchService::new(config, transport),
        EventDiscoveryService::new(&TicketmasterConfig::default(), upstream.clone()),
        FlightSearchService::new(&SerpApiConfig::default(), upstream),
        EventStore::in_memory().unwrap(),
        metrics,
        MetricsConfig::default(),
    )
}

fn default_state() -> AppState {
    state_with(&hotel_config(), Arc::new(ScriptedTransport::new(vec![])))
}

const HOTEL_QUERY: &str = "/hotels?destination=PMI&checkIn=2025-06-01&checkOut=2025-06-05&adults=2";

async fn body_json(resp: actix_web::dev::ServiceResponse) -> Value {
    let body = test::read_body(resp).await;
    serde_json::from_slice(&body).expect("response body is JSON")
}

#[actix_web::test]
async fn test_health_endpoint() {
    let app = test::init_service(create_app(default_state())).await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({"status": "healthy"}));
}

#[actix_web::test]
async fn test_version_endpoint() {
    let app = test::init_service(create_app(default_state())).await;

    let req = test::TestRequest::get().uri("/api/version").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert!(json["commit"].is_string());
    assert!(json["build_time"].is_string());
}

#[actix_web::test]
async fn test_request_id_is_generated_or_echoed() {
    let app = test::init_service(create_app(default_state())).await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    let generated = resp.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert!(uuid::Uuid::parse_str(generated).is_ok());

    let req = test::TestRequest::get()
        .uri("/api/health")
        .insert_header(("X-Request-ID", "trace-123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "trace-123");
}

#[actix_web::test]
async fn test_openapi_spec_lists_routes() {
    let app = test::init_service(create_app(default_state())).await;

    let req = test::TestRequest::get().uri("/api/spec/v2").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let spec = body_json(resp).await;
    for path in ["/hotels", "/events", "/events/db", "/search-event", "/flights"] {
        assert!(spec["paths"].get(path).is_some(), "missing {path} in spec");
    }
}

#[actix_web::test]
async fn test_hotels_missing_parameters() {
    let app = test::init_service(create_app(default_state())).await;

    let req = test::TestRequest::get()
        .uri("/hotels?destination=PMI&checkIn=2025-06-01")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(resp).await["error"].as_str().unwrap().contains("checkOut"));
}

#[actix_web::test]
async fn test_hotels_rejects_checkout_before_checkin() {
    let transport = Arc::new(ScriptedTransport::new(vec![Ok(hotels_found())]));
    let app = test::init_service(create_app(state_with(&hotel_config(), transport.clone()))).await;

    let req = test::TestRequest::get()
        .uri("/hotels?destination=PMI&checkIn=2025-06-05&checkOut=2025-06-01")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(transport.call_count(), 0);
}

#[actix_web::test]
async fn test_hotels_success_after_rejected_format() {
    let transport = Arc::new(ScriptedTransport::new(vec![
        Ok(unauthorized()),
        Ok(hotels_found()),
    ]));
    let app = test::init_service(create_app(state_with(&hotel_config(), transport.clone()))).await;

    let req = test::TestRequest::get().uri(HOTEL_QUERY).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["usedFormat"], SignatureStrategy::ALL[1].name());
    assert_eq!(json["count"], 2);
    assert_eq!(json["hotels"][0]["name"], "Hotel Palma");
    assert_eq!(json["attempts"].as_array().unwrap().len(), 2);
    assert_eq!(json["attempts"][0]["outcome"], "auth_rejected");
    assert_eq!(transport.call_count(), 2);
}

#[actix_web::test]
async fn test_hotels_all_formats_rejected() {
    let transport = Arc::new(ScriptedTransport::always_unauthorized());
    let app = test::init_service(create_app(state_with(&hotel_config(), transport.clone()))).await;

    let req = test::TestRequest::get().uri(HOTEL_QUERY).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(resp).await;
    assert!(json["error"].is_string());
    assert_eq!(json["details"]["attempts"].as_array().unwrap().len(), 6);
    assert_eq!(transport.call_count(), 6);
}

#[actix_web::test]
async fn test_hotels_upstream_failure_is_not_retried() {
    let transport = Arc::new(ScriptedTransport::new(vec![Ok(status(500))]));
    let app = test::init_service(create_app(state_with(&hotel_config(), transport.clone()))).await;

    let req = test::TestRequest::get().uri(HOTEL_QUERY).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(resp).await;
    assert_eq!(json["details"]["upstreamStatus"], 500);
    assert_eq!(json["details"]["attempts"].as_array().unwrap().len(), 1);
    assert_eq!(transport.call_count(), 1);
}

#[actix_web::test]
async fn test_hotels_missing_credentials() {
    let transport = Arc::new(ScriptedTransport::new(vec![Ok(hotels_found())]));
    let app = test::init_service(create_app(state_with(
        &HotelbedsConfig::default(),
        transport.clone(),
    )))
    .await;

    let req = test::TestRequest::get().uri(HOTEL_QUERY).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(resp).await;
    assert!(json["error"].as_str().unwrap().contains("missing"));
    assert_eq!(
        json["details"]["required"],
        json!(["HOTELBEDS_API_KEY", "HOTELBEDS_API_SECRET"])
    );
    assert_eq!(transport.call_count(), 0);
}

#[actix_web::test]
async fn test_hotels_format_parameter() {
    let transport = Arc::new(ScriptedTransport::new(vec![Ok(hotels_found())]));
    let app = test::init_service(create_app(state_with(&hotel_config(), transport.clone()))).await;

    let req = test::TestRequest::get()
        .uri(&format!("{HOTEL_QUERY}&format=sha256:apiKey%2Bsecret%2Btimestamp"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await["usedFormat"],
        "sha256:apiKey+secret+timestamp"
    );

    let req = test::TestRequest::get()
        .uri(&format!("{HOTEL_QUERY}&format=md5"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(resp).await["details"]["availableFormats"]
            .as_array()
            .unwrap()
            .len(),
        6
    );
    assert_eq!(transport.call_count(), 1);
}

#[actix_web::test]
async fn test_metrics_include_signature_attempts() {
    let transport = Arc::new(ScriptedTransport::new(vec![
        Ok(unauthorized()),
        Ok(hotels_found()),
    ]));
    let app = test::init_service(create_app(state_with(&hotel_config(), transport))).await;

    let req = test::TestRequest::get().uri(HOTEL_QUERY).to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/api/metrics").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let text = std::str::from_utf8(&body).unwrap();
    assert!(text.contains("hotel_signature_attempts_total"));
    assert!(text.contains("outcome=\"auth_rejected\""));
    assert!(text.contains("http_requests_total"));
    assert!(text.contains("route=\"/hotels\""));
}

#[actix_web::test]
async fn test_save_and_list_events() {
    let app = test::init_service(create_app(default_state())).await;

    for (event_id, name) in [("G5v1", "Open Air"), ("G5v2", "Jazz Night")] {
        let req = test::TestRequest::post()
            .uri("/events")
            .set_json(json!({"event_id": event_id, "name": name, "date": "2025-07-12"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let req = test::TestRequest::get().uri("/events/db").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["count"], 2);
    assert_eq!(json["events"][0]["name"], "Jazz Night");
    assert_eq!(json["events"][1]["event_id"], "G5v1");
    assert_eq!(json["events"][1]["date"], "2025-07-12");
}

#[actix_web::test]
async fn test_save_event_requires_id_and_name() {
    let app = test::init_service(create_app(default_state())).await;

    let req = test::TestRequest::post()
        .uri("/events")
        .set_json(json!({"event_id": "G5v1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(resp).await["error"].as_str().unwrap().contains("name"));
}

#[actix_web::test]
async fn test_save_upstream_event_requires_id() {
    let app = test::init_service(create_app(default_state())).await;

    let req = test::TestRequest::post()
        .uri("/events/save-ticketmaster")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_event_discovery_without_api_key() {
    let app = test::init_service(create_app(default_state())).await;

    let req = test::TestRequest::get().uri("/events?keyword=rock").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_json(resp).await["error"].as_str().unwrap().contains("TM_API_KEY"));
}

#[actix_web::test]
async fn test_event_search_validation() {
    let app = test::init_service(create_app(default_state())).await;

    for uri in ["/search-event?date=2025-13-45", "/search-event?countryCode=germany"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
    }

    let req = test::TestRequest::get().uri("/events?countryCode=DEU").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_lowercase_country_code_is_accepted() {
    let app = test::init_service(create_app(default_state())).await;

    // Passes validation and reaches the unconfigured provider
    for uri in ["/events?countryCode=de", "/search-event?countryCode=de"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        assert!(body_json(resp).await["error"].as_str().unwrap().contains("TM_API_KEY"));
    }
}

#[actix_web::test]
async fn test_unreachable_event_provider_does_not_leak_api_key() {
    let metrics = AppMetrics::new().unwrap();
    let client_config = UpstreamClientConfig {
        timeout_seconds: 2,
        connect_timeout_seconds: 1,
        retry: RetryConfig {
            max_retries: 0,
            ..Default::default()
        },
        enable_detailed_logging: true,
    };
    let upstream = UpstreamClient::new(client_config, Some(metrics.clone())).unwrap();
    let ticketmaster = TicketmasterConfig {
        api_key: "SENTINEL-KEY-123".to_string(),
        base_url: "http://127.0.0.1:9/discovery/v2".to_string(),
    };
    let state = AppState::new(
        HotelSearchService::new(&hotel_config(), Arc::new(ScriptedTransport::new(vec![]))),
        EventDiscoveryService::new(&ticketmaster, upstream.clone()),
        FlightSearchService::new(&SerpApiConfig::default(), upstream),
        EventStore::in_memory().unwrap(),
        metrics,
        MetricsConfig::default(),
    );
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::post()
        .uri("/events/save-ticketmaster")
        .set_json(json!({"id": "abc"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = test::read_body(resp).await;
    let text = String::from_utf8_lossy(&body);
    assert!(!text.contains("SENTINEL-KEY-123"), "{text}");
    assert!(!text.contains("apikey"), "{text}");
}

#[actix_web::test]
async fn test_flight_search_validation() {
    let app = test::init_service(create_app(default_state())).await;

    let req = test::TestRequest::get()
        .uri("/flights?departure_id=FRA&arrival_id=AUS&outbound_date=2025-10-01")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/flights?departure_id=FRA&arrival_id=AUS&outbound_date=2025-10-01&return_date=2025-10-08")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_json(resp).await["error"].as_str().unwrap().contains("SERPAPI_API_KEY"));
}
