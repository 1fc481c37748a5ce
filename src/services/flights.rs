//! Flight search through the SerpApi Google Flights engine.

use crate::config::SerpApiConfig;
use crate::models::{FlightOffer, FlightRoute};
use crate::services::upstream_client::{UpstreamClient, UpstreamError};
use serde_json::Value;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum FlightSearchError {
    #[error("Flight search API key is not configured")]
    MissingApiKey,

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("{0}")]
    UpstreamFailed(String),

    #[error("No flights found for this route.")]
    NoFlights,

    #[error("Flight found but data incomplete (no price/token).")]
    IncompleteOffer,
}

impl FlightSearchError {
    pub fn user_message(&self) -> String {
        match self {
            FlightSearchError::MissingApiKey => {
                "Flight search is not configured (SERPAPI_API_KEY missing)".to_string()
            }
            FlightSearchError::Upstream(e) => e.user_message(),
            other => other.to_string(),
        }
    }

    /// Whether the route simply has no usable offer, as opposed to a failure
    pub fn is_no_result(&self) -> bool {
        matches!(
            self,
            FlightSearchError::NoFlights | FlightSearchError::IncompleteOffer
        )
    }
}

pub struct FlightSearchService {
    client: UpstreamClient,
    api_key: String,
    base_url: String,
}

impl FlightSearchService {
    pub fn new(config: &SerpApiConfig, client: UpstreamClient) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
        }
    }

    /// Best offer for a round trip
    pub async fn search(&self, route: &FlightRoute) -> Result<FlightOffer, FlightSearchError> {
        if self.api_key.trim().is_empty() {
            return Err(FlightSearchError::MissingApiKey);
        }

        info!(
            departure = %route.departure_id,
            arrival = %route.arrival_id,
            outbound_date = %route.outbound_date,
            "Searching flights"
        );

        let params = [
            ("engine", "google_flights".to_string()),
            ("api_key", self.api_key.clone()),
            ("departure_id", route.departure_id.clone()),
            ("arrival_id", route.arrival_id.clone()),
            ("outbound_date", route.outbound_date.clone()),
            ("return_date", route.return_date.clone()),
            ("hl", "en".to_string()),
            ("currency", "USD".to_string()),
        ];

        let body = self.client.get_json(&self.base_url, &params).await?;
        let offer = parse_flight_response(&body);
        match &offer {
            Ok(offer) => info!(flight_id = %offer.flight_id, price = %offer.price, "Flight found"),
            Err(e) => warn!(error = %e, "Flight search returned no offer"),
        }
        offer
    }
}

/// Pick the first of `best_flights` from a search response
pub fn parse_flight_response(body: &Value) -> Result<FlightOffer, FlightSearchError> {
    let status = body.pointer("/search_metadata/status").and_then(Value::as_str);
    if status != Some("Success") {
        let message = body
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("Unknown SerpApi error");
        return Err(FlightSearchError::UpstreamFailed(message.to_string()));
    }

    let first = body
        .get("best_flights")
        .and_then(Value::as_array)
        .and_then(|flights| flights.first())
        .ok_or(FlightSearchError::NoFlights)?;

    let price = first.get("price").filter(|p| !p.is_null());
    let token = first.get("departure_token").and_then(Value::as_str);
    let (Some(price), Some(token)) = (price, token) else {
        return Err(FlightSearchError::IncompleteOffer);
    };

    let segments = first
        .get("flights")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    let flight_number = segments
        .first()
        .and_then(|segment| segment.get("flight_number"))
        .and_then(Value::as_str)
        .unwrap_or("UNKNOWN");

    Ok(FlightOffer {
        flight_id: format!("Flight-{flight_number}"),
        price: price.clone(),
        booking_token: token.to_string(),
        segments,
    })
}
