//! Hotel search service built on the signature resolver.

use crate::config::HotelbedsConfig;
use crate::models::{HotelSearchCriteria, HotelSearchResponse};
use crate::services::resolver::{ResolveError, SignatureResolver};
use crate::services::transport::{HotelTransport, ReqwestTransport};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

/// Searches hotel availability through the signed upstream API
pub struct HotelSearchService {
    resolver: SignatureResolver,
}

impl HotelSearchService {
    /// Create a service using the given transport
    pub fn new(config: &HotelbedsConfig, transport: Arc<dyn HotelTransport>) -> Self {
        Self {
            resolver: SignatureResolver::new(config, transport),
        }
    }

    /// Create a service that talks to `config.url` over HTTP
    pub fn from_config(config: &HotelbedsConfig) -> Result<Self, reqwest::Error> {
        let transport = ReqwestTransport::new(
            config.url.clone(),
            Duration::from_secs(config.connect_timeout_seconds),
        )?;
        Ok(Self::new(config, Arc::new(transport)))
    }

    /// Run an availability search, sweeping signature formats as needed
    pub async fn search(
        &self,
        criteria: &HotelSearchCriteria,
    ) -> Result<HotelSearchResponse, ResolveError> {
        let payload = build_availability_payload(criteria);
        let resolution = self
            .resolver
            .resolve(&payload, criteria.forced_format.as_deref())
            .await?;

        let hotels = extract_hotels(&resolution.body);
        Ok(HotelSearchResponse {
            used_format: resolution.used_strategy.name().to_string(),
            count: hotels.len(),
            hotels,
            attempts: resolution.attempts,
        })
    }
}

/// Availability request body for one room configuration
pub fn build_availability_payload(criteria: &HotelSearchCriteria) -> Value {
    json!({
        "stay": {
            "checkIn": criteria.check_in.format("%Y-%m-%d").to_string(),
            "checkOut": criteria.check_out.format("%Y-%m-%d").to_string(),
        },
        "occupancies": [{
            "rooms": criteria.rooms,
            "adults": criteria.adults,
            "children": criteria.children,
        }],
        "destination": {
            "code": criteria.destination,
        },
    })
}

/// Hotels from an availability response.
///
/// The upstream nests the list as `hotels.hotels`; a bare `hotels` array is
/// accepted too. Anything else yields an empty list.
pub fn extract_hotels(body: &Value) -> Vec<Value> {
    match body.get("hotels") {
        Some(Value::Array(hotels)) => hotels.clone(),
        Some(nested) => nested
            .get("hotels")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default(),
        None => Vec::new(),
    }
}
