//! Event discovery against the Ticketmaster Discovery API.

use crate::config::TicketmasterConfig;
use crate::models::{EventListQuery, EventSearchQuery, NewEvent};
use crate::services::upstream_client::{UpstreamClient, UpstreamError};
use serde_json::{Value, json};
use tracing::info;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum EventServiceError {
    #[error("Event discovery API key is not configured")]
    MissingApiKey,

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("Invalid event discovery URL: {0}")]
    InvalidUrl(String),

    #[error("Event {0} not found")]
    NotFound(String),
}

impl EventServiceError {
    pub fn user_message(&self) -> String {
        match self {
            EventServiceError::MissingApiKey => {
                "Event discovery is not configured (TM_API_KEY missing)".to_string()
            }
            EventServiceError::Upstream(e) => e.user_message(),
            EventServiceError::InvalidUrl(_) => "Event discovery is misconfigured".to_string(),
            EventServiceError::NotFound(_) => "Event not found".to_string(),
        }
    }
}

/// Client for listing, searching and fetching upstream events
pub struct EventDiscoveryService {
    client: UpstreamClient,
    api_key: String,
    base_url: String,
}

impl EventDiscoveryService {
    pub fn new(config: &TicketmasterConfig, client: UpstreamClient) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn api_key(&self) -> Result<String, EventServiceError> {
        if self.api_key.trim().is_empty() {
            return Err(EventServiceError::MissingApiKey);
        }
        Ok(self.api_key.clone())
    }

    fn events_url(&self) -> String {
        format!("{}/events.json", self.base_url)
    }

    /// Raw upstream listing for a country
    pub async fn list_events(&self, query: &EventListQuery) -> Result<Value, EventServiceError> {
        let mut params = vec![
            ("apikey", self.api_key()?),
            ("countryCode", query.country_code.clone()),
            ("size", query.size.to_string()),
            ("page", query.page.to_string()),
        ];
        if let Some(keyword) = non_empty(&query.keyword) {
            params.push(("keyword", keyword));
        }

        Ok(self.client.get_json(&self.events_url(), &params).await?)
    }

    /// Search by name, city, country or day.
    ///
    /// Returns `{count, events}`, or `{message}` when nothing matched.
    pub async fn search_events(
        &self,
        query: &EventSearchQuery,
    ) -> Result<Value, EventServiceError> {
        let mut params = vec![("apikey", self.api_key()?), ("size", query.size.to_string())];
        if let Some(name) = non_empty(&query.name) {
            params.push(("keyword", name));
        }
        if let Some(city) = non_empty(&query.city) {
            params.push(("city", city));
        }
        if let Some(country_code) = non_empty(&query.country_code) {
            params.push(("countryCode", country_code));
        }
        if let Some(date) = non_empty(&query.date) {
            params.push(("startDateTime", format!("{date}T00:00:00Z")));
            params.push(("endDateTime", format!("{date}T23:59:59Z")));
        }

        let body = self.client.get_json(&self.events_url(), &params).await?;
        Ok(summarize_search(&body))
    }

    /// Fetch a single event by its upstream id
    pub async fn get_event(&self, id: &str) -> Result<Value, EventServiceError> {
        let api_key = self.api_key()?;
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| EventServiceError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| EventServiceError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .push("events")
            .push(&format!("{id}.json"));

        let body = match self.client.get_json(url.as_str(), &[("apikey", api_key)]).await {
            Ok(body) => body,
            Err(UpstreamError::Status(404)) => {
                return Err(EventServiceError::NotFound(id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        if body.get("name").and_then(Value::as_str).is_none() {
            return Err(EventServiceError::NotFound(id.to_string()));
        }

        info!(event_id = %id, "Fetched event from discovery API");
        Ok(body)
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Shape a search response into `{count, events}` or a not-found message
pub fn summarize_search(body: &Value) -> Value {
    match body.get("_embedded") {
        None => json!({ "message": "No events found." }),
        Some(embedded) => {
            let events = embedded
                .get("events")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            json!({ "count": events.len(), "events": events })
        }
    }
}

/// Storable fields of an upstream event; `None` when it has no name
pub fn extract_event(id: &str, body: &Value) -> Option<NewEvent> {
    let name = body.get("name").and_then(Value::as_str)?;
    let date = body
        .pointer("/dates/start/localDate")
        .and_then(Value::as_str)
        .map(str::to_string);
    let venue = body
        .pointer("/_embedded/venues/0/name")
        .and_then(Value::as_str)
        .map(str::to_string);

    Some(NewEvent {
        event_id: id.to_string(),
        name: name.to_string(),
        date,
        venue,
    })
}
