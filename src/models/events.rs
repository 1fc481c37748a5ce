//! Event discovery and event storage models.

use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

fn default_country_code() -> String {
    "DE".to_string()
}

fn default_list_size() -> u32 {
    20
}

fn default_search_size() -> u32 {
    10
}

/// Query parameters for listing upstream events
#[derive(Debug, Clone, Serialize, Deserialize, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
pub struct EventListQuery {
    pub keyword: Option<String>,
    /// Country code, e.g. "DE"
    #[serde(default = "default_country_code")]
    pub country_code: String,
    #[serde(default = "default_list_size")]
    pub size: u32,
    #[serde(default)]
    pub page: u32,
}

/// Query parameters for searching upstream events by name, city or date
#[derive(Debug, Clone, Default, Serialize, Deserialize, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
pub struct EventSearchQuery {
    pub name: Option<String>,
    pub city: Option<String>,
    pub country_code: Option<String>,
    /// Day of the event, YYYY-MM-DD
    pub date: Option<String>,
    #[serde(default = "default_search_size")]
    pub size: u32,
}

/// Body of a request to store an event
#[derive(Debug, Clone, Default, Serialize, Deserialize, Apiv2Schema)]
pub struct NewEventRequest {
    pub event_id: Option<String>,
    pub name: Option<String>,
    pub date: Option<String>,
    pub venue: Option<String>,
}

impl NewEventRequest {
    /// Require `event_id` and `name`; blank optional fields are dropped
    pub fn into_new_event(self) -> Result<NewEvent, String> {
        let event_id = non_blank(self.event_id);
        let name = non_blank(self.name);

        match (event_id, name) {
            (Some(event_id), Some(name)) => Ok(NewEvent {
                event_id,
                name,
                date: non_blank(self.date),
                venue: non_blank(self.venue),
            }),
            _ => Err("event_id and name are required".to_string()),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Event ready to be written to the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    pub event_id: String,
    pub name: String,
    pub date: Option<String>,
    pub venue: Option<String>,
}

/// Event row as read back from the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEvent {
    pub id: i64,
    pub event_id: String,
    pub name: String,
    pub date: Option<String>,
    pub venue: Option<String>,
    pub created_at: String,
}

/// Body of a request to fetch an upstream event and store it
#[derive(Debug, Clone, Default, Serialize, Deserialize, Apiv2Schema)]
pub struct SaveUpstreamEventRequest {
    /// Upstream event identifier
    pub id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_event_requires_id_and_name() {
        let missing_name = NewEventRequest {
            event_id: Some("G5v".to_string()),
            ..Default::default()
        };
        assert!(missing_name.into_new_event().is_err());

        let blank_id = NewEventRequest {
            event_id: Some("  ".to_string()),
            name: Some("Concert".to_string()),
            ..Default::default()
        };
        assert!(blank_id.into_new_event().is_err());
    }

    #[test]
    fn test_new_event_drops_blank_optionals() {
        let request = NewEventRequest {
            event_id: Some("G5v".to_string()),
            name: Some(" Concert ".to_string()),
            date: Some(String::new()),
            venue: Some("Arena".to_string()),
        };
        let event = request.into_new_event().unwrap();
        assert_eq!(event.name, "Concert");
        assert_eq!(event.date, None);
        assert_eq!(event.venue.as_deref(), Some("Arena"));
    }

    #[test]
    fn test_list_query_defaults() {
        let query: EventListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.country_code, "DE");
        assert_eq!(query.size, 20);
        assert_eq!(query.page, 0);
        assert_eq!(query.keyword, None);
    }
}
