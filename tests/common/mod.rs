//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use travel_gateway::{HotelTransport, HotelbedsConfig, TransportError, UpstreamReply};

/// Hotel API stand-in that replays scripted replies and records every request
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<UpstreamReply, TransportError>>>,
    requests: Mutex<Vec<Vec<(String, String)>>>,
}

impl ScriptedTransport {
    /// Replies are consumed in order; once exhausted every call gets a 401
    pub fn new(replies: Vec<Result<UpstreamReply, TransportError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn always_unauthorized() -> Self {
        Self::new(Vec::new())
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Value of `name` sent with the `index`-th request
    pub fn header(&self, index: usize, name: &str) -> Option<String> {
        self.requests.lock().unwrap()[index]
            .iter()
            .find(|(header, _)| header == name)
            .map(|(_, value)| value.clone())
    }
}

#[async_trait]
impl HotelTransport for ScriptedTransport {
    async fn send(
        &self,
        headers: &[(&'static str, String)],
        _payload: &Value,
        _timeout: Duration,
    ) -> Result<UpstreamReply, TransportError> {
        self.requests.lock().unwrap().push(
            headers
                .iter()
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect(),
        );
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(unauthorized()))
    }
}

pub fn unauthorized() -> UpstreamReply {
    UpstreamReply {
        status: 401,
        body: json!({"error": "Request signature verification failed"}),
    }
}

pub fn hotels_found() -> UpstreamReply {
    UpstreamReply {
        status: 200,
        body: json!({
            "hotels": {
                "hotels": [{"code": 1234, "name": "Hotel Palma"}, {"code": 5678, "name": "Hotel Sol"}],
                "total": 2
            }
        }),
    }
}

pub fn status(status: u16) -> UpstreamReply {
    UpstreamReply {
        status,
        body: json!({"error": {"code": "INTERNAL_ERROR"}}),
    }
}

pub fn hotel_config() -> HotelbedsConfig {
    HotelbedsConfig {
        api_key: "K".to_string(),
        api_secret: "S".to_string(),
        ..Default::default()
    }
}
