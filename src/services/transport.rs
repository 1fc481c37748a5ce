//! Transport used by the signature resolver to reach the hotel API.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Header name/value pairs attached to one signed request
pub type RequestHeaders = [(&'static str, String)];

/// Raw upstream reply; `body` is the parsed JSON or the text as a JSON string
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: Value,
}

/// Failure to obtain any HTTP status from the upstream
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("network error: {0}")]
    Network(String),
}

/// Performs one signed POST against the hotel API.
///
/// Implementations must enforce `timeout` and report its expiry as
/// [`TransportError::Timeout`].
#[async_trait]
pub trait HotelTransport: Send + Sync {
    async fn send(
        &self,
        headers: &RequestHeaders,
        payload: &Value,
        timeout: Duration,
    ) -> Result<UpstreamReply, TransportError>;
}

/// `reqwest`-backed transport posting JSON to a fixed URL
pub struct ReqwestTransport {
    client: Client,
    url: String,
}

impl ReqwestTransport {
    pub fn new(url: impl Into<String>, connect_timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().connect_timeout(connect_timeout).build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl HotelTransport for ReqwestTransport {
    async fn send(
        &self,
        headers: &RequestHeaders,
        payload: &Value,
        timeout: Duration,
    ) -> Result<UpstreamReply, TransportError> {
        let mut request = self.client.post(&self.url).json(payload);
        for (name, value) in headers {
            request = request.header(*name, value.as_str());
        }

        let exchange = async {
            let response = request.send().await?;
            let status = response.status().as_u16();
            let text = response.text().await?;
            Ok::<_, reqwest::Error>((status, text))
        };

        match tokio::time::timeout(timeout, exchange).await {
            Ok(Ok((status, text))) => {
                let body = serde_json::from_str(&text).unwrap_or_else(|_| Value::String(text));
                Ok(UpstreamReply { status, body })
            }
            Ok(Err(e)) => Err(TransportError::Network(e.without_url().to_string())),
            Err(_) => Err(TransportError::Timeout(timeout)),
        }
    }
}
