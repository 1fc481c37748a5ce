//! Adaptive signed-request resolver for the hotel search API.
//!
//! One logical request sweeps the candidate signature strategies strictly in
//! order, awaiting each attempt before issuing the next. Every attempt is
//! classified as:
//!
//! - success: 2xx with a JSON object body, the sweep ends
//! - retryable failure: HTTP 401, move on to the next candidate
//! - terminal failure: any other status or a transport fault, the sweep ends
//!
//! The full attempt trail is returned on success and on failure.

use crate::config::{HotelbedsConfig, TimestampUnit};
use crate::models::{AttemptKind, AttemptRecord};
use crate::services::signature::{Credentials, SignatureStrategy, select_candidates};
use crate::services::transport::{HotelTransport, TransportError, UpstreamReply};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Status the upstream uses to reject a signature
const AUTH_REJECTED_STATUS: u16 = 401;

/// Successful resolution of one logical request
#[derive(Debug, Clone)]
pub struct Resolution {
    pub used_strategy: SignatureStrategy,
    pub body: Value,
    pub attempts: Vec<AttemptRecord>,
}

/// Why a logical request could not be resolved
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("hotel API key and secret are not configured")]
    MissingCredentials,

    #[error("unknown signature format '{0}'")]
    UnknownForcedStrategy(String),

    #[error("all {} signature formats were rejected", .attempts.len())]
    AuthExhausted { attempts: Vec<AttemptRecord> },

    #[error("hotel API rejected the request with status {status}")]
    UpstreamRejected {
        status: u16,
        body: Value,
        attempts: Vec<AttemptRecord>,
    },

    #[error("hotel API transport failure: {source}")]
    TransportFault {
        source: TransportError,
        attempts: Vec<AttemptRecord>,
    },
}

impl ResolveError {
    /// Attempts made before the failure; empty for precondition errors
    pub fn attempts(&self) -> &[AttemptRecord] {
        match self {
            ResolveError::MissingCredentials | ResolveError::UnknownForcedStrategy(_) => &[],
            ResolveError::AuthExhausted { attempts }
            | ResolveError::UpstreamRejected { attempts, .. }
            | ResolveError::TransportFault { attempts, .. } => attempts,
        }
    }

    /// HTTP status for the gateway's own response
    pub fn http_status(&self) -> u16 {
        match self {
            ResolveError::AuthExhausted { .. } => 401,
            _ => 500,
        }
    }

    /// Get a user-friendly error message for API responses
    pub fn user_message(&self) -> String {
        match self {
            ResolveError::MissingCredentials => {
                "Hotel search is not configured: API key and secret are missing".to_string()
            }
            ResolveError::UnknownForcedStrategy(name) => {
                format!("Unknown signature format '{name}'")
            }
            ResolveError::AuthExhausted { .. } => {
                "Hotel API rejected every signature format".to_string()
            }
            ResolveError::UpstreamRejected { status, .. } => {
                format!("Hotel search failed with upstream status {status}")
            }
            ResolveError::TransportFault { .. } => {
                "Hotel API is temporarily unreachable".to_string()
            }
        }
    }

    /// Diagnostic payload for the `details` field of error responses
    pub fn details(&self) -> Value {
        match self {
            ResolveError::MissingCredentials => json!({
                "required": ["HOTELBEDS_API_KEY", "HOTELBEDS_API_SECRET"],
            }),
            ResolveError::UnknownForcedStrategy(_) => json!({
                "availableFormats": SignatureStrategy::names(),
            }),
            ResolveError::AuthExhausted { attempts } => json!({ "attempts": attempts }),
            ResolveError::UpstreamRejected {
                status,
                body,
                attempts,
            } => json!({
                "upstreamStatus": status,
                "upstreamBody": body,
                "attempts": attempts,
            }),
            ResolveError::TransportFault { source, attempts } => json!({
                "reason": source.to_string(),
                "attempts": attempts,
            }),
        }
    }
}

/// Classification of a single attempt
#[derive(Debug)]
enum AttemptOutcome {
    Success { status: u16, body: Value },
    RetryableFailure { status: u16 },
    TerminalFailure(TerminalCause),
}

#[derive(Debug)]
enum TerminalCause {
    Rejected { status: u16, body: Value },
    Transport(TransportError),
}

impl AttemptOutcome {
    fn classify(reply: Result<UpstreamReply, TransportError>) -> Self {
        match reply {
            Ok(UpstreamReply { status, body }) if (200..300).contains(&status) && body.is_object() => {
                AttemptOutcome::Success { status, body }
            }
            Ok(UpstreamReply { status, .. }) if status == AUTH_REJECTED_STATUS => {
                AttemptOutcome::RetryableFailure { status }
            }
            Ok(UpstreamReply { status, body }) => {
                AttemptOutcome::TerminalFailure(TerminalCause::Rejected { status, body })
            }
            Err(e) => AttemptOutcome::TerminalFailure(TerminalCause::Transport(e)),
        }
    }

    fn record(&self, strategy: SignatureStrategy, duration_ms: u64) -> AttemptRecord {
        let (outcome, status, error) = match self {
            AttemptOutcome::Success { status, .. } => (AttemptKind::Success, Some(*status), None),
            AttemptOutcome::RetryableFailure { status } => (
                AttemptKind::AuthRejected,
                Some(*status),
                Some("signature rejected".to_string()),
            ),
            AttemptOutcome::TerminalFailure(TerminalCause::Rejected { status, body }) => {
                let error = if (200..300).contains(status) && !body.is_object() {
                    "unexpected response body".to_string()
                } else {
                    format!("upstream returned status {status}")
                };
                (AttemptKind::UpstreamRejected, Some(*status), Some(error))
            }
            AttemptOutcome::TerminalFailure(TerminalCause::Transport(e)) => {
                (AttemptKind::TransportFault, None, Some(e.to_string()))
            }
        };

        AttemptRecord {
            strategy: strategy.name().to_string(),
            outcome,
            status,
            error,
            duration_ms,
        }
    }
}

/// Builds the headers for one attempt
fn signed_headers(
    strategy: SignatureStrategy,
    credentials: &Credentials,
    timestamp: &str,
) -> Vec<(&'static str, String)> {
    vec![
        ("Api-key", credentials.api_key().to_string()),
        ("X-Signature", strategy.sign(credentials, timestamp)),
        ("Accept", "application/json".to_string()),
        ("Content-Type", "application/json".to_string()),
    ]
}

/// Resolves signed hotel API requests by sweeping signature strategies
pub struct SignatureResolver {
    credentials: Credentials,
    forced_strategy: Option<String>,
    timestamp_unit: TimestampUnit,
    attempt_timeout: Duration,
    transport: Arc<dyn HotelTransport>,
}

impl SignatureResolver {
    pub fn new(config: &HotelbedsConfig, transport: Arc<dyn HotelTransport>) -> Self {
        Self {
            credentials: Credentials::new(config.api_key.clone(), config.api_secret.clone()),
            forced_strategy: config.forced_signature.clone(),
            timestamp_unit: config.timestamp_unit,
            attempt_timeout: Duration::from_secs(config.attempt_timeout_seconds),
            transport,
        }
    }

    /// Resolve one logical request with a freshly captured timestamp.
    ///
    /// `requested` overrides the configured forced strategy for this call.
    pub async fn resolve(
        &self,
        payload: &Value,
        requested: Option<&str>,
    ) -> Result<Resolution, ResolveError> {
        let timestamp = self.timestamp_unit.now();
        self.resolve_at(payload, requested, &timestamp).await
    }

    /// Resolve one logical request, signing every attempt with `timestamp`
    pub async fn resolve_at(
        &self,
        payload: &Value,
        requested: Option<&str>,
        timestamp: &str,
    ) -> Result<Resolution, ResolveError> {
        if !self.credentials.is_complete() {
            return Err(ResolveError::MissingCredentials);
        }

        let forced = requested.or(self.forced_strategy.as_deref());
        let candidates = select_candidates(forced).map_err(ResolveError::UnknownForcedStrategy)?;

        let mut attempts = Vec::with_capacity(candidates.len());

        for strategy in candidates {
            let headers = signed_headers(strategy, &self.credentials, timestamp);

            let started = Instant::now();
            let reply = self
                .transport
                .send(&headers, payload, self.attempt_timeout)
                .await;
            let duration_ms = started.elapsed().as_millis() as u64;

            let outcome = AttemptOutcome::classify(reply);
            let record = outcome.record(strategy, duration_ms);
            log_attempt(&record);
            attempts.push(record);

            match outcome {
                AttemptOutcome::Success { body, .. } => {
                    return Ok(Resolution {
                        used_strategy: strategy,
                        body,
                        attempts,
                    });
                }
                AttemptOutcome::RetryableFailure { .. } => continue,
                AttemptOutcome::TerminalFailure(TerminalCause::Rejected { status, body }) => {
                    return Err(ResolveError::UpstreamRejected {
                        status,
                        body,
                        attempts,
                    });
                }
                AttemptOutcome::TerminalFailure(TerminalCause::Transport(source)) => {
                    return Err(ResolveError::TransportFault { source, attempts });
                }
            }
        }

        Err(ResolveError::AuthExhausted { attempts })
    }
}

fn log_attempt(record: &AttemptRecord) {
    match record.outcome {
        AttemptKind::Success => info!(
            strategy = %record.strategy,
            status = ?record.status,
            duration_ms = record.duration_ms,
            "Hotel API accepted signature format"
        ),
        _ => warn!(
            strategy = %record.strategy,
            outcome = record.outcome.as_str(),
            status = ?record.status,
            error = ?record.error,
            duration_ms = record.duration_ms,
            "Hotel API signature attempt failed"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_success_requires_object_body() {
        let ok = AttemptOutcome::classify(Ok(UpstreamReply {
            status: 200,
            body: json!({"hotels": {}}),
        }));
        assert!(matches!(ok, AttemptOutcome::Success { status: 200, .. }));

        let html = AttemptOutcome::classify(Ok(UpstreamReply {
            status: 200,
            body: Value::String("<html>".to_string()),
        }));
        assert!(matches!(
            html,
            AttemptOutcome::TerminalFailure(TerminalCause::Rejected { status: 200, .. })
        ));
    }

    #[test]
    fn test_classify_only_401_is_retryable() {
        let unauthorized = AttemptOutcome::classify(Ok(UpstreamReply {
            status: 401,
            body: json!({"error": "Request signature verification failed"}),
        }));
        assert!(matches!(
            unauthorized,
            AttemptOutcome::RetryableFailure { status: 401 }
        ));

        for status in [400, 403, 404, 429, 500, 503] {
            let outcome = AttemptOutcome::classify(Ok(UpstreamReply {
                status,
                body: json!({}),
            }));
            assert!(
                matches!(outcome, AttemptOutcome::TerminalFailure(_)),
                "status {status} should be terminal"
            );
        }
    }

    #[test]
    fn test_classify_transport_error_is_terminal() {
        let outcome = AttemptOutcome::classify(Err(TransportError::Timeout(Duration::from_secs(8))));
        let record = outcome.record(SignatureStrategy::HmacKeyTimestamp, 8000);
        assert_eq!(record.outcome, AttemptKind::TransportFault);
        assert_eq!(record.status, None);
        assert!(record.error.unwrap().contains("timed out"));
    }

    #[test]
    fn test_signed_headers_carry_key_and_signature() {
        let credentials = Credentials::new("K", "S");
        let headers = signed_headers(SignatureStrategy::HmacKeyTimestamp, &credentials, "1700000000");
        assert!(headers.contains(&("Api-key", "K".to_string())));
        assert!(headers.contains(&(
            "X-Signature",
            "7866aedf932674487b1fbce1a18126d7c0da3badf0b5a79958a03d3fa43a1639".to_string()
        )));
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(ResolveError::MissingCredentials.http_status(), 500);
        assert_eq!(
            ResolveError::AuthExhausted { attempts: vec![] }.http_status(),
            401
        );
        assert_eq!(
            ResolveError::UpstreamRejected {
                status: 400,
                body: json!({}),
                attempts: vec![]
            }
            .http_status(),
            500
        );
        assert_ne!(
            ResolveError::MissingCredentials.user_message(),
            ResolveError::UpstreamRejected {
                status: 500,
                body: json!({}),
                attempts: vec![]
            }
            .user_message()
        );
    }
}
