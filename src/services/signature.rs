//! Request signature strategies for the hotel search API.
//!
//! The upstream expects a signature derived from the API key, the shared
//! secret and an epoch timestamp, but the exact construction is not pinned
//! down. Each [`SignatureStrategy`] is one candidate construction; the
//! resolver tries them in [`SignatureStrategy::ALL`] order.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// API key and shared secret issued by the hotel API
#[derive(Clone, Default)]
pub struct Credentials {
    api_key: String,
    secret: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret: secret.into(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Both halves must be present before any signed request is attempted
    pub fn is_complete(&self) -> bool {
        !self.api_key.trim().is_empty() && !self.secret.trim().is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key_set", &!self.api_key.is_empty())
            .field("secret_set", &!self.secret.is_empty())
            .finish()
    }
}

/// A named way of deriving a request signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureStrategy {
    /// HMAC-SHA256 keyed by the secret over `apiKey + timestamp`
    HmacKeyTimestamp,
    /// HMAC-SHA256 keyed by the secret over `timestamp + apiKey`
    HmacTimestampKey,
    /// HMAC-SHA256 keyed by the secret over `apiKey + secret + timestamp`
    HmacKeySecretTimestamp,
    /// SHA-256 over `secret + apiKey + timestamp`
    Sha256SecretKeyTimestamp,
    /// SHA-256 over `apiKey + secret + timestamp`
    Sha256KeySecretTimestamp,
    /// SHA-256 over `secret + timestamp + apiKey`
    Sha256SecretTimestampKey,
}

impl SignatureStrategy {
    /// Every strategy in sweep order
    pub const ALL: [SignatureStrategy; 6] = [
        SignatureStrategy::HmacKeyTimestamp,
        SignatureStrategy::HmacTimestampKey,
        SignatureStrategy::HmacKeySecretTimestamp,
        SignatureStrategy::Sha256SecretKeyTimestamp,
        SignatureStrategy::Sha256KeySecretTimestamp,
        SignatureStrategy::Sha256SecretTimestampKey,
    ];

    /// Stable name used in configuration, responses and metrics labels
    pub const fn name(self) -> &'static str {
        match self {
            SignatureStrategy::HmacKeyTimestamp => "hmac:apiKey+timestamp",
            SignatureStrategy::HmacTimestampKey => "hmac:timestamp+apiKey",
            SignatureStrategy::HmacKeySecretTimestamp => "hmac:apiKey+secret+timestamp",
            SignatureStrategy::Sha256SecretKeyTimestamp => "sha256:secret+apiKey+timestamp",
            SignatureStrategy::Sha256KeySecretTimestamp => "sha256:apiKey+secret+timestamp",
            SignatureStrategy::Sha256SecretTimestampKey => "sha256:secret+timestamp+apiKey",
        }
    }

    /// Look up a strategy by its exact name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|strategy| strategy.name() == name)
    }

    /// Names of all strategies in sweep order
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|strategy| strategy.name()).collect()
    }

    /// Derive the hex-encoded signature for the given credentials and timestamp
    pub fn sign(self, credentials: &Credentials, timestamp: &str) -> String {
        let key = credentials.api_key.as_str();
        let secret = credentials.secret.as_str();

        match self {
            SignatureStrategy::HmacKeyTimestamp => hmac_sha256_hex(secret, &[key, timestamp]),
            SignatureStrategy::HmacTimestampKey => hmac_sha256_hex(secret, &[timestamp, key]),
            SignatureStrategy::HmacKeySecretTimestamp => {
                hmac_sha256_hex(secret, &[key, secret, timestamp])
            }
            SignatureStrategy::Sha256SecretKeyTimestamp => sha256_hex(&[secret, key, timestamp]),
            SignatureStrategy::Sha256KeySecretTimestamp => sha256_hex(&[key, secret, timestamp]),
            SignatureStrategy::Sha256SecretTimestampKey => sha256_hex(&[secret, timestamp, key]),
        }
    }
}

impl fmt::Display for SignatureStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decide which strategies to attempt for one request.
///
/// A forced name yields exactly that strategy; an unrecognized name is an
/// error rather than a silent fallback to the full sweep.
pub fn select_candidates(forced: Option<&str>) -> Result<Vec<SignatureStrategy>, String> {
    match forced {
        Some(name) => SignatureStrategy::from_name(name)
            .map(|strategy| vec![strategy])
            .ok_or_else(|| name.to_string()),
        None => Ok(SignatureStrategy::ALL.to_vec()),
    }
}

fn hmac_sha256_hex(key: &str, parts: &[&str]) -> String {
    // HMAC accepts keys of any length, so construction cannot fail
    let mut mac =
        HmacSha256::new_from_slice(key.as_bytes()).expect("HMAC accepts keys of any length");
    for part in parts {
        mac.update(part.as_bytes());
    }
    hex::encode(mac.finalize().into_bytes())
}

fn sha256_hex(parts: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_bytes());
    }
    hex::encode(hasher.finalize())
}
