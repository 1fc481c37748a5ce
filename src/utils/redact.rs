//! Redaction of secrets before URLs reach the logs.

use url::Url;

const SECRET_PARAMS: [&str; 3] = ["apikey", "api_key", "key"];

/// Render `url` with API-key query parameters replaced by `REDACTED`
pub fn redact_query_secrets(url: &Url) -> String {
    if url.query().is_none() {
        return url.to_string();
    }

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(name, value)| {
            if SECRET_PARAMS.contains(&name.to_ascii_lowercase().as_str()) {
                (name.into_owned(), "REDACTED".to_string())
            } else {
                (name.into_owned(), value.into_owned())
            }
        })
        .collect();

    let mut redacted = url.clone();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}
