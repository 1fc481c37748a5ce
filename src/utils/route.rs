//! Route pattern extraction utilities.

use actix_web::HttpRequest;

/// Route label for metrics.
///
/// Uses the matched resource pattern when routing has resolved one, so
/// unknown paths collapse into a single `/unknown` series.
pub fn extract_route_pattern(req: &HttpRequest) -> String {
    match req.match_pattern() {
        Some(pattern) => pattern,
        None => "/unknown".to_string(),
    }
}
