//! Input validation for query parameters forwarded to upstream APIs.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

static COUNTRY_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}$").expect("valid country code regex"));

static AIRPORT_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}$").expect("valid airport code regex"));

static DESTINATION_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{2,8}$").expect("valid destination regex"));

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));

/// ISO 3166 alpha-2 country code, upper case
pub fn is_valid_country_code(value: &str) -> bool {
    COUNTRY_CODE.is_match(value)
}

/// IATA airport code, upper case
pub fn is_valid_airport_code(value: &str) -> bool {
    AIRPORT_CODE.is_match(value)
}

pub fn is_valid_destination_code(value: &str) -> bool {
    DESTINATION_CODE.is_match(value)
}

/// Parse a strict `YYYY-MM-DD` calendar date
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    if !ISO_DATE.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}
