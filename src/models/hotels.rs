//! Hotel search request, response and diagnostic models.

use crate::utils::{is_valid_destination_code, parse_iso_date};
use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

fn default_one() -> u32 {
    1
}

/// Query parameters for the hotel search endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
pub struct HotelSearchQuery {
    /// Destination code (e.g. "PMI" for Palma de Mallorca)
    pub destination: Option<String>,
    /// Check-in date, YYYY-MM-DD
    pub check_in: Option<String>,
    /// Check-out date, YYYY-MM-DD
    pub check_out: Option<String>,
    #[serde(default = "default_one")]
    pub rooms: u32,
    #[serde(default = "default_one")]
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    /// Only try this signature format instead of sweeping all of them
    pub format: Option<String>,
}

impl HotelSearchQuery {
    /// Validate the query into search criteria, or explain what is wrong
    pub fn into_criteria(self) -> Result<HotelSearchCriteria, String> {
        let (Some(destination), Some(check_in), Some(check_out)) = (
            present(self.destination),
            present(self.check_in),
            present(self.check_out),
        ) else {
            return Err("destination, checkIn and checkOut are required".to_string());
        };

        if !is_valid_destination_code(&destination) {
            return Err(format!("invalid destination code '{destination}'"));
        }
        let check_in = parse_iso_date(&check_in)
            .ok_or_else(|| format!("checkIn '{check_in}' is not a YYYY-MM-DD date"))?;
        let check_out = parse_iso_date(&check_out)
            .ok_or_else(|| format!("checkOut '{check_out}' is not a YYYY-MM-DD date"))?;
        if check_out <= check_in {
            return Err("checkOut must be after checkIn".to_string());
        }
        if self.rooms == 0 || self.adults == 0 {
            return Err("rooms and adults must be at least 1".to_string());
        }

        Ok(HotelSearchCriteria {
            destination: destination.to_uppercase(),
            check_in,
            check_out,
            rooms: self.rooms,
            adults: self.adults,
            children: self.children,
            forced_format: present(self.format),
        })
    }
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Validated hotel search input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotelSearchCriteria {
    pub destination: String,
    pub check_in: chrono::NaiveDate,
    pub check_out: chrono::NaiveDate,
    pub rooms: u32,
    pub adults: u32,
    pub children: u32,
    pub forced_format: Option<String>,
}

/// How a single signature attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptKind {
    Success,
    AuthRejected,
    UpstreamRejected,
    TransportFault,
}

impl AttemptKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AttemptKind::Success => "success",
            AttemptKind::AuthRejected => "auth_rejected",
            AttemptKind::UpstreamRejected => "upstream_rejected",
            AttemptKind::TransportFault => "transport_fault",
        }
    }
}

/// Diagnostic record of one signed request attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub strategy: String,
    pub outcome: AttemptKind,
    /// Upstream status; absent for transport faults
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub duration_ms: u64,
}

/// Successful hotel search response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelSearchResponse {
    /// Signature format the upstream accepted
    pub used_format: String,
    pub count: usize,
    pub hotels: Vec<Value>,
    pub attempts: Vec<AttemptRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn query() -> HotelSearchQuery {
        serde_json::from_value(serde_json::json!({
            "destination": "pmi",
            "checkIn": "2025-06-01",
            "checkOut": "2025-06-05",
            "adults": 2
        }))
        .unwrap()
    }

    #[test]
    fn test_valid_query() {
        let criteria = query().into_criteria().unwrap();
        assert_eq!(criteria.destination, "PMI");
        assert_eq!(criteria.check_in, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!(criteria.rooms, 1);
        assert_eq!(criteria.adults, 2);
        assert_eq!(criteria.children, 0);
        assert_eq!(criteria.forced_format, None);
    }

    #[test]
    fn test_missing_fields() {
        let mut q = query();
        q.check_out = Some("  ".to_string());
        assert!(q.into_criteria().unwrap_err().contains("required"));
    }

    #[test]
    fn test_checkout_must_follow_checkin() {
        let mut q = query();
        q.check_out = Some("2025-06-01".to_string());
        assert!(q.into_criteria().is_err());
    }

    #[test]
    fn test_invalid_date() {
        let mut q = query();
        q.check_in = Some("2025-13-01".to_string());
        assert!(q.into_criteria().unwrap_err().contains("checkIn"));
    }

    #[test]
    fn test_blank_format_is_ignored() {
        let mut q = query();
        q.format = Some(" ".to_string());
        assert_eq!(q.into_criteria().unwrap().forced_format, None);
    }
}
