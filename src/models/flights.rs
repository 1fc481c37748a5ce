//! Flight search models.

use crate::utils::{is_valid_airport_code, parse_iso_date};
use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Query parameters for the flight search endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize, Apiv2Schema)]
pub struct FlightSearchQuery {
    /// Departure airport, e.g. "FRA"
    pub departure_id: Option<String>,
    /// Arrival airport, e.g. "AUS"
    pub arrival_id: Option<String>,
    /// YYYY-MM-DD
    pub outbound_date: Option<String>,
    /// YYYY-MM-DD
    pub return_date: Option<String>,
}

impl FlightSearchQuery {
    /// Validate into a round trip; airport codes are upper-cased first
    pub fn into_route(self) -> Result<FlightRoute, String> {
        let field = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let (Some(departure_id), Some(arrival_id), Some(outbound_date), Some(return_date)) = (
            field(self.departure_id),
            field(self.arrival_id),
            field(self.outbound_date),
            field(self.return_date),
        ) else {
            return Err(
                "departure_id, arrival_id, outbound_date and return_date are required".to_string(),
            );
        };

        let departure_id = departure_id.to_uppercase();
        let arrival_id = arrival_id.to_uppercase();
        for code in [&departure_id, &arrival_id] {
            if !is_valid_airport_code(code) {
                return Err(format!("invalid airport code '{code}'"));
            }
        }

        let outbound = parse_iso_date(&outbound_date)
            .ok_or_else(|| format!("outbound_date '{outbound_date}' is not a YYYY-MM-DD date"))?;
        let inbound = parse_iso_date(&return_date)
            .ok_or_else(|| format!("return_date '{return_date}' is not a YYYY-MM-DD date"))?;
        if inbound < outbound {
            return Err("return_date must not be before outbound_date".to_string());
        }

        Ok(FlightRoute {
            departure_id,
            arrival_id,
            outbound_date,
            return_date,
        })
    }
}

/// Validated flight search input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightRoute {
    pub departure_id: String,
    pub arrival_id: String,
    pub outbound_date: String,
    pub return_date: String,
}

/// Best flight offered for a route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightOffer {
    #[serde(rename = "flightId")]
    pub flight_id: String,
    pub price: Value,
    pub booking_token: String,
    pub segments: Vec<Value>,
}
