use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Everything recorded about a flight except its identifier.
///
/// This is also the shape flights take inside a share token, so every field
/// tolerates being absent on the way in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightDetails {
    #[serde(default)]
    pub origin: String,

    #[serde(default)]
    pub destination: String,

    /// ISO-8601 local date-time as entered, e.g. `2024-01-01T10:00`
    #[serde(default)]
    pub date: String,

    /// Airline name at the time of entry (not a reference)
    #[serde(default)]
    pub airline: String,

    /// Always 0 when `use_direct_price` is set
    #[serde(default)]
    pub miles: u64,

    /// Formatted currency text, frozen at write time
    #[serde(default)]
    pub price: String,

    #[serde(default)]
    pub ticket_link: String,

    #[serde(default)]
    pub use_direct_price: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxes: Option<String>,
}

/// A flight stored inside a workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub id: Uuid,
    #[serde(flatten)]
    pub details: FlightDetails,
}

impl Flight {
    pub fn new(details: FlightDetails) -> Self {
        Self {
            id: Uuid::new_v4(),
            details,
        }
    }

    /// Miles that count towards mileage totals.
    pub fn counted_miles(&self) -> u64 {
        if self.details.use_direct_price {
            0
        } else {
            self.details.miles
        }
    }
}
