use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::flight::{Flight, FlightDetails};

/// Version written into every share token.
pub const SHARE_FORMAT_VERSION: u32 = 1;

/// A named trip plan. Owns its flights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub flights: Vec<Flight>,
    /// Epoch millis
    pub created_at: i64,
}

impl Workspace {
    pub fn new(name: impl Into<String>, flights: Vec<Flight>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            flights,
            created_at: Utc::now().timestamp_millis(),
        }
    }

    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.created_at).single()
    }

    pub fn flight(&self, flight_id: &Uuid) -> Option<&Flight> {
        self.flights.iter().find(|flight| &flight.id == flight_id)
    }
}

/// Identifier-free form of a workspace used for sharing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareableWorkspace {
    pub name: String,
    pub flights: Vec<FlightDetails>,
    pub version: u32,
}

impl From<&Workspace> for ShareableWorkspace {
    fn from(workspace: &Workspace) -> Self {
        Self {
            name: workspace.name.clone(),
            flights: workspace
                .flights
                .iter()
                .map(|flight| flight.details.clone())
                .collect(),
            version: SHARE_FORMAT_VERSION,
        }
    }
}
