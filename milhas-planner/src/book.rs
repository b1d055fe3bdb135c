use milhas_shared::{Flight, FlightDetails, Workspace};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::validation::ValidationErrors;

/// Every workspace plus the active-workspace pointer.
///
/// A book is an immutable snapshot: mutations return the next book and leave
/// the receiver as it was, so a failed mutation never leaves partial state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceBook {
    #[serde(default)]
    pub workspaces: Vec<Workspace>,
    #[serde(default)]
    pub active_workspace_id: Option<Uuid>,
}

/// Partial update for a workspace
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkspacePatch {
    pub name: Option<String>,
    pub flights: Option<Vec<Flight>>,
}

/// Partial update for a flight. Merged field by field; the price is never re-derived.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlightPatch {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub date: Option<String>,
    pub airline: Option<String>,
    pub miles: Option<u64>,
    pub price: Option<String>,
    pub ticket_link: Option<String>,
    pub use_direct_price: Option<bool>,
    /// `Some(None)` clears the taxes
    pub taxes: Option<Option<String>>,
}

impl FlightPatch {
    fn apply(self, details: &mut FlightDetails) {
        if let Some(origin) = self.origin {
            details.origin = origin;
        }
        if let Some(destination) = self.destination {
            details.destination = destination;
        }
        if let Some(date) = self.date {
            details.date = date;
        }
        if let Some(airline) = self.airline {
            details.airline = airline;
        }
        if let Some(miles) = self.miles {
            details.miles = miles;
        }
        if let Some(price) = self.price {
            details.price = price;
        }
        if let Some(ticket_link) = self.ticket_link {
            details.ticket_link = ticket_link;
        }
        if let Some(use_direct_price) = self.use_direct_price {
            details.use_direct_price = use_direct_price;
        }
        if let Some(taxes) = self.taxes {
            details.taxes = taxes;
        }
    }
}

impl WorkspaceBook {
    pub fn new(workspaces: Vec<Workspace>, active_workspace_id: Option<Uuid>) -> Self {
        Self {
            workspaces,
            active_workspace_id,
        }
    }

    pub fn get(&self, id: &Uuid) -> Option<&Workspace> {
        self.workspaces.iter().find(|workspace| &workspace.id == id)
    }

    pub fn active(&self) -> Option<&Workspace> {
        self.active_workspace_id.as_ref().and_then(|id| self.get(id))
    }

    pub fn len(&self) -> usize {
        self.workspaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workspaces.is_empty()
    }

    pub fn set_active_workspace(&self, id: &Uuid) -> PlannerResult<Self> {
        self.require(id)?;

        let mut next = self.clone();
        next.active_workspace_id = Some(*id);
        info!("Active workspace set: {}", id);
        Ok(next)
    }

    /// Selects the first workspace when there are workspaces but none is active.
    pub fn with_default_active(&self) -> Self {
        if self.active().is_some() {
            return self.clone();
        }

        let mut next = self.clone();
        next.active_workspace_id = self.workspaces.first().map(|workspace| workspace.id);
        next
    }

    /// Creates a workspace; every flight is given a fresh id.
    pub fn add_workspace(
        &self,
        name: impl Into<String>,
        flights: Vec<FlightDetails>,
    ) -> (Self, Uuid) {
        let workspace = Workspace::new(name, flights.into_iter().map(Flight::new).collect());
        let id = workspace.id;

        info!(
            "Workspace added: {} ({}) with {} flights",
            workspace.name,
            id,
            workspace.flights.len()
        );

        let mut next = self.clone();
        next.workspaces.push(workspace);
        (next, id)
    }

    /// Removes a workspace, clearing the active pointer if it pointed there.
    pub fn remove_workspace(&self, id: &Uuid) -> PlannerResult<Self> {
        self.require(id)?;

        let workspaces = self
            .workspaces
            .iter()
            .filter(|workspace| &workspace.id != id)
            .cloned()
            .collect();
        let active_workspace_id = self.active_workspace_id.filter(|active| active != id);

        info!("Workspace removed: {}", id);
        Ok(Self::new(workspaces, active_workspace_id))
    }

    pub fn update_workspace(&self, id: &Uuid, patch: WorkspacePatch) -> PlannerResult<Self> {
        self.modify(id, |workspace| {
            if let Some(name) = patch.name {
                workspace.name = name;
            }
            if let Some(flights) = patch.flights {
                workspace.flights = flights;
            }
        })
    }

    pub fn add_flight(
        &self,
        workspace_id: &Uuid,
        details: FlightDetails,
    ) -> PlannerResult<(Self, Uuid)> {
        let flight = Flight::new(details);
        let flight_id = flight.id;

        let next = self.modify(workspace_id, |workspace| workspace.flights.push(flight))?;
        info!("Flight {} added to workspace {}", flight_id, workspace_id);
        Ok((next, flight_id))
    }

    pub fn remove_flight(&self, workspace_id: &Uuid, flight_id: &Uuid) -> PlannerResult<Self> {
        self.require_flight(workspace_id, flight_id)?;

        let next = self.modify(workspace_id, |workspace| {
            workspace.flights.retain(|flight| &flight.id != flight_id)
        })?;
        info!("Flight {} removed from workspace {}", flight_id, workspace_id);
        Ok(next)
    }

    pub fn update_flight(
        &self,
        workspace_id: &Uuid,
        flight_id: &Uuid,
        patch: FlightPatch,
    ) -> PlannerResult<Self> {
        self.require_flight(workspace_id, flight_id)?;

        self.modify(workspace_id, |workspace| {
            if let Some(flight) = workspace.flights.iter_mut().find(|f| &f.id == flight_id) {
                patch.apply(&mut flight.details);
            }
        })
    }

    /// Overwrites a flight's details, keeping its id and position.
    pub fn replace_flight(
        &self,
        workspace_id: &Uuid,
        flight_id: &Uuid,
        details: FlightDetails,
    ) -> PlannerResult<Self> {
        self.require_flight(workspace_id, flight_id)?;

        self.modify(workspace_id, |workspace| {
            if let Some(flight) = workspace.flights.iter_mut().find(|f| &f.id == flight_id) {
                flight.details = details;
            }
        })
    }

    pub(crate) fn push_workspace(&self, workspace: Workspace) -> Self {
        let mut next = self.clone();
        next.workspaces.push(workspace);
        next
    }

    fn require(&self, id: &Uuid) -> PlannerResult<&Workspace> {
        self.get(id)
            .ok_or_else(|| PlannerError::WorkspaceNotFound(id.to_string()))
    }

    fn require_flight(&self, workspace_id: &Uuid, flight_id: &Uuid) -> PlannerResult<&Flight> {
        self.require(workspace_id)?
            .flight(flight_id)
            .ok_or_else(|| PlannerError::FlightNotFound {
                workspace_id: workspace_id.to_string(),
                flight_id: flight_id.to_string(),
            })
    }

    fn modify<F>(&self, id: &Uuid, change: F) -> PlannerResult<Self>
    where
        F: FnOnce(&mut Workspace),
    {
        let mut next = self.clone();
        let workspace = next
            .workspaces
            .iter_mut()
            .find(|workspace| &workspace.id == id)
            .ok_or_else(|| PlannerError::WorkspaceNotFound(id.to_string()))?;

        change(workspace);
        Ok(next)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error("Workspace not found: {0}")]
    WorkspaceNotFound(String),

    #[error("Flight {flight_id} not found in workspace {workspace_id}")]
    FlightNotFound {
        workspace_id: String,
        flight_id: String,
    },

    #[error("Invalid flight: {0}")]
    InvalidFlight(ValidationErrors),
}

pub type PlannerResult<T> = Result<T, PlannerError>;
