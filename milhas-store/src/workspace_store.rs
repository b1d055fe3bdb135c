use std::sync::Arc;

use milhas_catalog::AirlineCatalog;
use milhas_core::{KeyValueStore, WORKSPACE_STORAGE_KEY};
use milhas_planner::{FlightInput, FlightPatch, WorkspaceBook, WorkspacePatch};
use tracing::info;
use uuid::Uuid;

use crate::record::{read_record, write_record};
use crate::StoreResult;

/// Owns the workspace book and keeps `workspace-storage` in step with it.
///
/// Each mutation computes the next book, persists it, and only then publishes
/// it; on any error the current snapshot is left as it was.
pub struct WorkspaceStore {
    backend: Arc<dyn KeyValueStore>,
    snapshot: Arc<WorkspaceBook>,
}

impl WorkspaceStore {
    pub fn load(backend: Arc<dyn KeyValueStore>) -> StoreResult<Self> {
        let book: WorkspaceBook =
            read_record(backend.as_ref(), WORKSPACE_STORAGE_KEY)?.unwrap_or_default();
        info!("Loaded {} workspaces", book.len());

        Ok(Self {
            backend,
            snapshot: Arc::new(book),
        })
    }

    pub fn snapshot(&self) -> Arc<WorkspaceBook> {
        Arc::clone(&self.snapshot)
    }

    pub fn set_active_workspace(&mut self, id: &Uuid) -> StoreResult<Arc<WorkspaceBook>> {
        let next = self.snapshot.set_active_workspace(id)?;
        self.commit(next)
    }

    /// Activates the first workspace if there are workspaces but none is active.
    pub fn ensure_active(&mut self) -> StoreResult<Arc<WorkspaceBook>> {
        let next = self.snapshot.with_default_active();
        if next == *self.snapshot {
            return Ok(self.snapshot());
        }
        self.commit(next)
    }

    pub fn add_workspace(
        &mut self,
        name: impl Into<String>,
    ) -> StoreResult<(Arc<WorkspaceBook>, Uuid)> {
        let (next, id) = self.snapshot.add_workspace(name, Vec::new());
        Ok((self.commit(next)?, id))
    }

    pub fn remove_workspace(&mut self, id: &Uuid) -> StoreResult<Arc<WorkspaceBook>> {
        let next = self.snapshot.remove_workspace(id)?;
        self.commit(next)
    }

    pub fn update_workspace(
        &mut self,
        id: &Uuid,
        patch: WorkspacePatch,
    ) -> StoreResult<Arc<WorkspaceBook>> {
        let next = self.snapshot.update_workspace(id, patch)?;
        self.commit(next)
    }

    /// Prices the input against `airlines` as they are now and appends the flight.
    pub fn add_flight(
        &mut self,
        workspace_id: &Uuid,
        input: FlightInput,
        airlines: &AirlineCatalog,
    ) -> StoreResult<(Arc<WorkspaceBook>, Uuid)> {
        let details = input.price(airlines)?;
        let (next, flight_id) = self.snapshot.add_flight(workspace_id, details)?;
        Ok((self.commit(next)?, flight_id))
    }

    /// Re-submits a flight: validated and re-priced like a new entry, same id.
    pub fn edit_flight(
        &mut self,
        workspace_id: &Uuid,
        flight_id: &Uuid,
        input: FlightInput,
        airlines: &AirlineCatalog,
    ) -> StoreResult<Arc<WorkspaceBook>> {
        let details = input.price(airlines)?;
        let next = self.snapshot.replace_flight(workspace_id, flight_id, details)?;
        self.commit(next)
    }

    pub fn update_flight(
        &mut self,
        workspace_id: &Uuid,
        flight_id: &Uuid,
        patch: FlightPatch,
    ) -> StoreResult<Arc<WorkspaceBook>> {
        let next = self.snapshot.update_flight(workspace_id, flight_id, patch)?;
        self.commit(next)
    }

    pub fn remove_flight(
        &mut self,
        workspace_id: &Uuid,
        flight_id: &Uuid,
    ) -> StoreResult<Arc<WorkspaceBook>> {
        let next = self.snapshot.remove_flight(workspace_id, flight_id)?;
        self.commit(next)
    }

    pub fn export_workspace(&self, id: &Uuid) -> StoreResult<String> {
        Ok(self.snapshot.export_workspace(id)?)
    }

    /// Adds the shared workspace as a new workspace; nothing is added on failure.
    pub fn import_workspace(&mut self, token: &str) -> StoreResult<(Arc<WorkspaceBook>, Uuid)> {
        let (next, id) = self.snapshot.import_workspace(token)?;
        Ok((self.commit(next)?, id))
    }

    fn commit(&mut self, next: WorkspaceBook) -> StoreResult<Arc<WorkspaceBook>> {
        write_record(self.backend.as_ref(), WORKSPACE_STORAGE_KEY, &next)?;
        self.snapshot = Arc::new(next);
        Ok(self.snapshot())
    }
}
