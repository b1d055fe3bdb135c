use std::sync::Arc;

use milhas_catalog::{AirlineCatalog, AirlinePatch};
use milhas_core::{KeyValueStore, AIRLINE_STORAGE_KEY};
use milhas_shared::Airline;
use tracing::{info, warn};
use uuid::Uuid;

use crate::record::{read_record, write_record};
use crate::StoreResult;

/// Owns the airline catalog and keeps `airline-storage` in step with it.
pub struct AirlineStore {
    backend: Arc<dyn KeyValueStore>,
    snapshot: Arc<AirlineCatalog>,
}

impl AirlineStore {
    /// Reads the stored catalog. When nothing is stored and `seed_defaults`
    /// is set, starts from the default airlines and persists them.
    pub fn load(backend: Arc<dyn KeyValueStore>, seed_defaults: bool) -> StoreResult<Self> {
        let stored: Option<AirlineCatalog> = read_record(backend.as_ref(), AIRLINE_STORAGE_KEY)?;

        let mut store = Self {
            backend,
            snapshot: Arc::new(AirlineCatalog::default()),
        };

        match stored {
            Some(catalog) => {
                info!("Loaded {} airlines", catalog.len());
                store.snapshot = Arc::new(catalog);
            }
            None if seed_defaults => {
                info!("No stored airlines; seeding defaults");
                store.commit(AirlineCatalog::with_defaults())?;
            }
            None => {}
        }

        Ok(store)
    }

    pub fn snapshot(&self) -> Arc<AirlineCatalog> {
        Arc::clone(&self.snapshot)
    }

    pub fn add_airline(
        &mut self,
        name: impl Into<String>,
        price_per_thousand_miles: f64,
    ) -> StoreResult<(Arc<AirlineCatalog>, Airline)> {
        let (next, airline) = self.snapshot.add_airline(name, price_per_thousand_miles);
        if !airline.has_usable_rate() {
            warn!(
                "Airline {} has rate {}; its estimates will be meaningless",
                airline.name, airline.price_per_thousand_miles
            );
        }

        let snapshot = self.commit(next)?;
        Ok((snapshot, airline))
    }

    pub fn remove_airline(&mut self, id: &Uuid) -> StoreResult<Arc<AirlineCatalog>> {
        let next = self.snapshot.remove_airline(id)?;
        self.commit(next)
    }

    /// Rate changes only affect flights written afterwards.
    pub fn update_airline(
        &mut self,
        id: &Uuid,
        patch: AirlinePatch,
    ) -> StoreResult<Arc<AirlineCatalog>> {
        let next = self.snapshot.update_airline(id, patch)?;
        self.commit(next)
    }

    fn commit(&mut self, next: AirlineCatalog) -> StoreResult<Arc<AirlineCatalog>> {
        write_record(self.backend.as_ref(), AIRLINE_STORAGE_KEY, &next)?;
        self.snapshot = Arc::new(next);
        Ok(self.snapshot())
    }
}
