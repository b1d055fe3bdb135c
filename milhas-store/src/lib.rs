pub mod airline_store;
pub mod app_config;
pub mod json_store;
pub mod memory_store;
pub mod record;
pub mod workspace_store;

pub use airline_store::AirlineStore;
pub use json_store::JsonFileStore;
pub use memory_store::MemoryStore;
pub use workspace_store::WorkspaceStore;

use milhas_catalog::CatalogError;
use milhas_planner::{PlannerError, ShareError};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage backend error: {0}")]
    Backend(Box<dyn std::error::Error + Send + Sync>),

    #[error("Stored record {key} is corrupt: {source}")]
    Corrupt {
        key: String,
        source: serde_json::Error,
    },

    #[error("Failed to serialize record {key}: {source}")]
    Serialize {
        key: String,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Planner(#[from] PlannerError),

    #[error(transparent)]
    Share(#[from] ShareError),
}

pub type StoreResult<T> = Result<T, StoreError>;
