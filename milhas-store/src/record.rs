//! Envelope every record is stored in: `{ "state": ..., "version": 0 }`.

use milhas_core::KeyValueStore;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::{StoreError, StoreResult};

pub const RECORD_VERSION: u32 = 0;

#[derive(Debug, Serialize, Deserialize)]
pub struct PersistedRecord<T> {
    pub state: T,
    #[serde(default)]
    pub version: u32,
}

pub fn read_record<T: DeserializeOwned>(
    backend: &dyn KeyValueStore,
    key: &str,
) -> StoreResult<Option<T>> {
    let Some(raw) = backend.get(key).map_err(StoreError::Backend)? else {
        debug!("No stored record for {}", key);
        return Ok(None);
    };

    let record: PersistedRecord<T> =
        serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
            key: key.to_string(),
            source,
        })?;
    Ok(Some(record.state))
}

pub fn write_record<T: Serialize>(
    backend: &dyn KeyValueStore,
    key: &str,
    state: &T,
) -> StoreResult<()> {
    let record = PersistedRecord {
        state,
        version: RECORD_VERSION,
    };
    let raw = serde_json::to_string(&record).map_err(|source| StoreError::Serialize {
        key: key.to_string(),
        source,
    })?;

    backend.set(key, &raw).map_err(StoreError::Backend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use milhas_planner::WorkspaceBook;

    #[test]
    fn test_record_envelope() {
        let backend = MemoryStore::new();
        let (book, _) = WorkspaceBook::default().add_workspace("Trip", vec![]);

        write_record(&backend, "workspace-storage", &book).unwrap();

        let raw = backend.get("workspace-storage").unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["version"], 0);
        assert_eq!(json["state"]["workspaces"][0]["name"], "Trip");

        let back: WorkspaceBook = read_record(&backend, "workspace-storage").unwrap().unwrap();
        assert_eq!(back, book);
    }

    #[test]
    fn test_missing_record() {
        let backend = MemoryStore::new();
        let missing: Option<WorkspaceBook> = read_record(&backend, "workspace-storage").unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_corrupt_record() {
        let backend = MemoryStore::new();
        backend.set("airline-storage", "{oops").unwrap();

        let result: StoreResult<Option<WorkspaceBook>> = read_record(&backend, "airline-storage");
        assert!(matches!(result, Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn test_reads_browser_record_without_version() {
        let backend = MemoryStore::new();
        backend
            .set("workspace-storage", r#"{"state":{"workspaces":[],"activeWorkspaceId":null}}"#)
            .unwrap();

        let book: WorkspaceBook = read_record(&backend, "workspace-storage").unwrap().unwrap();
        assert!(book.is_empty());
    }
}
