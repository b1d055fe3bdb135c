use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use milhas_core::KeyValueStore;
use tracing::{debug, info};

/// One `<key>.json` file per record inside a data directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Opens the store, creating the directory when needed.
    pub fn open(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
            info!("Created data directory {}", dir.display());
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, Box<dyn std::error::Error + Send + Sync>> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(format!("Invalid record key: {key:?}").into());
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(
        &self,
        key: &str,
    ) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let path = self.path_for(key)?;
        // Write-then-rename so a crash never leaves a half-written record
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;

        debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("nested")).unwrap();

        assert_eq!(store.get("airline-storage").unwrap(), None);

        store.set("airline-storage", r#"{"state":{}}"#).unwrap();
        assert_eq!(
            store.get("airline-storage").unwrap().as_deref(),
            Some(r#"{"state":{}}"#)
        );
        assert!(store.dir().join("airline-storage.json").exists());
        assert!(!store.dir().join("airline-storage.json.tmp").exists());

        store.set("airline-storage", r#"{"state":{"airlines":[]}}"#).unwrap();
        assert_eq!(
            store.get("airline-storage").unwrap().as_deref(),
            Some(r#"{"state":{"airlines":[]}}"#)
        );
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();

        assert!(store.set("../escape", "x").is_err());
        assert!(store.get("").is_err());
    }
}
