/// Record holding the airline collection
pub const AIRLINE_STORAGE_KEY: &str = "airline-storage";

/// Record holding the workspace collection and the active-workspace pointer
pub const WORKSPACE_STORAGE_KEY: &str = "workspace-storage";

/// Key-value persistence for the application's records.
///
/// Values are opaque text; callers own their serialization.
pub trait KeyValueStore: Send + Sync {
    fn get(
        &self,
        key: &str,
    ) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>>;

    fn set(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
