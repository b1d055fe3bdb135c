pub mod codec;
pub mod currency;
pub mod datetime;
pub mod repository;

pub use repository::{KeyValueStore, AIRLINE_STORAGE_KEY, WORKSPACE_STORAGE_KEY};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The message is shown to the user as-is.
    #[error("{0}")]
    DecodingError(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
