//! Error types for store and handler operations.

use tessera_core::RecordId;
use thiserror::Error;

/// Errors that can occur during handler operations.
#[derive(Debug, Error)]
pub enum Error {
    /// DTO could not be converted into a record.
    #[error("Invalid data: DTO does not convert into `{0}`")]
    InvalidData(&'static str),

    /// No record matches the identifier.
    #[error("Item not found: {0}")]
    ItemNotFound(RecordId),

    /// Store rejected an insert.
    #[error("Creation failed: {0}")]
    CreationFailed(String),

    /// Store rejected an update.
    #[error("Update failed: {0}")]
    UpdateFailed(String),

    /// Store rejected a removal.
    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    /// Native DB error outside a write path.
    #[error("Database error: {0}")]
    Database(String),

    /// Invalid store configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Blocking store task did not complete.
    #[error("Executor error: {0}")]
    Executor(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for store and handler operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<native_db::db_type::Error> for Error {
    fn from(err: native_db::db_type::Error) -> Self {
        Error::Database(err.to_string())
    }
}

// Errors cross the blocking-task boundary, so they must stay Send + Sync.
fn _assert_error_send_sync<T: Send + Sync>() {}
fn _error_is_send_sync() {
    _assert_error_send_sync::<Error>();
}
