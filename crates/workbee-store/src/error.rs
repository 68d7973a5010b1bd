//! Store error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unknown table: {0}")]
    UnknownTable(String),

    #[error("invalid column name: {0}")]
    InvalidColumn(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("password hashing failed: {0}")]
    Hash(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

impl From<StoreError> for workbee_core::Error {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::UnknownTable(table) => workbee_core::Error::NotFound(format!("table {}", table)),
            StoreError::InvalidColumn(column) => {
                workbee_core::Error::Validation(format!("invalid column name: {}", column))
            }
            other => workbee_core::Error::Internal(other.to_string()),
        }
    }
}
