//! Record store abstraction.
//!
//! An insert-only table API. Duplicate keys surface as
//! [`Error::DuplicateKey`](crate::Error::DuplicateKey).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::records::Record;

/// Acknowledgement of a stored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ack {
    pub table: String,
    pub stored_at: DateTime<Utc>,
}

/// Trait for record store backends.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert one record into `table`.
    async fn insert(&self, table: &str, record: serde_json::Value) -> Result<Ack>;
}

/// Validate a typed record and insert it into its table.
pub async fn insert_record<R>(store: &dyn RecordStore, record: &R) -> Result<Ack>
where
    R: Record + Serialize + Sync,
{
    record.validate()?;
    let value = serde_json::to_value(record)
        .map_err(|e| crate::Error::Internal(format!("failed to encode record: {}", e)))?;
    store.insert(R::TABLE, value).await
}
