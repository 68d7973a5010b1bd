//! In-memory record store.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;
use workbee_core::records::{TABLES, unique_key};
use workbee_core::{Ack, Error, RecordStore, Result};

use crate::StoreError;

/// Record store keeping rows per table in memory.
///
/// Only the known tables are accepted, and their unique columns are
/// enforced the way the database schema does.
#[derive(Default)]
pub struct MemoryRecordStore {
    tables: RwLock<HashMap<String, Vec<Value>>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows inserted into `table`, in insertion order.
    pub async fn rows(&self, table: &str) -> Vec<Value> {
        self.tables
            .read()
            .await
            .get(table)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn insert(&self, table: &str, record: Value) -> Result<Ack> {
        if !TABLES.contains(&table) {
            return Err(StoreError::UnknownTable(table.to_string()).into());
        }

        let mut tables = self.tables.write().await;
        let rows = tables.entry(table.to_string()).or_default();

        if let Some(column) = unique_key(table) {
            if let Some(key) = record.get(column) {
                if rows.iter().any(|row| row.get(column) == Some(key)) {
                    return Err(Error::DuplicateKey {
                        table: table.to_string(),
                        key: display_key(key),
                    });
                }
            }
        }

        rows.push(record);
        debug!(table, rows = rows.len(), "Record stored");
        Ok(Ack {
            table: table.to_string(),
            stored_at: Utc::now(),
        })
    }
}

fn display_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
