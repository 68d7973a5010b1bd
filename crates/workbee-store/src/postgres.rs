//! PostgreSQL record store.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::PgPool;
use tracing::{debug, info};
use workbee_core::records::{TABLES, unique_key};
use workbee_core::{Ack, Error, RecordStore, Result};

use crate::{StoreError, StoreResult};

/// SQLSTATE for a unique constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

/// Record store writing each record as one row of its table.
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_column_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_lowercase() || c == '_')
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// Build the insert statement for `record`.
///
/// Only the record's own keys are listed so column defaults still apply.
/// Table and column names are interpolated, so both are checked first.
fn insert_sql(table: &str, record: &Value) -> StoreResult<String> {
    if !TABLES.contains(&table) {
        return Err(StoreError::UnknownTable(table.to_string()));
    }
    let Some(object) = record.as_object() else {
        return Err(StoreError::InvalidColumn("record is not an object".to_string()));
    };

    let mut columns = Vec::with_capacity(object.len());
    for key in object.keys() {
        if !is_column_name(key) {
            return Err(StoreError::InvalidColumn(key.clone()));
        }
        columns.push(key.as_str());
    }
    let columns = columns.join(", ");

    Ok(format!(
        "INSERT INTO {table} ({columns}) SELECT {columns} FROM jsonb_populate_record(NULL::{table}, $1)"
    ))
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn insert(&self, table: &str, record: Value) -> Result<Ack> {
        let sql = insert_sql(table, &record)?;
        let key = unique_key(table)
            .and_then(|column| record.get(column))
            .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()));

        let result = sqlx::query(&sql).bind(record).execute(&self.pool).await;
        match result {
            Ok(_) => {
                debug!(table, "Record stored");
                Ok(Ack {
                    table: table.to_string(),
                    stored_at: Utc::now(),
                })
            }
            Err(sqlx::Error::Database(db)) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                info!(table, constraint = ?db.constraint(), "Duplicate record rejected");
                Err(Error::DuplicateKey {
                    table: table.to_string(),
                    key: key.unwrap_or_else(|| db.constraint().unwrap_or("unique").to_string()),
                })
            }
            Err(e) => Err(StoreError::from(e).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_sql_lists_record_columns() {
        let sql = insert_sql(
            "waitlist_signups",
            &json!({ "email": "a@b.co", "signup_type": "general" }),
        )
        .unwrap();
        assert_eq!(
            sql,
            "INSERT INTO waitlist_signups (email, signup_type) SELECT email, signup_type \
             FROM jsonb_populate_record(NULL::waitlist_signups, $1)"
        );
    }

    #[test]
    fn test_insert_sql_rejects_unknown_table() {
        let err = insert_sql("pg_authid", &json!({ "a": 1 })).unwrap_err();
        assert!(matches!(err, StoreError::UnknownTable(_)));
    }

    #[test]
    fn test_insert_sql_rejects_bad_columns() {
        for key in ["email; DROP TABLE x", "Email", "1st", ""] {
            let mut record = serde_json::Map::new();
            record.insert(key.to_string(), json!("x"));
            let err = insert_sql("contact_messages", &Value::Object(record)).unwrap_err();
            assert!(matches!(err, StoreError::InvalidColumn(_)), "{key}");
        }
        assert!(insert_sql("contact_messages", &json!(["not", "an", "object"])).is_err());
    }
}
