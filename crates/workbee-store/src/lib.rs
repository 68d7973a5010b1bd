//! Storage backends for WorkBee.
//!
//! Implements the identity provider and record store traits from
//! `workbee-core`, in memory and on PostgreSQL.

pub mod error;
pub mod identity;
pub mod memory;
pub mod postgres;

pub use error::{StoreError, StoreResult};
pub use identity::MemoryIdentityProvider;
pub use memory::MemoryRecordStore;
pub use postgres::PgRecordStore;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Create a new database connection pool.
pub async fn create_pool(database_url: &str) -> StoreResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Run database migrations.
pub async fn run_migrations(pool: &PgPool) -> StoreResult<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
