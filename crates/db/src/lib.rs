//! Postgres persistence for the booking engine, plus the in-memory and
//! mockall test doubles that implement the same store traits.

pub mod mock;
pub mod models;
pub mod repositories;
pub mod schema;

use eyre::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

pub type DbPool = Pool<Postgres>;

const MAX_POOL_CONNECTIONS: u32 = 5;

/// Opens a connection pool against `database_url`.
pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(MAX_POOL_CONNECTIONS)
        .connect(database_url)
        .await?;
    Ok(pool)
}
