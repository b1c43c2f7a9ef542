//! Database Connection - Pool acquisition for a migration run
//!
//! A run owns exactly one connection for its whole duration. The pool exists
//! for sqlx plumbing, not for parallelism, so it is capped at a single
//! connection.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

/// Connect to the target database with a single-connection pool.
pub async fn connect(connection_string: &str) -> EngineResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(connection_string)
        .await
        .map_err(EngineError::Connection)?;

    debug!("Connected to database");
    Ok(pool)
}
