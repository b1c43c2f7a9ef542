//! Ledger - The persistent record of applied migration versions
//!
//! The ledger lives in the target database itself, in a fixed tracking table.
//! It is read-only from the engine's perspective except for table creation
//! and the single insert the executor performs atomically with each
//! migration's statements.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::status::{DatabaseStatus, LedgerEntry};

/// Name of the tracking table; a reserved identifier on the target database.
pub const LEDGER_TABLE: &str = "schema_history";

/// Access to the applied-version ledger.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Snapshot the database's migration state.
    ///
    /// A missing tracking table is a fresh database, not an error.
    async fn status(&self) -> EngineResult<DatabaseStatus>;

    /// Create the tracking table. Called at most once per run, only after
    /// `status` reported an uninitialized database.
    async fn initialize(&self) -> EngineResult<()>;
}

/// Ledger implementation backed by the target PostgreSQL database.
pub struct DatabaseLedger {
    pool: PgPool,
}

impl DatabaseLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn table_exists(&self) -> EngineResult<bool> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT FROM information_schema.tables WHERE table_name = $1)",
        )
        .bind(LEDGER_TABLE)
        .fetch_one(&self.pool)
        .await
        .map_err(EngineError::Connection)
    }
}

#[async_trait]
impl Ledger for DatabaseLedger {
    async fn status(&self) -> EngineResult<DatabaseStatus> {
        if !self.table_exists().await? {
            debug!("Ledger table '{}' does not exist", LEDGER_TABLE);
            return Ok(DatabaseStatus::uninitialized());
        }

        let rows = sqlx::query(&select_history_sql())
            .fetch_all(&self.pool)
            .await
            .map_err(EngineError::Connection)?;

        let mut history = Vec::with_capacity(rows.len());
        for row in rows {
            history.push(LedgerEntry {
                version: row.try_get("version").map_err(EngineError::Connection)?,
                applied_at: row.try_get("timestamp").map_err(EngineError::Connection)?,
            });
        }

        debug!("Read {} ledger entries", history.len());
        Ok(DatabaseStatus {
            is_initialized: true,
            history,
        })
    }

    async fn initialize(&self) -> EngineResult<()> {
        sqlx::query(&create_ledger_table_sql())
            .execute(&self.pool)
            .await
            .map_err(|e| EngineError::Schema {
                table: LEDGER_TABLE.to_string(),
                source: e,
            })?;

        debug!("Created ledger table '{}'", LEDGER_TABLE);
        Ok(())
    }
}

/// DDL for the tracking table. No primary key or uniqueness constraint:
/// at-most-once application is enforced by the resolver, not the database.
fn create_ledger_table_sql() -> String {
    format!(
        "CREATE TABLE {} (version integer, timestamp timestamp without time zone)",
        LEDGER_TABLE
    )
}

fn select_history_sql() -> String {
    format!("SELECT version, timestamp FROM {}", LEDGER_TABLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_sql_generation() {
        let create_sql = create_ledger_table_sql();
        assert!(create_sql.contains("CREATE TABLE schema_history"));
        assert!(create_sql.contains("version integer"));
        assert!(create_sql.contains("timestamp timestamp without time zone"));

        let select_sql = select_history_sql();
        assert_eq!(select_sql, "SELECT version, timestamp FROM schema_history");
    }
}
