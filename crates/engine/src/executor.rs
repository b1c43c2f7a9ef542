//! Transactional Executor - Applies one migration atomically
//!
//! All of a migration's statements and its ledger insert run in a single
//! transaction: there is no state where the statements committed but the
//! version was not recorded, or vice versa. Dry-run mode executes the full
//! transaction and then always rolls it back, so SQL errors surface without
//! anything persisting.

use async_trait::async_trait;
use pgshift_core::MigrationDefinition;
use sqlx::PgPool;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::ledger::LEDGER_TABLE;

/// Applies a single migration as one atomic unit.
#[async_trait]
pub trait MigrationExecutor: Send + Sync {
    /// Run the migration's statements and record its version in the ledger.
    ///
    /// On any failure the transaction is rolled back and the database is
    /// left exactly as it was before the migration started.
    async fn apply(&self, migration: &MigrationDefinition) -> EngineResult<()>;
}

/// Executor backed by the target PostgreSQL database.
pub struct TransactionalExecutor {
    pool: PgPool,
    dry_run: bool,
}

impl TransactionalExecutor {
    pub fn new(pool: PgPool, dry_run: bool) -> Self {
        Self { pool, dry_run }
    }
}

#[async_trait]
impl MigrationExecutor for TransactionalExecutor {
    async fn apply(&self, migration: &MigrationDefinition) -> EngineResult<()> {
        let version = migration.version;
        let fail = move |source| EngineError::Execution { version, source };

        // Returning early drops the transaction, which rolls it back.
        let mut tx = self.pool.begin().await.map_err(fail)?;

        for statement in &migration.statements {
            sqlx::query(statement)
                .execute(&mut *tx)
                .await
                .map_err(fail)?;
            debug!("Executed statement for migration {}: {}", version, statement);
        }

        // The version row uses the database server's clock, so host clock
        // skew never enters the ledger.
        sqlx::query(&record_version_sql())
            .bind(version)
            .execute(&mut *tx)
            .await
            .map_err(fail)?;

        if self.dry_run {
            tx.rollback().await.map_err(fail)?;
            debug!("Dry run, rolled back migration {}", version);
        } else {
            tx.commit().await.map_err(fail)?;
            debug!("Committed migration {}", version);
        }

        Ok(())
    }
}

fn record_version_sql() -> String {
    format!(
        "INSERT INTO {} (version, timestamp) VALUES ($1, CURRENT_TIMESTAMP)",
        LEDGER_TABLE
    )
}
