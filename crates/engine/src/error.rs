use thiserror::Error;

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised while running migrations.
///
/// Every variant is fatal to the current run: the orchestrator never
/// continues past a failed migration, and retries are an operator action.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The database could not be reached, or the ledger could not be read
    #[error("Database connection error: {0}")]
    Connection(#[source] sqlx::Error),

    /// Creating the ledger table failed
    #[error("Failed to create ledger table '{table}': {source}")]
    Schema { table: String, source: sqlx::Error },

    /// A migration's statements or its ledger insert failed; the
    /// transaction was rolled back and the database is as it was before
    /// the migration started
    #[error("Migration {version} failed: {source}")]
    Execution { version: i32, source: sqlx::Error },
}
