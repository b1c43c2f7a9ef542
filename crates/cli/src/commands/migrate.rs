use std::path::Path;

use pgshift_engine::{
    connect, DatabaseLedger, Ledger, MigrationRunner, TransactionalExecutor,
};

use crate::error::CliError;
use crate::loader;
use crate::reporter::ConsoleReporter;

/// Apply every pending migration, optionally capped at `version`.
///
/// The catalog is loaded and validated before the database is touched, and
/// the status snapshot is taken exactly once before the run starts.
pub async fn run(
    connection_string: &str,
    path: &Path,
    dry_run: bool,
    version: Option<i32>,
) -> Result<(), CliError> {
    let catalog = loader::load_migrations(path)?;

    let pool = connect(connection_string).await?;
    let ledger = DatabaseLedger::new(pool.clone());
    let status = ledger.status().await?;

    let executor = TransactionalExecutor::new(pool, dry_run);
    let reporter = ConsoleReporter;
    let runner = MigrationRunner::new(&ledger, &executor, &reporter);

    runner.run(&status, &catalog, version).await?;

    Ok(())
}
