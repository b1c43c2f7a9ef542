use std::path::Path;

use pgshift_engine::{connect, eligible_migrations, DatabaseLedger, Ledger};
use serde::Serialize;

use crate::error::CliError;
use crate::loader;

#[derive(Serialize)]
struct InfoReport {
    is_initialized: bool,
    current_version: Option<i32>,
    pending_versions: Vec<i32>,
}

/// Report the database's current version and what a run would apply.
///
/// Read-only: resolves the pending list speculatively without executing
/// anything.
pub async fn run(connection_string: &str, path: &Path, json: bool) -> Result<(), CliError> {
    let catalog = loader::load_migrations(path)?;

    let pool = connect(connection_string).await?;
    let ledger = DatabaseLedger::new(pool);
    let status = ledger.status().await?;

    let pending: Vec<i32> = eligible_migrations(&status, &catalog, None)
        .iter()
        .map(|m| m.version)
        .collect();

    if json {
        let report = InfoReport {
            is_initialized: status.is_initialized,
            current_version: status.current_version(),
            pending_versions: pending,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if !status.is_initialized {
        println!("Database migration schema has not been initialized");
        return Ok(());
    }

    match status.current_version() {
        Some(version) => println!("Database version is {}", version),
        None => println!("No migrations have been applied yet"),
    }

    if pending.is_empty() {
        println!("Database is up-to-date");
    } else {
        println!("Need to apply versions {:?}", pending);
    }

    Ok(())
}
