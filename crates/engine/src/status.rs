//! Database Status - Snapshot of the applied-version ledger
//!
//! A status is taken once when a run connects and is never live-updated:
//! migrations applied during the run are tracked in memory by the
//! orchestrator, not by re-querying the ledger.

use chrono::NaiveDateTime;
use serde::Serialize;

/// One committed migration as recorded in the ledger.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerEntry {
    /// Applied migration version
    pub version: i32,
    /// When the migration committed, per the database server's clock
    pub applied_at: NaiveDateTime,
}

/// Snapshot of the target database's migration state.
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseStatus {
    /// Whether the ledger table exists
    pub is_initialized: bool,
    /// All recorded applications; order is irrelevant
    pub history: Vec<LedgerEntry>,
}

impl DatabaseStatus {
    /// Status of a database the tool has never touched.
    pub fn uninitialized() -> Self {
        Self {
            is_initialized: false,
            history: Vec::new(),
        }
    }

    /// Highest applied version, or `None` for an empty or missing ledger.
    pub fn current_version(&self) -> Option<i32> {
        self.history.iter().map(|entry| entry.version).max()
    }
}
