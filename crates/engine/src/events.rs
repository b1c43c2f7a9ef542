use async_trait::async_trait;

use crate::error::EngineError;

/// Receives progress events as a run advances.
///
/// Every method defaults to a no-op so implementations only override the
/// events they care about. The engine emits events in run order: one
/// started/succeeded (or started/failed) pair per migration, then either
/// `run_up_to_date` or `run_completed` exactly once.
#[async_trait]
pub trait MigrationObserver: Send + Sync {
    async fn migration_started(&self, _version: i32, _name: &str) {}

    async fn migration_succeeded(&self, _version: i32, _name: &str) {}

    async fn migration_failed(&self, _version: i32, _name: &str, _error: &EngineError) {}

    async fn run_up_to_date(&self) {}

    async fn run_completed(&self, _applied: &[i32]) {}
}

/// Observer that discards every event.
pub struct NoopObserver;

#[async_trait]
impl MigrationObserver for NoopObserver {}
