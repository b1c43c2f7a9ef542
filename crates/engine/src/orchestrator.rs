//! Run Orchestrator - Drives the resolver and executor across a run
//!
//! Resolves the pending list once against the status snapshot, initializes
//! the ledger if the database has never been migrated, then applies each
//! pending migration in order. The first failure ends the run; a later
//! invocation re-resolves from the ledger's true state, so a fixed migration
//! is retried by simply re-running.

use pgshift_core::MigrationCatalog;
use tracing::debug;

use crate::error::EngineResult;
use crate::events::MigrationObserver;
use crate::executor::MigrationExecutor;
use crate::ledger::Ledger;
use crate::resolver::eligible_migrations;
use crate::status::DatabaseStatus;

/// Outcome of a run that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunResult {
    /// Nothing was pending; the database was not touched
    UpToDate,
    /// Versions applied, in apply order
    Applied(Vec<i32>),
}

/// Drives one migration run against a status snapshot.
pub struct MigrationRunner<'a> {
    ledger: &'a dyn Ledger,
    executor: &'a dyn MigrationExecutor,
    observer: &'a dyn MigrationObserver,
}

impl<'a> MigrationRunner<'a> {
    pub fn new(
        ledger: &'a dyn Ledger,
        executor: &'a dyn MigrationExecutor,
        observer: &'a dyn MigrationObserver,
    ) -> Self {
        Self {
            ledger,
            executor,
            observer,
        }
    }

    /// Apply every pending migration up to `ceiling`, stopping on the first
    /// failure.
    ///
    /// The status snapshot is taken by the caller once per run; applied
    /// versions are tracked in memory rather than by re-querying the ledger.
    pub async fn run(
        &self,
        status: &DatabaseStatus,
        catalog: &MigrationCatalog,
        ceiling: Option<i32>,
    ) -> EngineResult<RunResult> {
        let pending = eligible_migrations(status, catalog, ceiling);

        if pending.is_empty() {
            self.observer.run_up_to_date().await;
            return Ok(RunResult::UpToDate);
        }

        debug!("{} migration(s) pending", pending.len());

        if !status.is_initialized {
            self.ledger.initialize().await?;
        }

        let mut applied = Vec::with_capacity(pending.len());

        for migration in pending {
            self.observer
                .migration_started(migration.version, &migration.name)
                .await;

            match self.executor.apply(migration).await {
                Ok(()) => {
                    self.observer
                        .migration_succeeded(migration.version, &migration.name)
                        .await;
                    applied.push(migration.version);
                }
                Err(error) => {
                    // Later migrations may depend on this one having
                    // committed; none of them are attempted.
                    self.observer
                        .migration_failed(migration.version, &migration.name, &error)
                        .await;
                    return Err(error);
                }
            }
        }

        self.observer.run_completed(&applied).await;
        Ok(RunResult::Applied(applied))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::NaiveDateTime;
    use pgshift_core::MigrationDefinition;

    use crate::error::EngineError;
    use crate::status::LedgerEntry;

    #[derive(Default)]
    struct FakeLedger {
        initialize_calls: AtomicUsize,
    }

    #[async_trait]
    impl Ledger for FakeLedger {
        async fn status(&self) -> EngineResult<DatabaseStatus> {
            Ok(DatabaseStatus::uninitialized())
        }

        async fn initialize(&self) -> EngineResult<()> {
            self.initialize_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingExecutor {
        applied: Mutex<Vec<i32>>,
        fail_on: Option<i32>,
    }

    #[async_trait]
    impl MigrationExecutor for RecordingExecutor {
        async fn apply(&self, migration: &MigrationDefinition) -> EngineResult<()> {
            if self.fail_on == Some(migration.version) {
                return Err(EngineError::Execution {
                    version: migration.version,
                    source: sqlx::Error::Protocol("statement failed".into()),
                });
            }

            self.applied.lock().unwrap().push(migration.version);
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingObserver {
        events: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingObserver {
        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MigrationObserver for RecordingObserver {
        async fn migration_started(&self, version: i32, name: &str) {
            self.events
                .lock()
                .unwrap()
                .push(format!("started {} {}", version, name));
        }

        async fn migration_succeeded(&self, version: i32, name: &str) {
            self.events
                .lock()
                .unwrap()
                .push(format!("succeeded {} {}", version, name));
        }

        async fn migration_failed(&self, version: i32, name: &str, _error: &EngineError) {
            self.events
                .lock()
                .unwrap()
                .push(format!("failed {} {}", version, name));
        }

        async fn run_up_to_date(&self) {
            self.events.lock().unwrap().push("up to date".to_string());
        }

        async fn run_completed(&self, applied: &[i32]) {
            self.events
                .lock()
                .unwrap()
                .push(format!("completed {:?}", applied));
        }
    }

    fn catalog(versions: &[i32]) -> MigrationCatalog {
        MigrationCatalog::new(
            versions
                .iter()
                .map(|&v| {
                    MigrationDefinition::new(
                        v,
                        format!("migration_{}", v),
                        String::new(),
                        vec![format!("SELECT {};", v)],
                    )
                })
                .collect(),
        )
        .unwrap()
    }

    fn initialized_at(versions: &[i32]) -> DatabaseStatus {
        DatabaseStatus {
            is_initialized: true,
            history: versions
                .iter()
                .map(|&v| LedgerEntry {
                    version: v,
                    applied_at: NaiveDateTime::parse_from_str(
                        "2024-01-01 12:00:00",
                        "%Y-%m-%d %H:%M:%S",
                    )
                    .unwrap(),
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_up_to_date_run_touches_nothing() {
        let ledger = FakeLedger::default();
        let executor = RecordingExecutor::default();
        let observer = RecordingObserver::default();
        let runner = MigrationRunner::new(&ledger, &executor, &observer);

        let result = runner
            .run(&initialized_at(&[1, 2]), &catalog(&[1, 2]), None)
            .await
            .unwrap();

        assert_eq!(result, RunResult::UpToDate);
        assert_eq!(ledger.initialize_calls.load(Ordering::SeqCst), 0);
        assert!(executor.applied.lock().unwrap().is_empty());
        assert_eq!(observer.events(), vec!["up to date"]);
    }

    #[tokio::test]
    async fn test_first_run_initializes_ledger_and_applies_everything() {
        let ledger = FakeLedger::default();
        let executor = RecordingExecutor::default();
        let observer = RecordingObserver::default();
        let runner = MigrationRunner::new(&ledger, &executor, &observer);

        let result = runner
            .run(&DatabaseStatus::uninitialized(), &catalog(&[1, 2]), None)
            .await
            .unwrap();

        assert_eq!(result, RunResult::Applied(vec![1, 2]));
        assert_eq!(ledger.initialize_calls.load(Ordering::SeqCst), 1);
        assert_eq!(*executor.applied.lock().unwrap(), vec![1, 2]);
        assert_eq!(
            observer.events(),
            vec![
                "started 1 migration_1",
                "succeeded 1 migration_1",
                "started 2 migration_2",
                "succeeded 2 migration_2",
                "completed [1, 2]",
            ]
        );
    }

    #[tokio::test]
    async fn test_initialized_database_is_not_reinitialized() {
        let ledger = FakeLedger::default();
        let executor = RecordingExecutor::default();
        let observer = RecordingObserver::default();
        let runner = MigrationRunner::new(&ledger, &executor, &observer);

        let result = runner
            .run(&initialized_at(&[1]), &catalog(&[1, 2]), None)
            .await
            .unwrap();

        assert_eq!(result, RunResult::Applied(vec![2]));
        assert_eq!(ledger.initialize_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_first_failure_stops_the_run() {
        let ledger = FakeLedger::default();
        let executor = RecordingExecutor {
            fail_on: Some(2),
            ..Default::default()
        };
        let observer = RecordingObserver::default();
        let runner = MigrationRunner::new(&ledger, &executor, &observer);

        let error = runner
            .run(&DatabaseStatus::uninitialized(), &catalog(&[1, 2, 3]), None)
            .await
            .unwrap_err();

        assert!(matches!(error, EngineError::Execution { version: 2, .. }));
        // Migration 3 was never attempted
        assert_eq!(*executor.applied.lock().unwrap(), vec![1]);
        assert_eq!(
            observer.events(),
            vec![
                "started 1 migration_1",
                "succeeded 1 migration_1",
                "started 2 migration_2",
                "failed 2 migration_2",
            ]
        );
    }

    #[tokio::test]
    async fn test_ceiling_limits_the_run() {
        let ledger = FakeLedger::default();
        let executor = RecordingExecutor::default();
        let runner = MigrationRunner::new(&ledger, &executor, &crate::events::NoopObserver);

        let result = runner
            .run(
                &initialized_at(&[1, 2, 3]),
                &catalog(&[1, 2, 3, 4, 5]),
                Some(4),
            )
            .await
            .unwrap();

        assert_eq!(result, RunResult::Applied(vec![4]));
        assert_eq!(*executor.applied.lock().unwrap(), vec![4]);
    }
}
