//! Console Reporter - Renders run events for the terminal

use async_trait::async_trait;
use console::style;
use pgshift_engine::{EngineError, MigrationObserver};

/// Observer that prints one line per run event.
pub struct ConsoleReporter;

#[async_trait]
impl MigrationObserver for ConsoleReporter {
    async fn migration_started(&self, version: i32, name: &str) {
        println!("Applying migration {} ({})", name, version);
    }

    async fn migration_succeeded(&self, version: i32, name: &str) {
        println!(
            "{}",
            style(format!("Migration {} ({}) ran successfully", name, version)).green()
        );
    }

    async fn migration_failed(&self, version: i32, name: &str, error: &EngineError) {
        eprintln!(
            "{}",
            style(format!(
                "Error running migration {} ({}): {}",
                name, version, error
            ))
            .red()
        );
    }

    async fn run_up_to_date(&self) {
        println!("Database is up-to-date");
    }

    async fn run_completed(&self, _applied: &[i32]) {
        println!(
            "{}",
            style("Finished executing all migrations successfully").green()
        );
    }
}
