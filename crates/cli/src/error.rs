use std::path::PathBuf;

use pgshift_core::CatalogError;
use pgshift_engine::EngineError;
use thiserror::Error;

/// Errors surfaced by the CLI layer.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse migration file {}: {}", .path.display(), .source)]
    MigrationFile {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}
