use thiserror::Error;

/// Errors raised while constructing a migration catalog.
///
/// These are surfaced before any database interaction: a catalog that fails
/// construction never reaches the engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("migration version {0} is defined more than once")]
    DuplicateVersion(i32),

    #[error("migration '{name}' has a negative version: {version}")]
    NegativeVersion { version: i32, name: String },

    #[error("migration '{name}' ({version}) has no statements")]
    EmptyStatements { version: i32, name: String },
}
