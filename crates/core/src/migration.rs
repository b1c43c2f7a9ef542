//! Migration Definition - The unit of schema change
//!
//! A migration definition is a versioned, named group of SQL statements that
//! is applied to the database as one atomic unit and recorded in the ledger
//! under its version number.

use serde::{Deserialize, Serialize};

/// Represents a single versioned schema change.
///
/// The serde field names follow the migration file format: the statement
/// list is stored under the `migration` key, with optional `verify` and
/// `undo` statement lists alongside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationDefinition {
    /// Unique, non-negative version number; defines apply order
    pub version: i32,
    /// Human-readable name for display
    pub name: String,
    /// Longer description for display
    pub description: String,
    /// SQL statements applied in listed order, never empty
    #[serde(rename = "migration")]
    pub statements: Vec<String>,
    /// Statements reserved for post-apply verification; not executed
    #[serde(default)]
    pub verify: Vec<String>,
    /// Statements reserved for future rollback support; not executed
    #[serde(default)]
    pub undo: Vec<String>,
}

impl MigrationDefinition {
    /// Create a definition with no verify or undo statements.
    pub fn new(
        version: i32,
        name: impl Into<String>,
        description: impl Into<String>,
        statements: Vec<String>,
    ) -> Self {
        Self {
            version,
            name: name.into(),
            description: description.into(),
            statements,
            verify: Vec::new(),
            undo: Vec::new(),
        }
    }
}
