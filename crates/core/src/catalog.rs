//! Migration Catalog - Validated, version-sorted collection of definitions
//!
//! The catalog is created once per run from already-parsed definitions and
//! never mutated afterwards. Construction enforces the invariants the rest
//! of the system relies on: versions are pairwise distinct and non-negative,
//! every definition has at least one statement, and iteration order is
//! ascending by version.

use std::collections::HashSet;

use crate::error::CatalogError;
use crate::migration::MigrationDefinition;

/// Immutable collection of migration definitions, sorted ascending by version.
#[derive(Debug, Clone)]
pub struct MigrationCatalog {
    migrations: Vec<MigrationDefinition>,
}

impl MigrationCatalog {
    /// Validate and sort a set of definitions into a catalog.
    ///
    /// Fails on a duplicate or negative version, or on a definition with an
    /// empty statement list.
    pub fn new(mut migrations: Vec<MigrationDefinition>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(migrations.len());

        for migration in &migrations {
            if migration.version < 0 {
                return Err(CatalogError::NegativeVersion {
                    version: migration.version,
                    name: migration.name.clone(),
                });
            }
            if migration.statements.is_empty() {
                return Err(CatalogError::EmptyStatements {
                    version: migration.version,
                    name: migration.name.clone(),
                });
            }
            if !seen.insert(migration.version) {
                return Err(CatalogError::DuplicateVersion(migration.version));
            }
        }

        // Apply order is version order; the resolver depends on this
        migrations.sort_by_key(|m| m.version);

        Ok(Self { migrations })
    }

    /// Iterate definitions in ascending version order.
    pub fn iter(&self) -> impl Iterator<Item = &MigrationDefinition> {
        self.migrations.iter()
    }

    /// Number of definitions in the catalog.
    pub fn len(&self) -> usize {
        self.migrations.len()
    }

    /// Whether the catalog holds no definitions.
    pub fn is_empty(&self) -> bool {
        self.migrations.is_empty()
    }

    /// Highest version in the catalog, or `None` when empty.
    pub fn latest_version(&self) -> Option<i32> {
        self.migrations.last().map(|m| m.version)
    }
}
