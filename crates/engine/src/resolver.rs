//! Eligibility Resolver - Computes the ordered pending migration list
//!
//! Pure and side-effect free; safe to call speculatively, e.g. for an
//! `info`-style preview of what a run would apply.

use pgshift_core::{MigrationCatalog, MigrationDefinition};

use crate::status::DatabaseStatus;

/// Compute the migrations still pending for `status`, in apply order.
///
/// A definition is pending when its version is strictly greater than the
/// ledger's current version (every definition, for an uninitialized or empty
/// ledger) and, when a ceiling is given, does not exceed it. Catalog order is
/// preserved: later migrations may assume earlier ones already ran.
pub fn eligible_migrations<'a>(
    status: &DatabaseStatus,
    catalog: &'a MigrationCatalog,
    ceiling: Option<i32>,
) -> Vec<&'a MigrationDefinition> {
    let current = status.current_version();

    catalog
        .iter()
        .filter(|m| current.map_or(true, |v| m.version > v))
        .filter(|m| ceiling.map_or(true, |c| m.version <= c))
        .collect()
}
