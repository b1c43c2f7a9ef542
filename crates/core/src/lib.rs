//! # pgshift-core: Migration catalog types for pgshift
//!
//! Value types shared by the engine and the CLI: the migration definition,
//! the validated version-sorted catalog, and catalog construction errors.
//! Everything here is immutable after construction and knows nothing about
//! the database.

pub mod catalog;
pub mod error;
pub mod migration;

// Re-export core types
pub use catalog::*;
pub use error::*;
pub use migration::*;
