//! Migration File Loader - Reads YAML definitions into a catalog
//!
//! Walks the migrations directory recursively, deserializes every `.yml` /
//! `.yaml` file into a definition, and hands the lot to catalog construction
//! for validation. File names carry no meaning; ordering comes from the
//! version numbers inside the files.

use std::fs;
use std::path::{Path, PathBuf};

use pgshift_core::{MigrationCatalog, MigrationDefinition};
use tracing::debug;

use crate::error::CliError;

/// Load every migration definition under `path` into a validated catalog.
pub fn load_migrations(path: &Path) -> Result<MigrationCatalog, CliError> {
    let mut files = Vec::new();
    collect_migration_files(path, &mut files)?;
    files.sort();

    let mut definitions = Vec::with_capacity(files.len());
    for file in files {
        let content = fs::read_to_string(&file)?;
        let definition: MigrationDefinition =
            serde_yaml::from_str(&content).map_err(|source| CliError::MigrationFile {
                path: file.clone(),
                source,
            })?;

        debug!(
            "Loaded migration {} from {}",
            definition.version,
            file.display()
        );
        definitions.push(definition);
    }

    Ok(MigrationCatalog::new(definitions)?)
}

fn collect_migration_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), CliError> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_migration_files(&path, files)?;
        } else if path
            .extension()
            .map_or(false, |ext| ext == "yml" || ext == "yaml")
        {
            files.push(path);
        }
    }

    Ok(())
}
