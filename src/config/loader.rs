// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::model::{MetadataTable, RawMetadataFile};
use crate::errors::Result;

/// Load a metadata override file and return the raw `RawMetadataFile`.
///
/// This only performs TOML deserialization; merging and validation happen in
/// [`load_and_validate`].
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawMetadataFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let raw: RawMetadataFile = toml::from_str(&contents)?;

    Ok(raw)
}

/// Load an override file, merge it over the built-in table and validate.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<MetadataTable> {
    let raw = load_from_path(&path)?;
    debug!(path = %path.as_ref().display(), "loaded metadata overrides");
    MetadataTable::try_from(raw)
}

/// The table for an optional `--metadata` argument.
pub fn load_or_builtin(path: Option<&Path>) -> Result<MetadataTable> {
    match path {
        Some(path) => load_and_validate(path),
        None => Ok(MetadataTable::builtin()),
    }
}
