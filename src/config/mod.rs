// src/config/mod.rs

//! Metadata table: default executables, options and file extensions per
//! application, plus the directory settings directives fall back on.
//!
//! - [`model`] holds the serde model and lookup methods.
//! - [`defaults`] is the built-in table.
//! - [`loader`] reads a TOML override file.
//! - [`validate`] merges overrides over the built-ins and checks them.

pub mod defaults;
pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_or_builtin};
pub use model::{MetadataTable, PerOs, RawMetadataFile, RawSettings, Settings};
