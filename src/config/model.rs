// src/config/model.rs

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::errors::{DirectiveError, Result};
use crate::types::OsName;

/// Metadata override file as read from TOML.
///
/// Every section is optional; whatever is present is merged over the
/// built-in table:
///
/// ```toml
/// [extensions]
/// julia = ".jl"
///
/// [default_executables.posix]
/// julia = "julia"
/// stata = "stata-se"
///
/// [default_options.nt]
/// julia = "--quiet"
///
/// [settings]
/// output_dir = "../output/"
/// temp_dir = "../temp/"
/// makelog = "../log/make.log"
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct RawMetadataFile {
    /// Required program extension per application, with the leading dot.
    #[serde(default)]
    pub extensions: BTreeMap<String, String>,

    #[serde(default)]
    pub default_executables: PerOs,

    #[serde(default)]
    pub default_options: PerOs,

    #[serde(default)]
    pub settings: RawSettings,
}

/// One string table per operating-system family.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PerOs {
    #[serde(default)]
    pub posix: BTreeMap<String, String>,
    #[serde(default)]
    pub nt: BTreeMap<String, String>,
}

impl PerOs {
    pub fn for_os(&self, os: OsName) -> &BTreeMap<String, String> {
        match os {
            OsName::Posix => &self.posix,
            OsName::Nt => &self.nt,
        }
    }

    /// Overlay `other` on top of `self`, entry by entry.
    pub fn merge(&mut self, other: PerOs) {
        self.posix.extend(other.posix);
        self.nt.extend(other.nt);
    }
}

/// `[settings]` section as written in a file; unset keys keep the built-in.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct RawSettings {
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
    #[serde(default)]
    pub makelog: Option<PathBuf>,
}

/// Directory settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub output_dir: PathBuf,
    pub temp_dir: PathBuf,
    /// Makelog used when a caller does not name one.
    pub makelog: PathBuf,
}

/// Validated metadata table.
///
/// Construct via [`MetadataTable::builtin`] or
/// `MetadataTable::try_from(RawMetadataFile)`.
#[derive(Debug, Clone)]
pub struct MetadataTable {
    pub(crate) extensions: BTreeMap<String, String>,
    pub(crate) default_executables: PerOs,
    pub(crate) default_options: PerOs,
    pub(crate) settings: Settings,
}

impl MetadataTable {
    pub(crate) fn new_unchecked(
        extensions: BTreeMap<String, String>,
        default_executables: PerOs,
        default_options: PerOs,
        settings: Settings,
    ) -> Self {
        Self {
            extensions,
            default_executables,
            default_options,
            settings,
        }
    }

    /// Required extension (with leading dot) for `application`.
    pub fn extension(&self, application: &str) -> Result<&str> {
        lookup(&self.extensions, application, "extensions")
    }

    pub fn default_executable(&self, os: OsName, application: &str) -> Result<&str> {
        lookup(
            self.default_executables.for_os(os),
            application,
            &format!("default_executables.{os}"),
        )
    }

    pub fn default_option(&self, os: OsName, application: &str) -> Result<&str> {
        lookup(
            self.default_options.for_os(os),
            application,
            &format!("default_options.{os}"),
        )
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Application names known to the table, sorted.
    pub fn applications(&self) -> impl Iterator<Item = &str> {
        self.extensions.keys().map(String::as_str)
    }
}

fn lookup<'a>(table: &'a BTreeMap<String, String>, application: &str, name: &str) -> Result<&'a str> {
    table
        .get(application)
        .map(String::as_str)
        .ok_or_else(|| DirectiveError::UnknownApplication {
            application: application.to_string(),
            table: name.to_string(),
        })
}
