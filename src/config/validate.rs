// src/config/validate.rs

use crate::config::defaults::builtin_settings;
use crate::config::model::{MetadataTable, RawMetadataFile, Settings};
use crate::errors::{DirectiveError, Result};

impl TryFrom<RawMetadataFile> for MetadataTable {
    type Error = crate::errors::DirectiveError;

    fn try_from(raw: RawMetadataFile) -> std::result::Result<Self, Self::Error> {
        let base = MetadataTable::builtin();

        let mut extensions = base.extensions;
        extensions.extend(raw.extensions);

        let mut executables = base.default_executables;
        executables.merge(raw.default_executables);

        let mut options = base.default_options;
        options.merge(raw.default_options);

        let defaults = builtin_settings();
        let settings = Settings {
            output_dir: raw.settings.output_dir.unwrap_or(defaults.output_dir),
            temp_dir: raw.settings.temp_dir.unwrap_or(defaults.temp_dir),
            makelog: raw.settings.makelog.unwrap_or(defaults.makelog),
        };

        let table = MetadataTable::new_unchecked(extensions, executables, options, settings);
        validate_table(&table)?;
        Ok(table)
    }
}

fn validate_table(table: &MetadataTable) -> Result<()> {
    validate_extensions(table)?;
    validate_settings(&table.settings)?;
    Ok(())
}

fn validate_extensions(table: &MetadataTable) -> Result<()> {
    for (app, ext) in table.extensions.iter() {
        if !ext.starts_with('.') || ext.len() < 2 {
            return Err(DirectiveError::ConfigError(format!(
                "[extensions].{app} must look like \".ext\" (got {ext:?})"
            )));
        }
    }
    Ok(())
}

fn validate_settings(settings: &Settings) -> Result<()> {
    let named = [
        ("output_dir", &settings.output_dir),
        ("temp_dir", &settings.temp_dir),
        ("makelog", &settings.makelog),
    ];
    for (key, value) in named {
        if value.as_os_str().is_empty() {
            return Err(DirectiveError::ConfigError(format!(
                "[settings].{key} must not be empty"
            )));
        }
    }
    Ok(())
}
