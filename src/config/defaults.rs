// src/config/defaults.rs

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::model::{MetadataTable, PerOs, Settings};

// (application, extension, posix executable, posix option, nt executable, nt option)
const BUILTIN: &[(&str, &str, &str, &str, &str, &str)] = &[
    ("stata", ".do", "stata-mp", "-e", "%STATAEXE%", "/e"),
    ("matlab", ".m", "matlab", "-nosplash -nodesktop", "matlab", "-nosplash -minimize -wait"),
    ("perl", ".pl", "perl", "", "perl", ""),
    ("python", ".py", "python", "", "python", ""),
    ("math", ".m", "math", "-noprompt", "math", "-noprompt"),
    ("st", ".stc", "st", "", "st", ""),
    ("lyx", ".lyx", "lyx", "-e pdf2", "lyx", "-e pdf2"),
    ("r", ".R", "Rscript", "--no-save", "Rscript", "--no-save"),
    ("sas", ".sas", "sas", "", "sas", "-nosplash"),
];

pub(crate) fn builtin_settings() -> Settings {
    Settings {
        output_dir: PathBuf::from("../output/"),
        temp_dir: PathBuf::from("../temp/"),
        makelog: PathBuf::from("../log/make.log"),
    }
}

impl MetadataTable {
    /// The table used when no override file is given.
    pub fn builtin() -> Self {
        let mut extensions = BTreeMap::new();
        let mut executables = PerOs::default();
        let mut options = PerOs::default();

        for &(app, ext, posix_exe, posix_opt, nt_exe, nt_opt) in BUILTIN {
            extensions.insert(app.to_string(), ext.to_string());
            executables.posix.insert(app.to_string(), posix_exe.to_string());
            executables.nt.insert(app.to_string(), nt_exe.to_string());
            options.posix.insert(app.to_string(), posix_opt.to_string());
            options.nt.insert(app.to_string(), nt_opt.to_string());
        }

        MetadataTable::new_unchecked(extensions, executables, options, builtin_settings())
    }
}

impl Default for MetadataTable {
    fn default() -> Self {
        MetadataTable::builtin()
    }
}
