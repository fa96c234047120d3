// src/directive/program.rs

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::MetadataTable;
use crate::directive::{ApplicationKind, Directive};
use crate::errors::{DirectiveError, Result};
use crate::exec::ExecOutcome;
use crate::paths::{norm_path, ProgramPath};

/// Caller-supplied inputs for a [`ProgramDirective`].
#[derive(Debug, Clone, Default)]
pub struct ProgramOptions {
    /// Key into the metadata table (e.g. `"stata"`, `"perl"`).
    pub application: String,
    pub program: PathBuf,
    /// Defaulted from the metadata table when `None` or empty.
    pub executable: Option<String>,
    /// Defaulted from the metadata table when `None` or empty.
    pub option: Option<String>,
    /// Trailing arguments; never defaulted.
    pub args: String,
}

impl ProgramOptions {
    pub fn new(application: impl Into<String>, program: impl Into<PathBuf>) -> Self {
        Self {
            application: application.into(),
            program: program.into(),
            ..Default::default()
        }
    }

    pub fn executable(mut self, executable: impl Into<String>) -> Self {
        self.executable = Some(executable.into());
        self
    }

    pub fn option(mut self, option: impl Into<String>) -> Self {
        self.option = Some(option.into());
        self
    }

    pub fn args(mut self, args: impl Into<String>) -> Self {
        self.args = args.into();
        self
    }
}

/// A directive that runs one program file through one application.
///
/// The program is checked once, at construction: it must exist and carry the
/// extension the metadata table declares for the application.
#[derive(Debug)]
pub struct ProgramDirective {
    base: Directive,
    application: String,
    program: ProgramPath,
    executable: String,
    option: String,
    args: String,
    kind: ApplicationKind,
}

impl ProgramDirective {
    /// Directive whose wrapper is chosen by application name; `"sas"` and
    /// `"lyx"` get their defaults from [`ApplicationKind::for_application`].
    pub fn new(base: Directive, options: ProgramOptions, metadata: &MetadataTable) -> Result<Self> {
        Self::build(base, options, metadata, |metadata, application| {
            ApplicationKind::for_application(application, metadata.settings())
        })
    }

    /// SAS directive with an optional listing-file destination.
    pub fn sas(
        base: Directive,
        options: ProgramOptions,
        metadata: &MetadataTable,
        lst: Option<PathBuf>,
    ) -> Result<Self> {
        Self::with_kind(base, options, metadata, ApplicationKind::sas(lst))
    }

    /// LyX directive. See [`ApplicationKind::lyx`] for how `doc_type` and
    /// `pdf_output_dir` are resolved. The document type is only looked at
    /// once the program has passed its checks.
    pub fn lyx(
        base: Directive,
        options: ProgramOptions,
        metadata: &MetadataTable,
        doc_type: &str,
        pdf_output_dir: Option<PathBuf>,
    ) -> Result<Self> {
        Self::build(base, options, metadata, |metadata, _| {
            ApplicationKind::lyx(doc_type, pdf_output_dir, metadata.settings())
        })
    }

    pub fn with_kind(
        base: Directive,
        options: ProgramOptions,
        metadata: &MetadataTable,
        kind: ApplicationKind,
    ) -> Result<Self> {
        Self::build(base, options, metadata, |_, _| kind)
    }

    /// Construction order: parse program, check it exists, check its
    /// extension, fill executable and option defaults, then resolve the
    /// application payload.
    fn build(
        base: Directive,
        options: ProgramOptions,
        metadata: &MetadataTable,
        resolve_kind: impl FnOnce(&MetadataTable, &str) -> ApplicationKind,
    ) -> Result<Self> {
        let application = options.application;
        let program = ProgramPath::parse(&options.program);

        check_program(&base, &program, &application, metadata)?;

        let executable = match non_empty(options.executable) {
            Some(exe) => exe,
            None => metadata.default_executable(base.os(), &application)?.to_string(),
        };
        let option = match non_empty(options.option) {
            Some(opt) => opt,
            None => metadata.default_option(base.os(), &application)?.to_string(),
        };

        let kind = resolve_kind(metadata, &application);

        debug!(
            application = %application,
            program = %program.path.display(),
            executable = %executable,
            option = %option,
            "program directive ready"
        );

        Ok(Self {
            base,
            application,
            program,
            executable,
            option,
            args: options.args,
            kind,
        })
    }

    /// `executable option program args`, skipping empty parts.
    pub fn command_line(&self) -> String {
        let program = self.program.path.to_string_lossy();
        [
            self.executable.as_str(),
            self.option.as_str(),
            &*program,
            self.args.as_str(),
        ]
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }

    pub fn execute(&mut self, command: &str) -> ExecOutcome {
        self.base.execute(command)
    }

    pub fn write_log(&self) -> Result<()> {
        self.base.write_log()
    }

    /// Fold a file the program wrote on its own into the makelog.
    ///
    /// The file's contents are appended to the makelog (same rule as
    /// [`Directive::write_log`]). Afterwards:
    /// - `destination` given and different: the file is moved there;
    /// - `destination` equal to `output`: the file stays put;
    /// - no `destination`: the file is deleted.
    pub fn relocate_output(
        &self,
        output: impl AsRef<Path>,
        destination: Option<&Path>,
    ) -> Result<()> {
        let fs = self.base.fs();
        let output = norm_path(output);

        if !fs.is_file(&output) {
            return Err(DirectiveError::FileNotFound(output));
        }
        let contents = fs.read(&output)?;

        self.base.append_to_makelog(&contents)?;

        let destination = destination
            .map(norm_path)
            .filter(|d| !d.as_os_str().is_empty());

        match destination {
            Some(dest) if dest == output => {
                debug!(output = %output.display(), "program output left in place");
            }
            Some(dest) => {
                if let Some(parent) = dest.parent() {
                    fs.create_dir_all(parent)?;
                }
                fs.copy(&output, &dest)?;
                fs.remove_file(&output)?;
                debug!(output = %output.display(), destination = %dest.display(), "program output moved");
            }
            None => {
                fs.remove_file(&output)?;
                debug!(output = %output.display(), "program output removed");
            }
        }
        Ok(())
    }

    pub fn directive(&self) -> &Directive {
        &self.base
    }

    pub fn application(&self) -> &str {
        &self.application
    }

    pub fn program(&self) -> &ProgramPath {
        &self.program
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub fn option(&self) -> &str {
        &self.option
    }

    pub fn args(&self) -> &str {
        &self.args
    }

    pub fn kind(&self) -> &ApplicationKind {
        &self.kind
    }
}

fn check_program(
    base: &Directive,
    program: &ProgramPath,
    application: &str,
    metadata: &MetadataTable,
) -> Result<()> {
    if !base.fs().is_file(&program.path) {
        return Err(DirectiveError::FileNotFound(program.path.clone()));
    }

    let expected = metadata.extension(application)?;
    if program.ext != expected {
        return Err(DirectiveError::WrongExtension {
            path: program.path.clone(),
            expected: expected.to_string(),
        });
    }
    Ok(())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
