// src/runner.rs

//! Per-application wrappers around a [`ProgramDirective`].
//!
//! A wrapper formats the command, runs it, writes the logs, and then deals
//! with the files some tools write on their own:
//!
//! - Stata writes `<name>.log` into the working directory.
//! - SAS writes `<name>.log` and `<name>.lst` into the working directory.
//! - LyX exports `<name>.pdf` next to the `.lyx` file.
//!
//! Logs and listings are folded into the makelog and moved to the
//! directive's independent log / listing path (or deleted); the PDF is
//! moved into the resolved PDF output directory.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::directive::{ApplicationKind, ProgramDirective};
use crate::errors::{DirectiveError, Result};
use crate::exec::ExecOutcome;

/// Run `directive` once and log it.
///
/// The run is logged whether or not it succeeded. A run that did not exit
/// zero is turned into [`DirectiveError::ProgramFailed`] after logging, so a
/// build script stops at the first broken step.
pub fn run_program(directive: &mut ProgramDirective) -> Result<ExecOutcome> {
    let command = directive.command_line();
    info!(
        application = directive.application(),
        program = %directive.program().path.display(),
        "running program"
    );

    let outcome = directive.execute(&command);
    directive.write_log()?;
    relocate_program_outputs(directive, outcome.success())?;

    if !outcome.success() {
        let (code, stderr) = outcome.into_parts();
        return Err(DirectiveError::ProgramFailed {
            command,
            code,
            stderr,
        });
    }
    Ok(outcome)
}

fn relocate_program_outputs(directive: &ProgramDirective, succeeded: bool) -> Result<()> {
    let log = directive.directive().log().map(Path::to_path_buf);

    match directive.kind() {
        ApplicationKind::Sas { lst } => {
            relocate_if_present(directive, cwd_artifact(directive, "log"), log.as_deref(), succeeded)?;
            relocate_if_present(directive, cwd_artifact(directive, "lst"), lst.as_deref(), succeeded)
        }
        ApplicationKind::Lyx { pdf_output_dir, .. } => move_pdf(directive, pdf_output_dir, succeeded),
        ApplicationKind::Generic => match directive.application() {
            "stata" => {
                relocate_if_present(directive, cwd_artifact(directive, "log"), log.as_deref(), succeeded)
            }
            _ => Ok(()),
        },
    }
}

fn cwd_artifact(directive: &ProgramDirective, ext: &str) -> PathBuf {
    PathBuf::from(format!("{}.{ext}", directive.program().name))
}

/// A failed run may not have produced its artifacts; only a successful run
/// is required to.
fn relocate_if_present(
    directive: &ProgramDirective,
    output: PathBuf,
    destination: Option<&Path>,
    succeeded: bool,
) -> Result<()> {
    if !succeeded && !directive.directive().fs().is_file(&output) {
        debug!(output = %output.display(), "no program output after failed run");
        return Ok(());
    }
    directive.relocate_output(&output, destination)
}

fn move_pdf(directive: &ProgramDirective, pdf_output_dir: &Path, succeeded: bool) -> Result<()> {
    let fs = directive.directive().fs();
    let program = directive.program();
    let pdf_name = format!("{}.pdf", program.name);
    let source = program.dir.join(&pdf_name);

    if !fs.is_file(&source) {
        if succeeded {
            return Err(DirectiveError::FileNotFound(source));
        }
        return Ok(());
    }

    let destination = pdf_output_dir.join(&pdf_name);
    if destination != source {
        fs.create_dir_all(pdf_output_dir)?;
        fs.copy(&source, &destination)?;
        fs.remove_file(&source)?;
    }
    info!(pdf = %destination.display(), "pdf written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Arc;

    use super::*;
    use crate::config::MetadataTable;
    use crate::directive::{Directive, DirectiveOptions, Host, ProgramOptions};
    use crate::exec::{CapturedOutput, Invocation, ProcessBackend};
    use crate::fs::mock::MockFileSystem;
    use crate::fs::FileSystem;
    use crate::makelog::Makelog;

    /// Pretends to be the external tool: writes the files it would write.
    #[derive(Debug)]
    struct ToolBackend {
        fs: MockFileSystem,
        writes: Vec<(&'static str, &'static str)>,
        code: i32,
    }

    impl ProcessBackend for ToolBackend {
        fn run(&self, _invocation: &Invocation) -> io::Result<CapturedOutput> {
            for (path, contents) in &self.writes {
                self.fs.add_file(path, *contents);
            }
            Ok(CapturedOutput {
                code: Some(self.code),
                stdout: "tool stdout".into(),
                stderr: if self.code == 0 { String::new() } else { "tool failed".into() },
            })
        }
    }

    fn setup(writes: Vec<(&'static str, &'static str)>, code: i32) -> (Host, MockFileSystem, Makelog) {
        let fs = MockFileSystem::new();
        let backend = ToolBackend { fs: fs.clone(), writes, code };
        let makelog = Makelog::start(&fs, "make.log").unwrap();
        (Host::new(Arc::new(fs.clone()), Arc::new(backend)), fs, makelog)
    }

    fn base(host: &Host, makelog: Makelog, log: Option<&str>) -> Directive {
        let options = DirectiveOptions {
            os_name: "posix".into(),
            makelog: Some(makelog),
            log: log.map(PathBuf::from),
            ..Default::default()
        };
        Directive::new(options, host).unwrap()
    }

    #[test]
    fn sas_log_and_listing_are_folded_into_makelog() {
        let (host, fs, makelog) = setup(vec![("job.log", "SAS LOG\n"), ("job.lst", "LISTING\n")], 0);
        fs.add_file("code/job.sas", "");

        let mut d = ProgramDirective::sas(
            base(&host, makelog, Some("logs/sas.log")),
            ProgramOptions::new("sas", "code/job.sas"),
            &MetadataTable::builtin(),
            Some("out/job.lst".into()),
        )
        .unwrap();

        run_program(&mut d).unwrap();

        let make = fs.contents("make.log").unwrap();
        assert!(make.contains("Executing: \"sas code/job.sas\""));
        assert!(make.contains("SAS LOG"));
        assert!(make.contains("LISTING"));
        assert_eq!(fs.contents("logs/sas.log").as_deref(), Some("SAS LOG\n"));
        assert_eq!(fs.contents("out/job.lst").as_deref(), Some("LISTING\n"));
        assert!(!fs.exists(Path::new("job.log")));
        assert!(!fs.exists(Path::new("job.lst")));
    }

    #[test]
    fn failed_run_is_logged_then_reported() {
        let (host, fs, makelog) = setup(vec![], 2);
        fs.add_file("analysis.do", "");

        let mut d = ProgramDirective::new(
            base(&host, makelog, None),
            ProgramOptions::new("stata", "analysis.do"),
            &MetadataTable::builtin(),
        )
        .unwrap();

        match run_program(&mut d) {
            Err(DirectiveError::ProgramFailed { code, stderr, command }) => {
                assert_eq!(code, 2);
                assert_eq!(stderr, "tool failed");
                assert!(command.starts_with("stata-mp -e analysis.do"));
            }
            other => panic!("expected ProgramFailed, got {other:?}"),
        }
        assert!(fs.contents("make.log").unwrap().contains("tool failed"));
    }

    #[test]
    fn lyx_pdf_moves_to_resolved_directory() {
        let (host, fs, makelog) = setup(vec![("paper/draft.pdf", "%PDF")], 0);
        fs.add_file("paper/draft.lyx", "");

        let mut d = ProgramDirective::lyx(
            base(&host, makelog, None),
            ProgramOptions::new("lyx", "paper/draft.lyx"),
            &MetadataTable::builtin(),
            "comments",
            Some("ignored/".into()),
        )
        .unwrap();

        run_program(&mut d).unwrap();

        assert_eq!(fs.contents("../temp/draft.pdf").as_deref(), Some("%PDF"));
        assert!(!fs.exists(Path::new("paper/draft.pdf")));
    }

    #[test]
    fn lyx_by_application_name_moves_pdf_to_output_dir() {
        let (host, fs, makelog) = setup(vec![("paper/draft.pdf", "%PDF")], 0);
        fs.add_file("paper/draft.lyx", "");

        let mut d = ProgramDirective::new(
            base(&host, makelog, None),
            ProgramOptions::new("lyx", "paper/draft.lyx"),
            &MetadataTable::builtin(),
        )
        .unwrap();

        run_program(&mut d).unwrap();

        assert_eq!(fs.contents("../output/draft.pdf").as_deref(), Some("%PDF"));
        assert!(!fs.exists(Path::new("paper/draft.pdf")));
    }

    #[test]
    fn successful_stata_run_without_log_file_is_an_error() {
        let (host, fs, makelog) = setup(vec![], 0);
        fs.add_file("analysis.do", "");

        let mut d = ProgramDirective::new(
            base(&host, makelog, None),
            ProgramOptions::new("stata", "analysis.do"),
            &MetadataTable::builtin(),
        )
        .unwrap();

        assert!(matches!(run_program(&mut d), Err(DirectiveError::FileNotFound(_))));
    }
}
