#![cfg(unix)]

use std::fs;

use runprog::config::MetadataTable;
use runprog::directive::{Directive, DirectiveOptions, Host, ProgramDirective, ProgramOptions};
use runprog::errors::DirectiveError;
use runprog::exec::ExecOutcome;
use runprog::fs::RealFileSystem;
use runprog::makelog::Makelog;
use tempfile::tempdir;

fn options() -> DirectiveOptions {
    DirectiveOptions {
        os_name: "posix".to_string(),
        ..DirectiveOptions::default()
    }
}

#[test]
fn test_real_command_output_is_captured() {
    let host = Host::real();
    let mut directive = Directive::new(options(), &host).unwrap();

    let outcome = directive.execute("echo hello world");

    assert!(outcome.success());
    assert_eq!(directive.last_output(), "Executing: \"echo hello world\"\nhello world\n");
}

#[test]
fn test_failing_command_returns_nonzero_without_raising() {
    let host = Host::real();
    let mut directive = Directive::new(options(), &host).unwrap();

    let outcome = directive.execute("false");
    assert!(matches!(outcome, ExecOutcome::Exited { .. }));
    assert_ne!(outcome.exit_code(), 0);
}

#[test]
fn test_missing_executable_is_a_spawn_failure() {
    let host = Host::real();
    let mut directive = Directive::new(options(), &host).unwrap();

    let outcome = directive.execute("runprog_definitely_missing_binary --version");
    assert!(matches!(outcome, ExecOutcome::SpawnFailed { .. }));
    assert_eq!(outcome.exit_code(), 1);
    assert!(!outcome.error_output().is_empty());
}

#[test]
fn test_shell_mode_sees_stderr() {
    let host = Host::real();
    let mut directive = Directive::new(
        DirectiveOptions { shell: true, ..options() },
        &host,
    )
    .unwrap();

    let outcome = directive.execute("echo oops 1>&2; exit 3");
    assert_eq!(outcome.exit_code(), 3);
    assert_eq!(outcome.error_output(), "oops\n");
    assert!(directive.last_output().ends_with("oops\n"));
}

#[test]
fn test_write_log_appends_twice_and_overwrites_independent_log() {
    let dir = tempdir().unwrap();
    let makelog_path = dir.path().join("log/make.log");
    let own_log = dir.path().join("log/own.log");
    let host = Host::real();
    let makelog = Makelog::start(&RealFileSystem, &makelog_path).unwrap();

    let mut directive = Directive::new(
        DirectiveOptions {
            makelog: Some(makelog),
            log: Some(own_log.clone()),
            ..options()
        },
        &host,
    )
    .unwrap();

    directive.execute("echo step");
    directive.write_log().unwrap();
    let once = fs::read_to_string(&makelog_path).unwrap();
    directive.write_log().unwrap();
    let twice = fs::read_to_string(&makelog_path).unwrap();

    assert!(twice.len() > once.len());
    assert_eq!(twice.matches("Executing: \"echo step\"").count(), 2);
    assert_eq!(fs::read_to_string(&own_log).unwrap(), directive.last_output());
}

#[test]
fn test_write_log_refuses_deleted_makelog() {
    let dir = tempdir().unwrap();
    let makelog_path = dir.path().join("make.log");
    let host = Host::real();
    let makelog = Makelog::start(&RealFileSystem, &makelog_path).unwrap();
    fs::remove_file(&makelog_path).unwrap();

    let mut directive = Directive::new(
        DirectiveOptions { makelog: Some(makelog), ..options() },
        &host,
    )
    .unwrap();
    directive.execute("echo step");

    assert!(matches!(directive.write_log(), Err(DirectiveError::MakelogNotStarted(_))));
    assert!(!makelog_path.exists());
}

#[test]
fn test_relocate_output_moves_file_into_destination() {
    let dir = tempdir().unwrap();
    let makelog_path = dir.path().join("make.log");
    let program = dir.path().join("script.pl");
    let output = dir.path().join("script.log");
    let destination = dir.path().join("logs/script.log");
    fs::write(&program, "print 1;").unwrap();
    fs::write(&output, "program wrote this\n").unwrap();

    let host = Host::real();
    let makelog = Makelog::start(&RealFileSystem, &makelog_path).unwrap();
    let base = Directive::new(DirectiveOptions { makelog: Some(makelog), ..options() }, &host).unwrap();
    let directive = ProgramDirective::new(
        base,
        ProgramOptions::new("perl", &program),
        &MetadataTable::builtin(),
    )
    .unwrap();

    directive.relocate_output(&output, Some(&destination)).unwrap();

    assert!(fs::read_to_string(&makelog_path).unwrap().contains("program wrote this"));
    assert_eq!(fs::read_to_string(&destination).unwrap(), "program wrote this\n");
    assert!(!output.exists());
}
