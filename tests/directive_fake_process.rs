use std::io;
use std::path::Path;

use runprog::config::MetadataTable;
use runprog::directive::{ProgramDirective, ProgramOptions};
use runprog::errors::DirectiveError;
use runprog::exec::ExecOutcome;
use runprog::fs::mock::MockFileSystem;
use runprog::fs::FileSystem;
use runprog::makelog::Makelog;
use runprog::runner::run_program;
use runprog_test_utils::builders::{fake_host, DirectiveBuilder};
use runprog_test_utils::fake_process::FakeProcess;
use runprog_test_utils::init_tracing;

#[test]
fn test_stdout_then_stderr_follow_banner() {
    init_tracing();
    let fs = MockFileSystem::new();
    let process = FakeProcess::new().exits(4, "out line", "err line\n");
    let host = fake_host(&fs, &process);

    let mut directive = DirectiveBuilder::new().build(&host);
    let outcome = directive.execute("python model.py");

    assert_eq!(outcome, ExecOutcome::Exited { code: 4, stderr: "err line\n".into() });
    assert_eq!(
        directive.last_output(),
        "Executing: \"python model.py\"\nout line\nerr line\n"
    );
}

#[test]
fn test_signal_termination_reports_minus_one() {
    let fs = MockFileSystem::new();
    let process = FakeProcess::new().killed_by_signal();
    let host = fake_host(&fs, &process);

    let mut directive = DirectiveBuilder::new().build(&host);
    assert_eq!(directive.execute("python model.py").exit_code(), -1);
}

#[test]
fn test_spawn_failure_is_distinct_from_nonzero_exit() {
    let fs = MockFileSystem::new();
    let process = FakeProcess::new()
        .fails_to_spawn(io::ErrorKind::PermissionDenied)
        .exits(1, "", "");
    let host = fake_host(&fs, &process);
    let mut directive = DirectiveBuilder::new().build(&host);

    let first = directive.execute("./not_executable.sh");
    let second = directive.execute("./not_executable.sh");

    assert!(matches!(first, ExecOutcome::SpawnFailed { .. }));
    assert!(matches!(second, ExecOutcome::Exited { code: 1, .. }));
    assert_eq!(first.exit_code(), second.exit_code());
    assert!(first.error_output().contains("./not_executable.sh"));
}

#[test]
fn test_shell_flag_dispatches_through_platform_shell() {
    let fs = MockFileSystem::new();
    let process = FakeProcess::new();
    let host = fake_host(&fs, &process);

    DirectiveBuilder::new().shell(true).build(&host).execute("echo a | wc -c");
    DirectiveBuilder::new().os("nt").shell(true).build(&host).execute("dir");

    let executed = process.executed();
    assert_eq!(executed[0].program, "sh");
    assert_eq!(executed[0].args, vec!["-c", "echo a | wc -c"]);
    assert_eq!(executed[1].program, "cmd");
    assert_eq!(executed[1].args, vec!["/C", "dir"]);
}

#[test]
fn test_makelog_grows_across_directives() {
    let fs = MockFileSystem::new();
    let process = FakeProcess::new().exits(0, "first", "").exits(0, "second", "");
    let host = fake_host(&fs, &process);
    let makelog = Makelog::start(&fs, "log/make.log").unwrap();

    let mut a = DirectiveBuilder::new().makelog(makelog.clone()).build(&host);
    a.execute("perl a.pl");
    a.write_log().unwrap();
    let after_first = fs.contents("log/make.log").unwrap();

    let mut b = DirectiveBuilder::new().makelog(makelog).build(&host);
    b.execute("perl b.pl");
    b.write_log().unwrap();
    let after_second = fs.contents("log/make.log").unwrap();

    assert!(after_second.starts_with(&after_first));
    assert!(after_second.contains("first\n"));
    assert!(after_second.ends_with("second\n"));
}

#[test]
fn test_failed_execution_is_still_logged() {
    let fs = MockFileSystem::new();
    let process = FakeProcess::new().fails_to_spawn(io::ErrorKind::NotFound);
    let host = fake_host(&fs, &process);
    let makelog = Makelog::start(&fs, "make.log").unwrap();

    let mut directive = DirectiveBuilder::new().makelog(makelog).log("own.log").build(&host);
    directive.execute("missing_tool run");
    directive.write_log().unwrap();

    assert!(fs.contents("make.log").unwrap().contains("cannot be executed"));
    assert!(fs.contents("own.log").unwrap().contains("missing_tool run"));
}

#[test]
fn test_attach_to_unstarted_makelog_fails() {
    let fs = MockFileSystem::new();
    match Makelog::attach(&fs, "../log/make.log") {
        Err(DirectiveError::MakelogNotStarted(path)) => {
            assert_eq!(path, Path::new("../log/make.log"));
        }
        other => panic!("expected MakelogNotStarted, got {:?}", other),
    }
}

#[test]
fn test_stata_log_moves_into_independent_log() {
    let fs = MockFileSystem::new();
    fs.add_file("code/clean.do", "use data");
    let process = FakeProcess::on(&fs)
        .exits(0, "", "")
        .writes_file("clean.log", "stata says hi\n");
    let host = fake_host(&fs, &process);
    let makelog = Makelog::start(&fs, "make.log").unwrap();

    let base = DirectiveBuilder::new().makelog(makelog).log("logs/clean.log").build(&host);
    let mut directive = ProgramDirective::new(
        base,
        ProgramOptions::new("stata", "code/clean.do"),
        &MetadataTable::builtin(),
    )
    .unwrap();

    run_program(&mut directive).unwrap();

    assert_eq!(process.executed()[0].to_string(), "stata-mp -e code/clean.do");
    assert!(fs.contents("make.log").unwrap().contains("stata says hi"));
    assert_eq!(fs.contents("logs/clean.log").as_deref(), Some("stata says hi\n"));
    assert!(!fs.exists(Path::new("clean.log")));
}
