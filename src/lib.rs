// src/lib.rs

pub mod cli;
pub mod config;
pub mod directive;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod makelog;
pub mod paths;
pub mod runner;
pub mod types;

use anyhow::Result;
use tracing::debug;

use crate::cli::{CliArgs, Command, RunArgs};
use crate::config::{load_or_builtin, MetadataTable};
use crate::directive::{Directive, DirectiveOptions, Host, ProgramDirective, ProgramOptions};
use crate::makelog::Makelog;
use crate::types::OsName;

/// High-level entry point used by `main.rs`.
pub fn run(args: CliArgs) -> Result<()> {
    let metadata = load_or_builtin(args.metadata.as_deref())?;
    let host = Host::real();

    match args.command {
        Command::Start { makelog } => {
            let path = makelog.unwrap_or_else(|| metadata.settings().makelog.clone());
            Makelog::start(host.fs.as_ref(), &path)?;
        }
        Command::End { makelog } => {
            let path = makelog.unwrap_or_else(|| metadata.settings().makelog.clone());
            Makelog::attach(host.fs.as_ref(), &path)?.end(host.fs.as_ref())?;
        }
        Command::ShowMetadata => print_metadata(&metadata),
        Command::Run(run_args) => run_directive(run_args, &metadata, &host)?,
    }
    Ok(())
}

/// Build the directive for `args` and run it (or print it on `--dry-run`).
pub fn run_directive(args: RunArgs, metadata: &MetadataTable, host: &Host) -> Result<()> {
    let makelog = if args.no_makelog || args.dry_run {
        None
    } else {
        let path = args
            .makelog
            .unwrap_or_else(|| metadata.settings().makelog.clone());
        Some(Makelog::attach(host.fs.as_ref(), &path)?)
    };

    let base = Directive::new(
        DirectiveOptions {
            os_name: args.os.unwrap_or_else(|| OsName::current().as_str().to_string()),
            shell: args.shell,
            makelog,
            log: args.log,
        },
        host,
    )?;

    let options = ProgramOptions {
        application: args.application,
        program: args.program,
        executable: args.executable,
        option: args.option,
        args: args.args,
    };

    let mut directive = match options.application.as_str() {
        "sas" => ProgramDirective::sas(base, options, metadata, args.lst)?,
        "lyx" => ProgramDirective::lyx(base, options, metadata, &args.doctype, args.pdfout)?,
        _ => ProgramDirective::new(base, options, metadata)?,
    };

    if args.dry_run {
        println!("{}", directive.command_line());
        debug!("dry-run complete (no execution)");
        return Ok(());
    }

    runner::run_program(&mut directive)?;
    Ok(())
}

/// Print the effective metadata table.
fn print_metadata(metadata: &MetadataTable) {
    println!("runprog metadata");
    let settings = metadata.settings();
    println!("  settings.output_dir = {}", settings.output_dir.display());
    println!("  settings.temp_dir = {}", settings.temp_dir.display());
    println!("  settings.makelog = {}", settings.makelog.display());
    println!();

    for app in metadata.applications() {
        println!("  - {app}");
        if let Ok(ext) = metadata.extension(app) {
            println!("      extension: {ext}");
        }
        for os in [OsName::Posix, OsName::Nt] {
            let exe = metadata.default_executable(os, app).unwrap_or("<unset>");
            let opt = metadata.default_option(os, app).unwrap_or("<unset>");
            println!("      {os}: {exe} {opt}");
        }
    }
}
