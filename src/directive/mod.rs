// src/directive/mod.rs

//! Directives: single-use descriptions of how to run and log one command.
//!
//! - [`base`] is the run context shared by every directive: OS, shell flag,
//!   makelog handle, independent log, and the captured output of the last
//!   execution.
//! - [`program`] adds a program file targeted at one application, with
//!   executable/option defaults from the metadata table and relocation of
//!   files the program writes on its own.
//! - [`application`] holds the per-application payloads (SAS listing file,
//!   LyX document type and PDF directory).

pub mod application;
pub mod base;
pub mod program;

use std::sync::Arc;

use crate::exec::{ProcessBackend, RealProcessBackend};
use crate::fs::{FileSystem, RealFileSystem};

pub use application::ApplicationKind;
pub use base::{Directive, DirectiveOptions};
pub use program::{ProgramDirective, ProgramOptions};

/// The filesystem and process backend directives operate on.
#[derive(Debug, Clone)]
pub struct Host {
    pub fs: Arc<dyn FileSystem>,
    pub backend: Arc<dyn ProcessBackend>,
}

impl Host {
    pub fn new(fs: Arc<dyn FileSystem>, backend: Arc<dyn ProcessBackend>) -> Self {
        Self { fs, backend }
    }

    /// Real filesystem, real processes.
    pub fn real() -> Self {
        Self::new(Arc::new(RealFileSystem), Arc::new(RealProcessBackend))
    }
}

impl Default for Host {
    fn default() -> Self {
        Host::real()
    }
}
