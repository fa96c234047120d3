#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use runprog::directive::{Directive, DirectiveOptions, Host};
use runprog::fs::mock::MockFileSystem;
use runprog::makelog::Makelog;

use crate::fake_process::FakeProcess;

/// Host over a mock filesystem and a fake process backend.
pub fn fake_host(fs: &MockFileSystem, process: &FakeProcess) -> Host {
    Host::new(Arc::new(fs.clone()), Arc::new(process.clone()))
}

/// Builder for `Directive` to simplify test setup.
pub struct DirectiveBuilder {
    options: DirectiveOptions,
}

impl DirectiveBuilder {
    pub fn new() -> Self {
        Self {
            options: DirectiveOptions {
                os_name: "posix".to_string(),
                ..DirectiveOptions::default()
            },
        }
    }

    pub fn os(mut self, os_name: &str) -> Self {
        self.options.os_name = os_name.to_string();
        self
    }

    pub fn shell(mut self, val: bool) -> Self {
        self.options.shell = val;
        self
    }

    pub fn makelog(mut self, makelog: Makelog) -> Self {
        self.options.makelog = Some(makelog);
        self
    }

    pub fn log(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.log = Some(path.into());
        self
    }

    pub fn build(self, host: &Host) -> Directive {
        Directive::new(self.options, host).expect("Failed to build valid directive from builder")
    }
}

impl Default for DirectiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}
