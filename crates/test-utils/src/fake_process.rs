use std::collections::VecDeque;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use runprog::exec::{CapturedOutput, Invocation, ProcessBackend};
use runprog::fs::mock::MockFileSystem;

#[derive(Debug, Clone)]
enum Reply {
    Exit(CapturedOutput),
    SpawnError(io::ErrorKind),
}

/// A fake process backend that:
/// - records every invocation it was asked to run
/// - answers with scripted replies in order (success with no output once
///   the script runs out)
/// - optionally writes files into a `MockFileSystem`, the way a tool writes
///   its own log next to the program.
#[derive(Debug, Clone, Default)]
pub struct FakeProcess {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    executed: Arc<Mutex<Vec<Invocation>>>,
    writes: Arc<Mutex<Vec<(PathBuf, String)>>>,
    fs: Option<MockFileSystem>,
}

impl FakeProcess {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files written by the fake tool land in `fs`.
    pub fn on(fs: &MockFileSystem) -> Self {
        Self {
            fs: Some(fs.clone()),
            ..Self::default()
        }
    }

    pub fn exits(self, code: i32, stdout: &str, stderr: &str) -> Self {
        self.replies.lock().unwrap().push_back(Reply::Exit(CapturedOutput {
            code: Some(code),
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }));
        self
    }

    pub fn killed_by_signal(self) -> Self {
        self.replies.lock().unwrap().push_back(Reply::Exit(CapturedOutput {
            code: None,
            ..CapturedOutput::default()
        }));
        self
    }

    pub fn fails_to_spawn(self, kind: io::ErrorKind) -> Self {
        self.replies.lock().unwrap().push_back(Reply::SpawnError(kind));
        self
    }

    pub fn writes_file(self, path: impl Into<PathBuf>, contents: &str) -> Self {
        self.writes.lock().unwrap().push((path.into(), contents.to_string()));
        self
    }

    /// Everything run so far, in order.
    pub fn executed(&self) -> Vec<Invocation> {
        self.executed.lock().unwrap().clone()
    }
}

impl ProcessBackend for FakeProcess {
    fn run(&self, invocation: &Invocation) -> io::Result<CapturedOutput> {
        self.executed.lock().unwrap().push(invocation.clone());

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Reply::SpawnError(kind)) => Err(io::Error::new(kind, "fake spawn failure")),
            Some(Reply::Exit(output)) => {
                self.write_files();
                Ok(output)
            }
            None => {
                self.write_files();
                Ok(CapturedOutput {
                    code: Some(0),
                    ..CapturedOutput::default()
                })
            }
        }
    }
}

impl FakeProcess {
    fn write_files(&self) {
        if let Some(fs) = &self.fs {
            for (path, contents) in self.writes.lock().unwrap().iter() {
                fs.add_file(path, contents.as_bytes());
            }
        }
    }
}
