use std::ffi::OsStr;
use std::path::Path;
use std::process::{Child, Command as StdCommand, Stdio};

use crate::error::{Error, Result};

/// A program invocation that is started and then left alone.
#[derive(Debug)]
pub struct Command {
    inner: StdCommand,
    program: String,
}

impl Command {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        let program = program.as_ref();
        Self {
            inner: StdCommand::new(program),
            program: program.to_string_lossy().into_owned(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.inner.arg(arg);
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.inner.current_dir(dir);
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> Vec<String> {
        self.inner
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    /// Start the process with all stdio detached. The child is not waited on.
    ///
    /// On unix the child leads its own process group, so terminal signals
    /// sent to this process do not reach it.
    pub fn spawn_detached(mut self) -> Result<Child> {
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            self.inner.process_group(0);
        }

        self.inner
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| Error::CommandFailed {
                cmd: self.program.clone(),
                source: e,
            })
    }
}
