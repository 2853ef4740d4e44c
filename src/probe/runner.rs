//! External process execution seam.

use std::io;
use std::process::{Command, Stdio};

/// Exit status and captured output of a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutcome {
    /// Exit code, or `None` if the process was terminated by a signal.
    pub code: Option<i32>,
    /// Captured standard output (lossy UTF-8).
    pub stdout: String,
}

impl ProcessOutcome {
    /// Returns true if the process exited with code 0.
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }
}

/// Trait for running an external program to completion.
///
/// Enables dependency injection for testing with mock implementations.
pub trait ProcessRunner: Send + Sync {
    /// Runs `program` with `args` and blocks until it exits.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the process cannot be spawned or awaited.
    fn run(&self, program: &str, args: &[String]) -> io::Result<ProcessOutcome>;
}

/// [`ProcessRunner`] backed by [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<ProcessOutcome> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()?;

        Ok(ProcessOutcome {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}
