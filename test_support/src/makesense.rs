//! Helpers for invoking the built `makesense` binary in tests.
//!
//! These utilities use `assert_cmd` to locate the current workspace's
//! `makesense` executable, feed it a trace on standard input, and capture
//! stdout/stderr for assertions.

use anyhow::{Context, Result};
use assert_cmd::Command;

/// Captured output from a `makesense` invocation.
#[derive(Debug)]
pub struct MakesenseRun {
    /// Captured stdout as raw bytes.
    pub stdout: Vec<u8>,
    /// Captured stderr (lossy UTF-8).
    pub stderr: String,
    /// Whether the command exited successfully.
    pub success: bool,
}

impl MakesenseRun {
    /// Stdout decoded as lossy UTF-8.
    #[must_use]
    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }
}

/// Run `makesense` with `args`, writing `stdin` to its standard input.
///
/// # Errors
///
/// Returns an error when `makesense` cannot be located or the process cannot
/// be spawned.
pub fn run_makesense(args: &[&str], stdin: &str) -> Result<MakesenseRun> {
    let mut cmd = Command::cargo_bin("makesense").context("locate makesense binary")?;
    let output = cmd
        .args(args)
        .write_stdin(stdin.to_owned())
        .output()
        .context("run makesense command")?;
    Ok(MakesenseRun {
        stdout: output.stdout,
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        success: output.status.success(),
    })
}
