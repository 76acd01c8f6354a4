//! Test utilities for process management.
//!
//! This crate provides helpers for creating fake Graphviz executables,
//! loading trace fixtures, and running the built binary.

pub mod fixtures;
pub mod makesense;

pub use makesense::{MakesenseRun, run_makesense};

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Make a script file executable on Unix platforms.
#[cfg(unix)]
fn make_script_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path)
        .with_context(|| format!("read metadata {}", path.display()))?
        .permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)
        .with_context(|| format!("set permissions {}", path.display()))?;
    Ok(())
}

#[cfg(not(unix))]
fn make_script_executable(_path: &Path) -> Result<()> {
    Ok(())
}

/// Create a fake `dot` executable running the shell `body`.
///
/// The script receives the same arguments Graphviz would: the layout flag,
/// the format flag, and the path of the DOT file.
///
/// Returns the temporary directory and the path to the executable.
///
/// # Errors
///
/// Returns an error if the script cannot be written or made executable.
pub fn fake_dot(body: &str) -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new().context("fake_dot: create temp dir")?;
    let path = dir.path().join("dot");
    let mut file =
        File::create(&path).with_context(|| format!("fake_dot: create {}", path.display()))?;
    writeln!(file, "#!/bin/sh\n{body}")
        .with_context(|| format!("fake_dot: write {}", path.display()))?;
    drop(file);
    make_script_executable(&path)?;
    Ok((dir, path))
}

/// Create a fake `dot` that echoes its flags and then the DOT file.
///
/// # Errors
///
/// Returns an error if the script cannot be created.
pub fn echoing_dot() -> Result<(TempDir, PathBuf)> {
    fake_dot("echo \"$1 $2\"\ncat \"$3\"")
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::process::Command;

    #[rstest]
    fn fake_dot_runs_body() {
        let (_dir, path) = fake_dot("echo ok; exit 4").expect("fake dot");
        let output = Command::new(&path).output().expect("run fake dot");
        assert_eq!(output.status.code(), Some(4));
        assert_eq!(output.stdout, b"ok\n");
    }
}
