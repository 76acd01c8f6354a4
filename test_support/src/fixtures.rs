//! Access to the trace fixtures under `tests/data`.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Absolute path of the fixture called `name`.
#[must_use]
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("tests")
        .join("data")
        .join(name)
}

/// Read the fixture called `name` into a string.
///
/// # Errors
///
/// Returns an error if the fixture cannot be read.
pub fn read_fixture(name: &str) -> Result<String> {
    let path = fixture_path(name);
    fs::read_to_string(&path).with_context(|| format!("read fixture {}", path.display()))
}
