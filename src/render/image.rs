//! Image rendering through the Graphviz command line tools.
//!
//! The DOT description is written to a temporary file which Graphviz then
//! lays out and renders. Graphviz's standard output is copied to the caller
//! unchanged, so binary formats survive intact.

use std::io::Write;
use std::path::Path;
use std::process::Command;

use tempfile::Builder;
use tracing::{debug, info};

use super::RenderError;
use super::dot::{DotStyle, generate};
use crate::cli::{Layout, RenderFormat};
use crate::graph::TargetGraph;

/// Render `graph` with the Graphviz executable at `program`.
///
/// # Errors
///
/// Returns [`RenderError::GraphvizSpawn`] if `program` cannot be started,
/// [`RenderError::GraphvizFailed`] if it exits unsuccessfully, and
/// [`RenderError::Io`] if the temporary file or `out` cannot be written.
pub fn render_image<W: Write>(
    graph: &TargetGraph,
    layout: Layout,
    format: RenderFormat,
    program: &Path,
    out: &mut W,
) -> Result<(), RenderError> {
    let description = generate(graph, DotStyle::Graphviz);
    let mut file = Builder::new()
        .prefix("makesense.")
        .suffix(".dot")
        .tempfile()?;
    file.write_all(description.as_bytes())?;
    file.flush()?;
    debug!(path = %file.path().display(), "wrote DOT description");

    let mut cmd = Command::new(program);
    cmd.arg(format!("-K{}", layout.as_str()))
        .arg(format!("-T{}", format.as_str()))
        .arg(file.path());
    info!(
        "Running command: {} -K{} -T{} {}",
        program.display(),
        layout.as_str(),
        format.as_str(),
        file.path().display()
    );

    let output = cmd.output().map_err(|source| RenderError::GraphvizSpawn {
        program: program.to_path_buf(),
        source,
    })?;
    if !output.status.success() {
        return Err(RenderError::GraphvizFailed {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
        });
    }
    out.write_all(&output.stdout)?;
    Ok(())
}
