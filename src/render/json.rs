//! Structured JSON output.
//!
//! The record mirrors the graph model: the root's name and every target
//! keyed by name in id order. Empty child and command lists are omitted.

use std::io::Write;

use crate::graph::TargetGraph;

/// Serialise `graph` as a single JSON document followed by a newline.
///
/// # Errors
///
/// Returns [`serde_json::Error`] when writing to `out` fails.
pub fn write_json<W: Write>(graph: &TargetGraph, out: &mut W) -> Result<(), serde_json::Error> {
    serde_json::to_writer(&mut *out, graph)?;
    writeln!(out).map_err(serde_json::Error::io)
}
