//! Plain target listing.

use std::io::{self, Write};

use crate::graph::TargetGraph;

/// Write one target name per line in id order, omitting the root.
///
/// # Errors
///
/// Returns any error raised by `out`.
pub fn write_list<W: Write>(graph: &TargetGraph, out: &mut W) -> io::Result<()> {
    for target in graph.targets().filter(|t| !t.is_root()) {
        writeln!(out, "{}", target.name)?;
    }
    Ok(())
}
