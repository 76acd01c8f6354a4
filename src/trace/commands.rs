//! Command block reader.
//!
//! After `Must remake target`, make prints the recipe it would run and then
//! `Successfully remade target file`. Job-server bookkeeping lines may be
//! interleaved with the recipe and are dropped here.

use std::io::BufRead;

use super::error::TraceError;
use super::line::{LineKind, TraceLine};
use super::reader::TraceLines;

/// Commands collected for one target.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct CommandBlock {
    pub(crate) commands: Vec<String>,
    /// `false` when input ended before the closing sentinel.
    pub(crate) terminated: bool,
}

/// Consume lines up to and including the closing sentinel.
pub(crate) fn read_commands<R: BufRead>(
    lines: &mut TraceLines<R>,
) -> Result<CommandBlock, TraceError> {
    let mut block = CommandBlock::default();
    while let Some(raw) = lines.next_line()? {
        let line = TraceLine::parse(&raw);
        match line.kind {
            LineKind::Remade => {
                block.terminated = true;
                break;
            }
            LineKind::ChildBookkeeping => {}
            _ => block.commands.push(line.text.to_owned()),
        }
    }
    Ok(block)
}
