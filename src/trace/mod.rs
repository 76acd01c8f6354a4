//! Parsing of `make -nd` debug traces into a [`TargetGraph`].
//!
//! The entry point is [`parse_trace`], which reads a trace from any
//! [`BufRead`] source in a single forward pass. Fatal problems are reported
//! as [`TraceError`]; recognised but inconsistent input is tolerated and
//! reported as [`TraceWarning`]s alongside the graph.
//!
//! # Examples
//!
//! ```
//! use makesense::trace::{ParseOptions, parse_trace};
//!
//! let trace = "\
//! Considering target file 'all'.
//!  File 'all' does not exist.
//!  Finished prerequisites of target file 'all'.
//! Must remake target 'all'.
//! echo done
//! Successfully remade target file 'all'.
//! ";
//! let parsed = parse_trace(trace.as_bytes(), &ParseOptions::default())?;
//! let all = parsed.graph.get("all").expect("all is registered");
//! assert!(all.must_remake);
//! assert_eq!(all.commands, vec!["echo done"]);
//! # Ok::<(), makesense::trace::TraceError>(())
//! ```

mod commands;
mod error;
mod line;
mod parser;
mod reader;

use std::fmt::{self, Display, Formatter};
use std::io::BufRead;

use crate::graph::TargetGraph;

pub use error::TraceError;
pub use line::{LineKind, NameError, TraceLine, strip_indent, target_name};

/// Default ceiling on nested frames, root included.
pub const DEFAULT_MAX_DEPTH: usize = 4096;

/// Settings for a parse run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum number of simultaneously open frames, root included.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// A non-fatal inconsistency found while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceWarning {
    /// A finished marker closed a frame opened for a different target.
    FrameMismatch {
        /// Target the closed frame was opened for.
        expected: String,
        /// Target named by the finished marker.
        found: String,
        /// Line of the finished marker.
        line_number: usize,
    },
    /// Input ended inside a command block.
    UnterminatedCommands {
        /// Target whose commands were being read.
        target: String,
        /// Line of the `Must remake target` marker.
        line_number: usize,
    },
    /// A target was reported for remaking more than once; the first command
    /// list was kept.
    RepeatedRemake {
        /// The target reported again.
        target: String,
        /// Line of the repeated marker.
        line_number: usize,
    },
    /// Input ended while skipping a makefile's self-check.
    UnterminatedBurn {
        /// Makefile being skipped.
        makefile: String,
        /// Line where skipping started.
        line_number: usize,
    },
}

impl Display for TraceWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::FrameMismatch {
                expected,
                found,
                line_number,
            } => write!(f, "line {line_number}: expected `{expected}` got `{found}`"),
            Self::UnterminatedCommands {
                target,
                line_number,
            } => write!(
                f,
                "line {line_number}: commands for `{target}` end without a remade marker"
            ),
            Self::RepeatedRemake {
                target,
                line_number,
            } => write!(f, "line {line_number}: `{target}` was already marked for remaking"),
            Self::UnterminatedBurn {
                makefile,
                line_number,
            } => write!(
                f,
                "line {line_number}: self-check of makefile `{makefile}` never finished"
            ),
        }
    }
}

/// Result of a successful parse.
#[derive(Debug, Clone)]
pub struct ParsedTrace {
    /// The reconstructed dependency graph.
    pub graph: TargetGraph,
    /// Non-fatal problems, in input order.
    pub warnings: Vec<TraceWarning>,
}

/// Parse a complete trace.
///
/// # Errors
///
/// Returns [`TraceError`] when the input cannot be read, a name-bearing line
/// lacks its quotes, or nesting exceeds [`ParseOptions::max_depth`].
pub fn parse_trace<R: BufRead>(reader: R, options: &ParseOptions) -> Result<ParsedTrace, TraceError> {
    parser::TraceParser::new(reader, options).run()
}
