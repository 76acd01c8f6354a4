//! Error types raised while reading a make trace.

use miette::Diagnostic;
use std::io;
use thiserror::Error;

/// Fatal conditions that stop trace parsing.
///
/// Each variant carries the 1-based line number of the offending input so
/// the diagnostic can point back into the transcript.
#[derive(Debug, Error, Diagnostic)]
pub enum TraceError {
    /// A line that must name a target has no opening delimiter.
    #[error("line {line_number}: cannot find the start of the target name in `{line}`")]
    #[diagnostic(
        code(makesense::trace::missing_name_start),
        help("target names are quoted with a backtick or a single quote")
    )]
    MissingNameStart {
        /// Line number in the trace.
        line_number: usize,
        /// Trimmed line text.
        line: String,
    },

    /// A target name was opened but never closed with a single quote.
    #[error("line {line_number}: cannot find the end of the target name in `{line}`")]
    #[diagnostic(code(makesense::trace::missing_name_end))]
    MissingNameEnd {
        /// Line number in the trace.
        line_number: usize,
        /// Trimmed line text.
        line: String,
    },

    /// Nesting went deeper than the configured ceiling.
    #[error("line {line_number}: target nesting exceeds the limit of {limit} frames")]
    #[diagnostic(
        code(makesense::trace::depth_exceeded),
        help("raise --max-depth if the trace is genuine")
    )]
    DepthExceeded {
        /// Line number in the trace.
        line_number: usize,
        /// Configured frame ceiling.
        limit: usize,
    },

    /// Reading from the input stream failed.
    #[error("failed to read trace input after line {line_number}")]
    #[diagnostic(code(makesense::trace::io))]
    Io {
        /// Last line successfully read.
        line_number: usize,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}
