//! Classification of individual trace lines.
//!
//! Make's debug output indents each message by the current resolution depth
//! and identifies messages by fixed English phrases. [`TraceLine::parse`]
//! measures the indentation and recognises the phrase; the embedded target
//! name is only extracted on request through [`TraceLine::target_name`], so
//! lines that are merely skipped never need a well-formed name.
//!
//! # Examples
//!
//! ```
//! use makesense::trace::{LineKind, TraceLine};
//!
//! let line = TraceLine::parse("  Considering target file 'main.o'.");
//! assert_eq!(line.depth, 2);
//! assert_eq!(line.kind, LineKind::Considering);
//! assert_eq!(line.target_name(), Ok("main.o"));
//! ```

use thiserror::Error;

const CONSIDERING: &str = "Considering target file";
const MUST_REMAKE: &str = "Must remake target ";
const PRUNING: &str = "Pruning file ";
const FINISHED: &str = "Finished prerequisites of target file ";
const CONSIDERED_ALREADY: &str = "was considered already.";
const READING_MAKEFILE: &str = "Reading makefile ";
const REMADE: &str = "Successfully remade target file ";
const CHILD_BOOKKEEPING: [&str; 4] = [
    "Putting child ",
    "Removing child ",
    "Live child ",
    "Reaping winning child ",
];

/// Category of a trace line, decided by its leading or trailing phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Make starts resolving a target.
    Considering,
    /// Make decided a target needs rebuilding; commands follow.
    MustRemake,
    /// A target already resolved elsewhere is skipped.
    Pruning,
    /// Resolution of a target's prerequisites is complete, or the target
    /// was considered already.
    Finished,
    /// Make is reading a makefile.
    ReadingMakefile,
    /// A command block ended.
    Remade,
    /// Job-server chatter about child processes.
    ChildBookkeeping,
    /// Anything else.
    Other,
}

impl LineKind {
    /// Recognise the category of an indentation-free line.
    #[must_use]
    pub fn of(text: &str) -> Self {
        if text.starts_with(CONSIDERING) {
            Self::Considering
        } else if text.starts_with(MUST_REMAKE) {
            Self::MustRemake
        } else if text.starts_with(PRUNING) {
            Self::Pruning
        } else if text.starts_with(FINISHED) || text.ends_with(CONSIDERED_ALREADY) {
            Self::Finished
        } else if text.starts_with(READING_MAKEFILE) {
            Self::ReadingMakefile
        } else if text.starts_with(REMADE) {
            Self::Remade
        } else if CHILD_BOOKKEEPING.iter().any(|p| text.starts_with(p)) {
            Self::ChildBookkeeping
        } else {
            Self::Other
        }
    }

    /// Return `true` for categories whose line embeds a target or makefile
    /// name.
    #[must_use]
    pub const fn carries_name(self) -> bool {
        matches!(
            self,
            Self::Considering
                | Self::MustRemake
                | Self::Pruning
                | Self::Finished
                | Self::ReadingMakefile
        )
    }
}

/// Reasons a name could not be located in a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NameError {
    /// Neither a backtick nor a single quote occurs in the line.
    #[error("no opening quote")]
    MissingStart,
    /// No single quote follows the opening delimiter.
    #[error("no closing quote")]
    MissingEnd,
}

/// One line of a trace, split into indentation and text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceLine<'a> {
    /// Number of leading spaces.
    pub depth: usize,
    /// The line without its leading spaces.
    pub text: &'a str,
    /// Recognised category.
    pub kind: LineKind,
}

impl<'a> TraceLine<'a> {
    /// Measure and classify a raw line.
    #[must_use]
    pub fn parse(raw: &'a str) -> Self {
        let (text, depth) = strip_indent(raw);
        Self {
            depth,
            text,
            kind: LineKind::of(text),
        }
    }

    /// Extract the quoted name carried by this line.
    ///
    /// # Errors
    ///
    /// Returns [`NameError`] when the line has no usable delimiters.
    pub fn target_name(&self) -> Result<&'a str, NameError> {
        target_name(self.text)
    }
}

/// Remove leading spaces from `line`, returning the rest and the count.
///
/// Only the space character counts as indentation, matching make's own
/// `print_spaces`.
///
/// # Examples
///
/// ```
/// use makesense::trace::strip_indent;
///
/// assert_eq!(strip_indent("   a"), ("a", 3));
/// assert_eq!(strip_indent("a b c"), ("a b c", 0));
/// ```
#[must_use]
pub fn strip_indent(line: &str) -> (&str, usize) {
    let text = line.trim_start_matches(' ');
    (text, line.len() - text.len())
}

/// Extract the name quoted inside `line`.
///
/// The name starts after the first backtick or single quote and runs up to
/// the next single quote, so both the older backtick-quote style and the
/// newer quote-quote style are accepted. Spaces inside the name are kept.
///
/// # Errors
///
/// Returns [`NameError::MissingStart`] when there is no opening delimiter
/// and [`NameError::MissingEnd`] when nothing closes it.
///
/// # Examples
///
/// ```
/// use makesense::trace::target_name;
///
/// assert_eq!(target_name("Pruning file 'my great target'."), Ok("my great target"));
/// ```
pub fn target_name(line: &str) -> Result<&str, NameError> {
    let (_, rest) = line
        .split_once(['`', '\''])
        .ok_or(NameError::MissingStart)?;
    let (name, _) = rest.split_once('\'').ok_or(NameError::MissingEnd)?;
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("   a", "a", 3)]
    #[case("a b c", "a b c", 0)]
    #[case("", "", 0)]
    #[case("    ", "", 4)]
    #[case("\tcc -c x.c", "\tcc -c x.c", 0)]
    fn strips_indentation(#[case] line: &str, #[case] text: &str, #[case] depth: usize) {
        assert_eq!(strip_indent(line), (text, depth));
    }

    #[rstest]
    #[case::legacy("Considering target file `b'.", "b")]
    #[case::legacy_spaces("Considering target file `my great target'.", "my great target")]
    #[case::modern("Considering target file 'my great target'.", "my great target")]
    #[case::reading("Reading makefile 'Makefile'...", "Makefile")]
    #[case::reading_search_path(
        "Reading makefile 'rules.mk' (search path) (no ~ expansion)...",
        "rules.mk"
    )]
    #[case::empty_name("Pruning file ''.", "")]
    fn extracts_names(#[case] line: &str, #[case] expected: &str) {
        assert_eq!(target_name(line), Ok(expected));
    }

    #[rstest]
    #[case("Considering target file b.", NameError::MissingStart)]
    #[case("Considering target file `b.", NameError::MissingEnd)]
    #[case("Pruning file 'b", NameError::MissingEnd)]
    fn rejects_malformed_names(#[case] line: &str, #[case] expected: NameError) {
        assert_eq!(target_name(line), Err(expected));
    }

    #[rstest]
    #[case("Considering target file 'a'.", LineKind::Considering)]
    #[case("Must remake target 'a'.", LineKind::MustRemake)]
    #[case("Pruning file 'a'.", LineKind::Pruning)]
    #[case("Finished prerequisites of target file 'a'.", LineKind::Finished)]
    #[case("File 'a' was considered already.", LineKind::Finished)]
    #[case("Reading makefile 'Makefile'...", LineKind::ReadingMakefile)]
    #[case("Successfully remade target file 'a'.", LineKind::Remade)]
    #[case("Putting child 0x1 (a) PID 7 on the chain.", LineKind::ChildBookkeeping)]
    #[case("Removing child 0x1 PID 7 from chain.", LineKind::ChildBookkeeping)]
    #[case("Live child 0x1 (a) PID 7 ", LineKind::ChildBookkeeping)]
    #[case("Reaping winning child 0x1 PID 7 ", LineKind::ChildBookkeeping)]
    #[case("No need to remake target 'a'.", LineKind::Other)]
    #[case("File 'a' does not exist.", LineKind::Other)]
    #[case("echo a", LineKind::Other)]
    fn classifies_lines(#[case] text: &str, #[case] expected: LineKind) {
        assert_eq!(LineKind::of(text), expected);
    }

    #[rstest]
    fn markers_are_case_sensitive() {
        assert_eq!(LineKind::of("considering target file 'a'."), LineKind::Other);
    }

    #[rstest]
    fn parse_records_depth_and_kind() {
        let line = TraceLine::parse("   Finished prerequisites of target file 'x y'.");
        assert_eq!(line.depth, 3);
        assert_eq!(line.kind, LineKind::Finished);
        assert!(line.kind.carries_name());
        assert_eq!(line.target_name(), Ok("x y"));
    }

    #[rstest]
    fn skipped_lines_do_not_need_names() {
        let line = TraceLine::parse("Successfully remade target file");
        assert_eq!(line.kind, LineKind::Other);
        assert!(!LineKind::Remade.carries_name());
    }
}
