//! Reconstruction of make's recursive target resolution.
//!
//! Make resolves targets depth first and indents its debug messages by the
//! depth of the target currently being resolved. The parser mirrors that
//! recursion with an explicit stack of frames. A "considering" line
//! opens a frame for the named target one level below the current one, and
//! the matching "finished" line closes it again.
//!
//! A frame only reacts to "considering" and "finished" lines that are at
//! most one level deeper than its own marker lines. Deeper lines belong to
//! a frame that has already been opened and closed beneath it.

use std::io::BufRead;
use std::mem;
use std::ops::ControlFlow;

use tracing::{debug, warn};

use super::commands::read_commands;
use super::error::TraceError;
use super::line::{LineKind, NameError, TraceLine};
use super::reader::TraceLines;
use super::{ParseOptions, ParsedTrace, TraceWarning};
use crate::graph::{ROOT_TARGET, TargetGraph};

/// One target whose prerequisites are being resolved.
#[derive(Debug)]
struct Frame {
    target: String,
    /// Indentation of this target's own marker lines.
    depth: usize,
    /// Most recent `Reading makefile` seen while this frame was on top.
    makefile: Option<String>,
}

impl Frame {
    fn new(target: &str, depth: usize) -> Self {
        Self {
            target: target.to_owned(),
            depth,
            makefile: None,
        }
    }

    const fn accepts(&self, line_depth: usize) -> bool {
        line_depth <= self.depth + 1
    }
}

pub(crate) struct TraceParser<R> {
    lines: TraceLines<R>,
    graph: TargetGraph,
    current: Frame,
    parents: Vec<Frame>,
    warnings: Vec<TraceWarning>,
    max_depth: usize,
}

impl<R: BufRead> TraceParser<R> {
    pub(crate) fn new(reader: R, options: &ParseOptions) -> Self {
        Self {
            lines: TraceLines::new(reader),
            graph: TargetGraph::new(),
            current: Frame::new(ROOT_TARGET, 0),
            parents: Vec::new(),
            warnings: Vec::new(),
            max_depth: options.max_depth,
        }
    }

    /// Consume the whole stream, or stop early once the root frame closes.
    pub(crate) fn run(mut self) -> Result<ParsedTrace, TraceError> {
        while let Some(raw) = self.lines.next_line()? {
            let line = TraceLine::parse(&raw);
            if self.step(&line)?.is_break() {
                debug!(line = self.lines.line_number(), "root frame closed");
                break;
            }
        }
        if !self.parents.is_empty() {
            debug!(
                open = self.parents.len(),
                target_name = %self.current.target,
                "input ended with frames still open",
            );
        }
        Ok(ParsedTrace {
            graph: self.graph,
            warnings: self.warnings,
        })
    }

    fn step(&mut self, line: &TraceLine<'_>) -> Result<ControlFlow<()>, TraceError> {
        match line.kind {
            LineKind::Considering => self.considering(line)?,
            LineKind::MustRemake => self.must_remake(line)?,
            LineKind::Pruning => {
                let name = self.name_of(line)?;
                self.graph.add_child(&self.current.target, name);
            }
            LineKind::Finished if self.current.accepts(line.depth) => {
                return self.finished(line);
            }
            LineKind::ReadingMakefile => {
                let name = self.name_of(line)?;
                self.current.makefile = Some(name.to_owned());
            }
            _ => {}
        }
        Ok(ControlFlow::Continue(()))
    }

    fn considering(&mut self, line: &TraceLine<'_>) -> Result<(), TraceError> {
        let name = self.name_of(line)?;
        if self.current.makefile.as_deref() == Some(name) {
            self.burn(name)?;
            self.attach(name, line.depth);
            return Ok(());
        }
        if self.attach(name, line.depth) {
            self.push(Frame::new(name, line.depth + 1))?;
        }
        Ok(())
    }

    /// Register `name` and link it below the current frame when `depth` is
    /// within reach. Returns whether the edge was added.
    fn attach(&mut self, name: &str, depth: usize) -> bool {
        self.graph.get_or_create(name);
        if !self.current.accepts(depth) {
            debug!(
                target_name = name,
                depth,
                frame = %self.current.target,
                "considering line belongs to a deeper frame",
            );
            return false;
        }
        self.graph.add_child(&self.current.target, name);
        true
    }

    fn must_remake(&mut self, line: &TraceLine<'_>) -> Result<(), TraceError> {
        let name = self.name_of(line)?;
        let line_number = self.lines.line_number();
        self.graph.get_or_create(name);
        let block = read_commands(&mut self.lines)?;
        if !block.terminated {
            warn!(target_name = name, line = line_number, "command block never finished");
            self.warnings.push(TraceWarning::UnterminatedCommands {
                target: name.to_owned(),
                line_number,
            });
        }
        let target = self.graph.get_or_create(name);
        if target.must_remake {
            warn!(target_name = name, line = line_number, "target reported for remaking twice");
            self.warnings.push(TraceWarning::RepeatedRemake {
                target: name.to_owned(),
                line_number,
            });
            return Ok(());
        }
        debug!(target_name = name, commands = block.commands.len(), "must remake");
        target.must_remake = true;
        target.commands = block.commands;
        Ok(())
    }

    fn finished(&mut self, line: &TraceLine<'_>) -> Result<ControlFlow<()>, TraceError> {
        let name = self.name_of(line)?;
        if name != self.current.target {
            let line_number = self.lines.line_number();
            warn!(
                expected = %self.current.target,
                found = line.text,
                line = line_number,
                "finished marker names a different target",
            );
            self.warnings.push(TraceWarning::FrameMismatch {
                expected: self.current.target.clone(),
                found: name.to_owned(),
                line_number,
            });
        }
        Ok(self.pop())
    }

    /// Discard make's re-check of its own makefile, up to and including the
    /// finished marker for that makefile.
    fn burn(&mut self, makefile: &str) -> Result<(), TraceError> {
        let line_number = self.lines.line_number();
        debug!(makefile, line = line_number, "skipping makefile self-check");
        while let Some(raw) = self.lines.next_line()? {
            let line = TraceLine::parse(&raw);
            if line.kind == LineKind::Finished && self.name_of(&line)? == makefile {
                return Ok(());
            }
        }
        warn!(makefile, line = line_number, "makefile self-check never finished");
        self.warnings.push(TraceWarning::UnterminatedBurn {
            makefile: makefile.to_owned(),
            line_number,
        });
        Ok(())
    }

    fn push(&mut self, frame: Frame) -> Result<(), TraceError> {
        if self.parents.len() + 1 >= self.max_depth {
            return Err(TraceError::DepthExceeded {
                line_number: self.lines.line_number(),
                limit: self.max_depth,
            });
        }
        debug!(target_name = %frame.target, depth = frame.depth, "open frame");
        let parent = mem::replace(&mut self.current, frame);
        self.parents.push(parent);
        Ok(())
    }

    fn pop(&mut self) -> ControlFlow<()> {
        let Some(parent) = self.parents.pop() else {
            return ControlFlow::Break(());
        };
        let done = mem::replace(&mut self.current, parent);
        debug!(target_name = %done.target, "close frame");
        ControlFlow::Continue(())
    }

    fn name_of<'a>(&self, line: &TraceLine<'a>) -> Result<&'a str, TraceError> {
        line.target_name().map_err(|err| {
            let line_number = self.lines.line_number();
            let text = line.text.to_owned();
            match err {
                NameError::MissingStart => TraceError::MissingNameStart {
                    line_number,
                    line: text,
                },
                NameError::MissingEnd => TraceError::MissingNameEnd {
                    line_number,
                    line: text,
                },
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::{ParseOptions, ParsedTrace, TraceWarning, parse_trace};
    use super::*;
    use rstest::rstest;

    fn parse(input: &str) -> ParsedTrace {
        parse_trace(input.as_bytes(), &ParseOptions::default()).expect("parse trace")
    }

    fn children<'a>(parsed: &'a ParsedTrace, name: &str) -> Vec<&'a str> {
        parsed
            .graph
            .get(name)
            .map(|t| t.children.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    const DIAMOND: &str = concat!(
        "Considering target file 'all'.\n",
        " File 'all' does not exist.\n",
        "  Considering target file 'left'.\n",
        "   File 'left' does not exist.\n",
        "    Considering target file 'shared'.\n",
        "     File 'shared' does not exist.\n",
        "     Finished prerequisites of target file 'shared'.\n",
        "    Must remake target 'shared'.\n",
        "touch shared\n",
        "    Successfully remade target file 'shared'.\n",
        "   Finished prerequisites of target file 'left'.\n",
        "  Must remake target 'left'.\n",
        "touch left\n",
        "  Successfully remade target file 'left'.\n",
        "  Considering target file 'right'.\n",
        "   File 'right' does not exist.\n",
        "    Pruning file 'shared'.\n",
        "   Finished prerequisites of target file 'right'.\n",
        "  Must remake target 'right'.\n",
        "touch right\n",
        "  Successfully remade target file 'right'.\n",
        " Finished prerequisites of target file 'all'.\n",
        "Must remake target 'all'.\n",
        "Successfully remade target file 'all'.\n",
    );

    #[rstest]
    fn nests_frames_by_indentation() {
        let parsed = parse(DIAMOND);
        assert!(parsed.warnings.is_empty());
        assert_eq!(children(&parsed, ROOT_TARGET), vec!["all"]);
        assert_eq!(children(&parsed, "all"), vec!["left", "right"]);
        assert_eq!(children(&parsed, "left"), vec!["shared"]);
        let ids: Vec<_> = parsed.graph.targets().map(|t| t.name.as_str()).collect();
        assert_eq!(ids, vec![ROOT_TARGET, "all", "left", "shared", "right"]);
    }

    #[rstest]
    fn pruned_target_is_shared_not_rewalked() {
        let parsed = parse(DIAMOND);
        assert_eq!(parsed.graph.len(), 5);
        assert_eq!(parsed.graph.parents_of("shared"), vec!["left", "right"]);
        let shared = parsed.graph.get("shared").expect("shared registered");
        assert!(shared.must_remake);
        assert_eq!(shared.commands, vec!["touch shared"]);
        assert!(shared.children.is_empty());
    }

    #[rstest]
    fn remake_flags_and_commands_are_recorded() {
        let parsed = parse(DIAMOND);
        let all = parsed.graph.get("all").expect("all registered");
        assert!(all.must_remake);
        assert!(all.commands.is_empty());
        assert!(!parsed.graph.root().must_remake);
    }

    #[rstest]
    fn considered_already_closes_frame() {
        let parsed = parse(concat!(
            "Considering target file 'all'.\n",
            "  Considering target file 'lib'.\n",
            "   Finished prerequisites of target file 'lib'.\n",
            "  No need to remake target 'lib'.\n",
            "  Considering target file 'lib'.\n",
            "  File 'lib' was considered already.\n",
            " Finished prerequisites of target file 'all'.\n",
        ));
        assert!(parsed.warnings.is_empty());
        assert_eq!(parsed.graph.len(), 3);
        assert_eq!(children(&parsed, "all"), vec!["lib", "lib"]);
    }

    #[rstest]
    fn mismatched_finished_marker_warns_and_closes() {
        let parsed = parse(concat!(
            "Considering target file 'all'.\n",
            " Finished prerequisites of target file 'other'.\n",
            "Must remake target 'all'.\n",
            "Successfully remade target file 'all'.\n",
        ));
        assert_eq!(
            parsed.warnings,
            vec![TraceWarning::FrameMismatch {
                expected: "all".into(),
                found: "other".into(),
                line_number: 2,
            }]
        );
        assert!(parsed.graph.get("all").is_some_and(|t| t.must_remake));
    }

    #[rstest]
    fn deeper_considering_line_registers_without_edge() {
        let parsed = parse(concat!(
            "    Considering target file 'stray'.\n",
            "Considering target file 'all'.\n",
            " Finished prerequisites of target file 'all'.\n",
        ));
        assert_eq!(parsed.graph.get("stray").map(|t| t.id), Some(1));
        assert!(parsed.graph.parents_of("stray").is_empty());
        assert_eq!(children(&parsed, ROOT_TARGET), vec!["all"]);
    }

    #[rstest]
    fn makefile_self_check_is_skipped() {
        let parsed = parse(concat!(
            "Reading makefiles...\n",
            "Reading makefile 'Makefile'...\n",
            "Updating makefiles....\n",
            " Considering target file 'Makefile'.\n",
            "  Looking for an implicit rule for 'Makefile'.\n",
            "   Considering target file 'Makefile.in'.\n",
            "   Finished prerequisites of target file 'Makefile.in'.\n",
            "  Finished prerequisites of target file 'Makefile'.\n",
            " No need to remake target 'Makefile'.\n",
            "Updating goal targets....\n",
            "Considering target file 'all'.\n",
            " Finished prerequisites of target file 'all'.\n",
        ));
        assert!(parsed.warnings.is_empty());
        assert!(parsed.graph.get("Makefile.in").is_none());
        assert_eq!(children(&parsed, ROOT_TARGET), vec!["Makefile", "all"]);
        assert!(children(&parsed, "Makefile").is_empty());
    }

    #[rstest]
    fn unfinished_self_check_warns() {
        let parsed = parse(concat!(
            "Reading makefile 'Makefile'...\n",
            " Considering target file 'Makefile'.\n",
            "  Looking for an implicit rule for 'Makefile'.\n",
        ));
        assert_eq!(
            parsed.warnings,
            vec![TraceWarning::UnterminatedBurn {
                makefile: "Makefile".into(),
                line_number: 2,
            }]
        );
    }

    #[rstest]
    fn closing_the_root_frame_stops_parsing() {
        let parsed = parse(concat!(
            "Considering target file 'all'.\n",
            " Finished prerequisites of target file 'all'.\n",
            "Finished prerequisites of target file '<ROOT>'.\n",
            "Considering target file 'late'.\n",
        ));
        assert!(parsed.warnings.is_empty());
        assert!(parsed.graph.get("late").is_none());
    }

    #[rstest]
    fn unterminated_command_block_keeps_partial_list() {
        let parsed = parse("Must remake target 'all'.\necho partial\n");
        let all = parsed.graph.get("all").expect("all registered");
        assert!(all.must_remake);
        assert_eq!(all.commands, vec!["echo partial"]);
        assert_eq!(
            parsed.warnings,
            vec![TraceWarning::UnterminatedCommands {
                target: "all".into(),
                line_number: 1,
            }]
        );
    }

    #[rstest]
    fn repeated_remake_keeps_first_commands() {
        let parsed = parse(concat!(
            "Must remake target 'x'.\n",
            "echo first\n",
            "Successfully remade target file 'x'.\n",
            "Must remake target 'x'.\n",
            "echo second\n",
            "Successfully remade target file 'x'.\n",
        ));
        let x = parsed.graph.get("x").expect("x registered");
        assert_eq!(x.commands, vec!["echo first"]);
        assert_eq!(
            parsed.warnings,
            vec![TraceWarning::RepeatedRemake {
                target: "x".into(),
                line_number: 4,
            }]
        );
    }

    #[rstest]
    fn nesting_beyond_limit_is_fatal() {
        let options = ParseOptions { max_depth: 2 };
        let input = "Considering target file 'a'.\n  Considering target file 'b'.\n";
        let err = parse_trace(input.as_bytes(), &options).expect_err("depth limit");
        assert!(matches!(
            err,
            TraceError::DepthExceeded {
                line_number: 2,
                limit: 2
            }
        ));
    }

    #[rstest]
    #[case::no_opening("Considering target file all.\n")]
    #[case::no_closing("Must remake target `all.\n")]
    fn malformed_names_are_fatal(#[case] input: &str) {
        let err = parse_trace(input.as_bytes(), &ParseOptions::default()).expect_err("malformed");
        assert!(matches!(
            err,
            TraceError::MissingNameStart { line_number: 1, .. }
                | TraceError::MissingNameEnd { line_number: 1, .. }
        ));
    }

    #[rstest]
    fn unrecognised_chatter_is_ignored() {
        let parsed = parse(concat!(
            "GNU Make 4.3\n",
            "Considering target file 'all'.\n",
            " Trying pattern rule with stem 'all'.\n",
            " Rejecting impossible implicit prerequisite 'all.c'.\n",
            " Finished prerequisites of target file 'all'.\n",
        ));
        assert_eq!(parsed.graph.len(), 2);
    }

    #[rstest]
    fn parsing_is_deterministic() {
        assert_eq!(parse(DIAMOND).graph, parse(DIAMOND).graph);
    }
}
