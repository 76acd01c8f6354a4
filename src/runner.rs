//! CLI execution.
//!
//! This module keeps `main` minimal by providing a single entry point that
//! reads the trace from standard input, builds the graph, and hands it to
//! the renderer chosen on the command line.

use std::io::{self, BufRead, Write};

use miette::{Result, WrapErr};
use tracing::{debug, info};

use crate::cli::Cli;
use crate::render::{RenderConfig, render};
use crate::trace::{ParseOptions, parse_trace};

/// Execute the parsed [`Cli`] against standard input and output.
///
/// # Errors
///
/// Returns an error if the trace cannot be read or parsed, or if rendering
/// fails.
pub fn run(cli: &Cli) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with(cli, stdin.lock(), &mut stdout.lock())
}

/// Execute `cli` reading the trace from `input` and writing to `out`.
///
/// # Errors
///
/// Returns an error if the trace cannot be read or parsed, or if rendering
/// fails.
pub fn run_with<R: BufRead, W: Write>(cli: &Cli, input: R, out: &mut W) -> Result<()> {
    let options = ParseOptions {
        max_depth: cli.max_depth,
    };
    let parsed = parse_trace(input, &options).wrap_err("parsing make trace")?;
    info!(
        targets = parsed.graph.len() - 1,
        warnings = parsed.warnings.len(),
        "parsed trace"
    );
    let config = RenderConfig::from(cli);
    debug!(?config, "rendering graph");
    render(&parsed.graph, &config, out).wrap_err("rendering graph")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use rstest::rstest;

    const TRACE: &str = concat!(
        "Considering target file 'all'.\n",
        "  Considering target file 'x'.\n",
        "   Finished prerequisites of target file 'x'.\n",
        " Finished prerequisites of target file 'all'.\n",
        "Must remake target 'all'.\n",
        "touch all\n",
        "Successfully remade target file 'all'.\n",
    );

    fn run_args(args: &[&str], input: &str) -> Result<String> {
        let cli = Cli::try_parse_from(args).expect("parse cli");
        let mut out = Vec::new();
        run_with(&cli, input.as_bytes(), &mut out)?;
        Ok(String::from_utf8(out).expect("utf8"))
    }

    #[rstest]
    fn lists_targets() {
        let out = run_args(&["makesense", "--type", "list"], TRACE).expect("run");
        assert_eq!(out, "all\nx\n");
    }

    #[rstest]
    fn defaults_to_dot() {
        let out = run_args(&["makesense"], TRACE).expect("run");
        assert!(out.contains("n1[label=\"all\", color=\"red\"];"));
        assert!(out.contains("n2 -> n1 ;"));
    }

    #[rstest]
    fn malformed_trace_fails() {
        let err = run_args(&["makesense"], "Pruning file nothing\n").expect_err("parse failure");
        assert!(format!("{err:?}").contains("parsing make trace"));
    }

    #[rstest]
    fn max_depth_is_threaded_to_parser() {
        let err = run_args(&["makesense", "--max-depth", "2"], TRACE).expect_err("depth");
        let chain: Vec<String> = err.chain().map(ToString::to_string).collect();
        assert!(chain.iter().any(|m| m.contains("limit of 2 frames")), "{chain:?}");
    }
}
