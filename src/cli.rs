//! Command line interface definition using clap.
//!
//! This module defines the [`Cli`] structure and the value enums selecting
//! the output format. It depends only on `clap` so the build script can
//! include it to generate the manual page.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Default ceiling on nested target frames.
const DEFAULT_MAX_DEPTH: usize = 4096;

fn parse_max_depth(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("{s} is not a valid number"))?;
    if value == 0 {
        Err(String::from("max depth must be at least 1"))
    } else {
        Ok(value)
    }
}

/// Reconstruct make's target-dependency graph from a `make -nd` trace read
/// on standard input.
#[derive(Debug, Parser)]
#[command(name = "makesense", author, version, about, long_about = None)]
pub struct Cli {
    /// Output to produce.
    #[arg(short = 't', long = "type", value_enum, default_value_t = OutputType::Dot)]
    pub output: OutputType,

    /// Graphviz layout engine used by `--type gviz`.
    #[arg(short, long, value_enum, default_value_t = Layout::Dot)]
    pub layout: Layout,

    /// Format Graphviz renders to with `--type gviz`.
    #[arg(short, long, value_enum, default_value_t = RenderFormat::Svg)]
    pub render: RenderFormat,

    /// Graphviz executable used by `--type gviz`.
    #[arg(long, value_name = "PATH", default_value = "dot")]
    pub dot_program: PathBuf,

    /// Maximum nesting of targets accepted before the trace is rejected.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH, value_parser = parse_max_depth)]
    pub max_depth: usize,

    /// Enable verbose logging output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output kinds selectable with `--type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputType {
    /// One target name per line.
    List,
    /// Graphviz DOT description.
    Dot,
    /// Image laid out and rendered by Graphviz.
    #[value(alias = "gv")]
    Gviz,
    /// JSON record of the whole graph.
    Json,
}

/// Graphviz layout engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Layout {
    /// Hierarchical layout.
    Dot,
    /// Circular layout.
    Circo,
    /// Force-directed placement.
    Fdp,
    /// Spring model layout.
    Neato,
    /// Use positions already in the input.
    Nop,
    /// Like `nop`, positions only.
    Nop1,
    /// Like `nop`, positions and edges.
    Nop2,
    /// Array-based layout for clustered graphs.
    Osage,
    /// Squarified treemap.
    Patchwork,
    /// Scalable force-directed placement.
    Sfdp,
    /// Radial layout.
    Twopi,
}

impl Layout {
    /// Engine name as Graphviz spells it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dot => "dot",
            Self::Circo => "circo",
            Self::Fdp => "fdp",
            Self::Neato => "neato",
            Self::Nop => "nop",
            Self::Nop1 => "nop1",
            Self::Nop2 => "nop2",
            Self::Osage => "osage",
            Self::Patchwork => "patchwork",
            Self::Sfdp => "sfdp",
            Self::Twopi => "twopi",
        }
    }
}

/// Graphviz output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RenderFormat {
    /// Laid-out DOT text.
    Dot,
    /// Scalable vector graphics.
    Svg,
    /// PNG bitmap.
    Png,
    /// JPEG bitmap.
    Jpg,
}

impl RenderFormat {
    /// Format name as Graphviz spells it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dot => "dot",
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Jpg => "jpg",
        }
    }
}
