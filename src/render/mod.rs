//! Renderers turning a finished [`TargetGraph`] into output.
//!
//! The renderer is chosen by a [`RenderConfig`] value built from the command
//! line, so the renderers themselves never consult global state.

mod dot;
mod image;
mod json;
mod list;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitStatus;

use miette::Diagnostic;
use thiserror::Error;

use crate::cli::{Cli, Layout, OutputType, RenderFormat};
use crate::graph::TargetGraph;

pub use dot::{DotStyle, generate as generate_dot};
pub use image::render_image;
pub use json::write_json;
pub use list::write_list;

/// Output selection with the options each output needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderConfig {
    /// One target name per line.
    List,
    /// Graphviz DOT description.
    Dot,
    /// Image produced by an external Graphviz executable.
    Image {
        /// Layout engine passed as `-K`.
        layout: Layout,
        /// Output format passed as `-T`.
        format: RenderFormat,
        /// Graphviz executable.
        program: PathBuf,
    },
    /// JSON record of the whole graph.
    Json,
}

impl From<&Cli> for RenderConfig {
    fn from(cli: &Cli) -> Self {
        match cli.output {
            OutputType::List => Self::List,
            OutputType::Dot => Self::Dot,
            OutputType::Gviz => Self::Image {
                layout: cli.layout,
                format: cli.render,
                program: cli.dot_program.clone(),
            },
            OutputType::Json => Self::Json,
        }
    }
}

/// Errors raised while producing output.
#[derive(Debug, Error, Diagnostic)]
pub enum RenderError {
    /// Writing the output failed.
    #[error("failed to write output")]
    #[diagnostic(code(makesense::render::io))]
    Io(#[from] io::Error),

    /// Serialising the graph failed.
    #[error("failed to serialise graph as JSON")]
    #[diagnostic(code(makesense::render::json))]
    Json(#[from] serde_json::Error),

    /// The Graphviz executable could not be started.
    #[error("failed to run Graphviz executable `{}`", program.display())]
    #[diagnostic(
        code(makesense::render::graphviz_spawn),
        help("install Graphviz or point --dot-program at its `dot` binary")
    )]
    GraphvizSpawn {
        /// Executable that was attempted.
        program: PathBuf,
        /// Underlying spawn error.
        #[source]
        source: io::Error,
    },

    /// Graphviz ran but reported failure.
    #[error("Graphviz exited with {status}: {stderr}")]
    #[diagnostic(code(makesense::render::graphviz_failed))]
    GraphvizFailed {
        /// Exit status of the Graphviz process.
        status: ExitStatus,
        /// Captured standard error.
        stderr: String,
    },
}

/// Render `graph` to `out` as selected by `config`.
///
/// # Errors
///
/// Returns [`RenderError`] when writing fails or Graphviz cannot produce
/// the requested image.
pub fn render<W: Write>(
    graph: &TargetGraph,
    config: &RenderConfig,
    out: &mut W,
) -> Result<(), RenderError> {
    match config {
        RenderConfig::List => write_list(graph, out)?,
        RenderConfig::Dot => out.write_all(generate_dot(graph, DotStyle::Plain).as_bytes())?,
        RenderConfig::Image {
            layout,
            format,
            program,
        } => render_image(graph, *layout, *format, program, out)?,
        RenderConfig::Json => write_json(graph, out)?,
    }
    out.flush()?;
    Ok(())
}
