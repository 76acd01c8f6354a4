//! Graphviz DOT generator.
//!
//! Nodes are written in id order and edges grouped by their dependent's id,
//! so the same graph always yields byte-identical output. Edges point from
//! a dependency to the target that needs it.

use std::fmt::{self, Display, Formatter};

use itertools::Itertools;

use crate::graph::{Target, TargetGraph};

/// Node styling variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotStyle {
    /// Labels and rebuild colours only.
    Plain,
    /// Circle nodes with the rebuild commands as tooltips, for images.
    Graphviz,
}

/// Generate a DOT description of `graph`.
///
/// # Examples
///
/// ```
/// use makesense::graph::{ROOT_TARGET, TargetGraph};
/// use makesense::render::{DotStyle, generate_dot};
///
/// let mut graph = TargetGraph::new();
/// graph.add_child(ROOT_TARGET, "all");
/// let dot = generate_dot(&graph, DotStyle::Plain);
/// assert!(dot.contains("n1 -> n0 ;"));
/// ```
#[must_use]
pub fn generate(graph: &TargetGraph, style: DotStyle) -> String {
    DotGraph { graph, style }.to_string()
}

struct DotGraph<'a> {
    graph: &'a TargetGraph,
    style: DotStyle,
}

impl Display for DotGraph<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph G {{")?;
        let nodes: Vec<&Target> = self.graph.targets().sorted_by_key(|t| t.id).collect();
        for target in &nodes {
            write!(
                f,
                "{}",
                DisplayNode {
                    target,
                    style: self.style,
                }
            )?;
        }
        for parent in &nodes {
            for child in parent.children.iter().filter_map(|c| self.graph.get(c)) {
                writeln!(f, "n{} -> n{} ;", child.id, parent.id)?;
            }
        }
        writeln!(f, "}}")
    }
}

/// Wrapper struct to display a node statement.
struct DisplayNode<'a> {
    target: &'a Target,
    style: DotStyle,
}

impl Display for DisplayNode<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let id = self.target.id;
        if self.target.is_root() {
            return writeln!(f, "n{id}[shape=point, label=\"root\"];");
        }
        let label = escape(&self.target.name);
        let color = if self.target.must_remake { "red" } else { "green" };
        match self.style {
            DotStyle::Plain => writeln!(f, "n{id}[label=\"{label}\", color=\"{color}\"];"),
            DotStyle::Graphviz => {
                let tooltip = escape(&self.target.commands.join("\n"));
                writeln!(
                    f,
                    "n{id}[label=\"{label}\", shape=circle, color=\"{color}\", tooltip=\"{tooltip}\"];"
                )
            }
        }
    }
}

/// Escape text for a double-quoted DOT string.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out
}
