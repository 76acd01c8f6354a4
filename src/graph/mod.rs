//! Target registry and graph model.
//!
//! A [`TargetGraph`] interns target names into [`Target`] nodes. Each node
//! receives a small sequential identifier on first registration, and the
//! graph keeps nodes in that order so every renderer sees the same sequence
//! for the same input. Edges are stored by name on the dependent node, which
//! lets a diamond dependency share one child node between several parents.
//!
//! # Examples
//!
//! ```
//! use makesense::graph::{ROOT_TARGET, TargetGraph};
//!
//! let mut graph = TargetGraph::new();
//! graph.add_child(ROOT_TARGET, "all");
//! graph.add_child("all", "main.o");
//! assert_eq!(graph.get("all").map(|t| t.id), Some(1));
//! assert_eq!(graph.len(), 3);
//! ```

use indexmap::IndexMap;
use serde::Serialize;
use tracing::warn;

/// Name of the synthetic node representing the top-level goals.
///
/// Make never prints this name for a real target, so it cannot collide with
/// anything read from a trace in practice.
pub const ROOT_TARGET: &str = "<ROOT>";

/// One make target discovered in a trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
    /// Registration order; never reused within a graph.
    pub id: usize,
    /// Name exactly as make printed it. May contain spaces.
    pub name: String,
    /// Dependencies considered while resolving this target, in trace order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
    /// Commands make would run to rebuild this target.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<String>,
    /// Whether make reported that this target must be remade.
    pub must_remake: bool,
}

impl Target {
    fn new(id: usize, name: &str) -> Self {
        Self {
            id,
            name: name.to_owned(),
            children: Vec::new(),
            commands: Vec::new(),
            must_remake: false,
        }
    }

    /// Return `true` when this node is the synthetic root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.name == ROOT_TARGET
    }
}

/// Mapping from target name to node, rooted at [`ROOT_TARGET`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetGraph {
    root: String,
    targets: IndexMap<String, Target>,
}

impl Default for TargetGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl TargetGraph {
    /// Create a graph holding only the root node, which receives id 0.
    #[must_use]
    pub fn new() -> Self {
        let mut graph = Self {
            root: ROOT_TARGET.to_owned(),
            targets: IndexMap::new(),
        };
        graph.get_or_create(ROOT_TARGET);
        graph
    }

    /// Return the node registered under `name`, creating it with the next
    /// sequential id when it does not exist yet.
    pub fn get_or_create(&mut self, name: &str) -> &mut Target {
        let next_id = self.targets.len();
        self.targets
            .entry(name.to_owned())
            .or_insert_with(|| Target::new(next_id, name))
    }

    /// Record `child` as a dependency of `parent`, registering both.
    ///
    /// Repeated edges are kept; make reports each consideration separately.
    /// The root is never attached as a child.
    pub fn add_child(&mut self, parent: &str, child: &str) {
        self.get_or_create(parent);
        self.get_or_create(child);
        if child == self.root {
            warn!(parent, "ignoring edge to the root target");
            return;
        }
        self.get_or_create(parent).children.push(child.to_owned());
    }

    /// Name of the root node.
    #[must_use]
    pub fn root_name(&self) -> &str {
        &self.root
    }

    /// The root node.
    ///
    /// # Panics
    ///
    /// Never panics in practice: the root is registered by [`Self::new`] and
    /// nodes are never removed.
    #[must_use]
    #[expect(
        clippy::expect_used,
        reason = "the root node is inserted on construction and never removed"
    )]
    pub fn root(&self) -> &Target {
        self.targets.get(&self.root).expect("root target registered")
    }

    /// Look up a node by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Target> {
        self.targets.get(name)
    }

    /// Iterate over every node, root included, in id order.
    pub fn targets(&self) -> impl Iterator<Item = &Target> {
        self.targets.values()
    }

    /// Number of nodes, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Return `true` when the graph holds nothing but the root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.len() <= 1
    }

    /// Names of the nodes that list `name` as a child, in id order and
    /// without repetition.
    #[must_use]
    pub fn parents_of(&self, name: &str) -> Vec<&str> {
        self.targets
            .values()
            .filter(|t| t.children.iter().any(|c| c == name))
            .map(|t| t.name.as_str())
            .collect()
    }
}
