//! Makesense core library.
//!
//! Reconstructs make's target-dependency graph from the debug trace printed
//! by `make -nd`. The [`trace`] module parses the transcript into a
//! [`graph::TargetGraph`], and the [`render`] module turns that graph into a
//! listing, a DOT description, a Graphviz image, or JSON.

pub mod cli;
pub mod graph;
pub mod render;
pub mod runner;
pub mod trace;
