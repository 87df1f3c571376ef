//! River graph engine
//!
//! Lays out a commit stream as text lanes, the way `git log --graph` does:
//! one column per active branch, with glyphs for forks, merges and lanes
//! sliding back into place. The engine knows nothing about repositories; it
//! only sees commit ids and their ordered parent ids.
//!
//! # Example
//!
//! ```
//! use rivera::graph::{Graph, GraphCommit, NoColor};
//!
//! struct Node(&'static str, Vec<&'static str>);
//!
//! impl GraphCommit for Node {
//!     type Id = &'static str;
//!     fn id(&self) -> &Self::Id {
//!         &self.0
//!     }
//!     fn parent_ids(&self) -> &[Self::Id] {
//!         &self.1
//!     }
//! }
//!
//! let mut graph = Graph::new();
//! graph.set_palette(vec![NoColor, NoColor]).unwrap();
//!
//! let mut out = Vec::new();
//! for commit in [Node("b", vec!["a"]), Node("a", vec![])] {
//!     graph.update(&commit).unwrap();
//!     while !graph.is_commit_finished() {
//!         out.push(graph.next_line().unwrap().text);
//!     }
//! }
//! assert_eq!(out, ["T ", "R "]);
//! ```

mod engine;
mod error;
mod line;
mod mirror;
mod render;
mod state;

pub use engine::{Column, Graph};
pub use error::{GraphError, GraphResult, Snapshot};
pub use line::{ColorToken, Glyph, NoColor, RenderedLine};
pub use mirror::mirror;
pub use state::GraphState;

use std::fmt::Debug;

/// What the engine needs from a commit: a cheap-to-compare id and the ids
/// of its parents, in order.
pub trait GraphCommit {
    type Id: Clone + Eq + Debug;

    fn id(&self) -> &Self::Id;

    fn parent_ids(&self) -> &[Self::Id];
}

#[cfg(test)]
mod tests;
