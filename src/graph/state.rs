//! Render states of the graph engine

use std::fmt;

/// Which kind of line the engine emits next.
///
/// A commit usually moves `Commit -> Padding`. Merges add `PostMerge`,
/// octopus merges with lanes to their right add `PreCommit` rows first, and
/// lanes left out of place after a merge or fork go through `Collapsing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GraphState {
    /// Idle. Every lane is a plain vertical bar.
    #[default]
    Padding,
    /// A new commit arrived before the previous one was drained.
    Skip,
    /// Expansion rows that make room for octopus-merge lanes.
    PreCommit,
    /// The line carrying the commit marker.
    Commit,
    /// Diagonal connectors from the merge to each parent lane.
    PostMerge,
    /// Lanes sliding left until the mapping is canonical again.
    Collapsing,
}

impl fmt::Display for GraphState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GraphState::Padding => "padding",
            GraphState::Skip => "skip",
            GraphState::PreCommit => "pre-commit",
            GraphState::Commit => "commit",
            GraphState::PostMerge => "post-merge",
            GraphState::Collapsing => "collapsing",
        };
        f.write_str(name)
    }
}
