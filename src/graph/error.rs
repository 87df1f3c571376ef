//! Internal-consistency errors raised by the graph engine
//!
//! These never describe a problem with the repository being rendered. They
//! mean ingestion produced lanes the renderers cannot reconcile, or the
//! caller broke the `update` / `next_line` sequencing contract. Callers are
//! expected to abort the rendering run when they see one.

use super::GraphState;
use std::fmt;
use thiserror::Error;

/// Engine state captured at the point a check failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub commit: String,
    pub state: GraphState,
    pub num_parents: usize,
    pub commit_index: usize,
    pub expansion_row: usize,
    pub width: usize,
    pub mapping_size: usize,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "commit={} state={} parents={} commit_index={} expansion_row={} width={} mapping_size={}",
            self.commit,
            self.state,
            self.num_parents,
            self.commit_index,
            self.expansion_row,
            self.width,
            self.mapping_size
        )
    }
}

/// Errors raised by [`Graph`](super::Graph).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("palette needs at least 2 colors, got {len}")]
    PaletteTooSmall { len: usize },

    #[error("pre-commit line requested for a commit with fewer than 3 parents [{snapshot}]")]
    PreCommitParents { snapshot: Snapshot },

    #[error("expansion row out of range [{snapshot}]")]
    ExpansionRowOutOfRange { snapshot: Snapshot },

    #[error("no lane found for parent {parent} [{snapshot}]")]
    ParentLaneMissing { parent: String, snapshot: Snapshot },

    #[error("mapping invariant `{check}` violated at cell {cell} [{snapshot}]")]
    MappingInvariant {
        check: &'static str,
        cell: usize,
        snapshot: Snapshot,
    },
}

pub type GraphResult<T> = Result<T, GraphError>;
