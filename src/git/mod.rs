//! Git repository access
//!
//! Everything the river needs from a repository, and nothing the graph
//! engine ever calls into directly:
//!
//! - Walk history children-first from HEAD (or from every ref)
//! - Index branches, remote branches and tags by commit
//!
//! # Example
//!
//! ```no_run
//! use rivera::git::{GitHistory, RefIndex, WalkOptions};
//! use std::path::Path;
//!
//! let history = GitHistory::open(Path::new("/path/to/repo")).unwrap();
//! let commits = history.walk(&WalkOptions::default()).unwrap();
//! let refs = RefIndex::load(&history).unwrap();
//! ```

pub mod history;
pub mod refs;

pub use history::{CommitInfo, GitHistory, WalkOptions};
pub use refs::{BranchRef, RefIndex};
