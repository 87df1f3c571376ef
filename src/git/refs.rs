//! Reference index: which branches and tags point at which commit

use super::GitHistory;
use anyhow::{Context, Result};
use git2::{Oid, ReferenceType};
use std::collections::HashMap;
use tracing::debug;

/// A branch name and where it lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchRef {
    Local(String),
    Remote(String),
}

impl BranchRef {
    pub fn name(&self) -> &str {
        match self {
            BranchRef::Local(name) | BranchRef::Remote(name) => name,
        }
    }
}

/// Refs keyed by the commit they resolve to.
#[derive(Debug, Default)]
pub struct RefIndex {
    head: Option<Oid>,
    tags: HashMap<Oid, Vec<String>>,
    branches: HashMap<Oid, Vec<BranchRef>>,
}

impl RefIndex {
    /// Read HEAD, every tag and every branch of the repository.
    ///
    /// Annotated tags are peeled to their commit. Symbolic refs such as
    /// `origin/HEAD` are skipped.
    pub fn load(history: &GitHistory) -> Result<Self> {
        let repo = history.repo();
        let mut index = RefIndex {
            head: history.head().ok(),
            ..Default::default()
        };

        for reference in repo.references().context("Failed to list references")? {
            let reference = reference.context("Failed to read reference")?;
            if reference.kind() != Some(ReferenceType::Direct) {
                continue;
            }
            let Some(short) = reference.shorthand().map(str::to_string) else {
                continue;
            };
            let (is_tag, is_branch, is_remote) =
                (reference.is_tag(), reference.is_branch(), reference.is_remote());
            if !(is_tag || is_branch || is_remote) {
                continue;
            }
            let oid = match reference.peel_to_commit() {
                Ok(commit) => commit.id(),
                Err(e) => {
                    debug!("Skipping {} (not a commit): {}", short, e);
                    continue;
                }
            };

            if is_tag {
                index.tags.entry(oid).or_default().push(short);
            } else if is_remote {
                index.branches.entry(oid).or_default().push(BranchRef::Remote(short));
            } else {
                index.branches.entry(oid).or_default().push(BranchRef::Local(short));
            }
        }

        debug!(
            "Indexed {} tagged and {} branch commits",
            index.tags.len(),
            index.branches.len()
        );
        Ok(index)
    }

    pub fn is_head(&self, oid: Oid) -> bool {
        self.head == Some(oid)
    }

    pub fn tags(&self, oid: Oid) -> &[String] {
        self.tags.get(&oid).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn branches(&self, oid: Oid) -> &[BranchRef] {
        self.branches.get(&oid).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_refs(&self, oid: Oid) -> bool {
        self.is_head(oid) || !self.tags(oid).is_empty() || !self.branches(oid).is_empty()
    }
}
