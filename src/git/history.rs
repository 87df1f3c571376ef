//! Commit history extraction using libgit2
//!
//! Walks the repository children-first and turns each commit into a
//! [`CommitInfo`] the graph engine and the line formatter can consume.

use crate::graph::GraphCommit;
use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, TimeZone};
use git2::{Oid, Repository, Sort};
use std::path::Path;
use tracing::debug;

/// Information about a git commit.
#[derive(Debug, Clone)]
pub struct CommitInfo {
    /// Full commit id
    pub id: Oid,
    /// Parent ids, first parent first
    pub parents: Vec<Oid>,
    /// Author name
    pub author: String,
    /// Author timestamp in the author's own offset
    pub time: DateTime<FixedOffset>,
    /// Commit message (first line)
    pub summary: String,
}

impl GraphCommit for CommitInfo {
    type Id = Oid;

    fn id(&self) -> &Oid {
        &self.id
    }

    fn parent_ids(&self) -> &[Oid] {
        &self.parents
    }
}

/// Which commits to walk.
#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    /// Start from every branch, remote branch and tag instead of HEAD only
    pub all: bool,
    /// Stop after this many commits
    pub max_count: Option<usize>,
}

/// Git history reader using libgit2.
pub struct GitHistory {
    repo: Repository,
}

impl GitHistory {
    /// Open a git repository.
    ///
    /// # Arguments
    /// * `path` - Path to the repository (or any subdirectory)
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path)
            .with_context(|| format!("Failed to open git repository at {:?}", path))?;
        debug!("Opened git repository at {:?}", repo.path());
        Ok(Self { repo })
    }

    /// Check if a path is inside a git repository.
    pub fn is_git_repo(path: &Path) -> bool {
        Repository::discover(path).is_ok()
    }

    pub(crate) fn repo(&self) -> &Repository {
        &self.repo
    }

    /// Commit HEAD points at.
    pub fn head(&self) -> Result<Oid> {
        let head = self.repo.head().context("Failed to resolve HEAD")?;
        let commit = head
            .peel_to_commit()
            .context("HEAD does not point at a commit")?;
        Ok(commit.id())
    }

    /// Walk history so that every commit comes before its parents.
    ///
    /// Commits are sorted topologically, ties broken by commit time.
    pub fn walk(&self, options: &WalkOptions) -> Result<Vec<CommitInfo>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push_head().context("Failed to start walk at HEAD")?;
        if options.all {
            for glob in ["heads", "remotes", "tags"] {
                revwalk
                    .push_glob(glob)
                    .with_context(|| format!("Failed to add refs/{} to walk", glob))?;
            }
        }

        let limit = options.max_count.unwrap_or(usize::MAX);
        let mut commits = Vec::new();
        for oid_result in revwalk.take(limit) {
            let oid = oid_result?;
            let commit = self
                .repo
                .find_commit(oid)
                .with_context(|| format!("Failed to read commit {}", oid))?;
            commits.push(extract_commit_info(&commit)?);
        }

        debug!("Walked {} commits", commits.len());
        Ok(commits)
    }
}

/// Extract commit information from a git2 Commit object.
fn extract_commit_info(commit: &git2::Commit) -> Result<CommitInfo> {
    let author = commit.author();
    let summary = commit
        .message()
        .unwrap_or("")
        .lines()
        .next()
        .unwrap_or("")
        .to_string();

    Ok(CommitInfo {
        id: commit.id(),
        parents: commit.parent_ids().collect(),
        author: author.name().unwrap_or("Unknown").to_string(),
        time: git_time(&author.when())
            .with_context(|| format!("Commit {} has an invalid timestamp", commit.id()))?,
        summary,
    })
}

/// Convert a git timestamp, keeping its timezone offset.
fn git_time(time: &git2::Time) -> Option<DateTime<FixedOffset>> {
    let offset = FixedOffset::east_opt(time.offset_minutes() * 60)?;
    offset.timestamp_opt(time.seconds(), 0).single()
}
