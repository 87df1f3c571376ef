//! Text (terminal) line formatter with colors

use crate::git::{BranchRef, CommitInfo, RefIndex};
use anyhow::{bail, Result};
use chrono::format::{Item, StrftimeItems};
use console::style;

/// Summaries are cut at this many characters (the 50/72 rule).
pub const SUMMARY_LIMIT: usize = 72;

/// Lays out one terminal line around a piece of graph text.
#[derive(Debug, Clone)]
pub struct LineFormatter {
    hash_length: usize,
    date_format: String,
    summary_limit: usize,
}

impl LineFormatter {
    /// Create a formatter, rejecting date formats chrono cannot render.
    pub fn new(hash_length: usize, date_format: &str) -> Result<Self> {
        if StrftimeItems::new(date_format).any(|item| matches!(item, Item::Error)) {
            bail!("Invalid date format '{}'", date_format);
        }
        Ok(Self {
            hash_length,
            date_format: date_format.to_string(),
            summary_limit: SUMMARY_LIMIT,
        })
    }

    fn short_hash(&self, commit: &CommitInfo) -> String {
        commit.id.to_string().chars().take(self.hash_length).collect()
    }

    fn date(&self, commit: &CommitInfo) -> String {
        commit.time.format(&self.date_format).to_string()
    }

    /// Visible width of the `<hash> <date>  ` prefix.
    fn prefix_width(&self, commit: &CommitInfo) -> usize {
        self.short_hash(commit).chars().count() + 1 + self.date(commit).chars().count() + 2
    }

    /// `<hash> <date>  <graph><author>[ (refs)] <summary>`
    pub fn format_commit(&self, commit: &CommitInfo, refs: &RefIndex, graph: &str) -> String {
        let mut line = format!(
            "{} {}  {}{}",
            style(self.short_hash(commit)).magenta(),
            style(self.date(commit)).blue(),
            graph,
            style(&commit.author).yellow()
        );

        if refs.has_refs(commit.id) {
            let mut names = Vec::new();
            if refs.is_head(commit.id) {
                names.push(style("HEAD").cyan().to_string());
            }
            for tag in refs.tags(commit.id) {
                names.push(format!("{}{}", style("tag: ").magenta(), style(tag).yellow()));
            }
            for branch in refs.branches(commit.id) {
                let name = match branch {
                    BranchRef::Local(name) => style(name).green(),
                    BranchRef::Remote(name) => style(name).red(),
                };
                names.push(name.to_string());
            }
            let separator = format!("{} ", style(",").blue());
            line.push_str(&format!(
                "{}{}{}",
                style(" (").blue(),
                names.join(&separator),
                style(")").blue()
            ));
        }

        let summary: String = commit.summary.chars().take(self.summary_limit).collect();
        line.push(' ');
        line.push_str(&summary);
        line
    }

    /// Blank metadata columns followed by the graph text.
    pub fn format_connector(&self, commit: &CommitInfo, graph: &str) -> String {
        format!("{}{}", " ".repeat(self.prefix_width(commit)), graph)
            .trim_end()
            .to_string()
    }
}
