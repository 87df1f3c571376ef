//! Default command: draw the river for a repository

use crate::config::{parse_palette, UserConfig};
use crate::git::{GitHistory, RefIndex, WalkOptions};
use crate::graph::{mirror, Graph};
use crate::reporters::LineFormatter;
use anyhow::{bail, Context, Result};
use console::Style;
use git2::Oid;
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, info};

/// Options that only affect this run, not the stored config.
#[derive(Debug, Clone, Default)]
pub struct RiverOptions {
    pub max_count: Option<usize>,
    pub reverse: bool,
    pub force_color: bool,
}

pub fn run(path: &Path, config: &UserConfig, options: &RiverOptions) -> Result<()> {
    if options.force_color {
        console::set_colors_enabled(true);
    }

    let palette = parse_palette(config.branch_colors())?;
    let formatter = LineFormatter::new(config.hash_length(), config.date_format())?;

    if !GitHistory::is_git_repo(path) {
        bail!("Not a git repository: {}", path.display());
    }
    let history = GitHistory::open(path)?;
    let walk = WalkOptions {
        all: config.all(),
        max_count: options.max_count,
    };
    let commits = history.walk(&walk)?;
    let refs = RefIndex::load(&history)?;
    info!("Drawing {} commits", commits.len());

    let lines = render(&commits, &refs, &formatter, palette, options.reverse)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match write_lines(&mut out, &lines, options.reverse) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            debug!("Output closed early");
            Ok(())
        }
        other => other.context("Failed to write output"),
    }
}

/// Feed every commit through the engine and lay each graph line out.
fn render(
    commits: &[crate::git::CommitInfo],
    refs: &RefIndex,
    formatter: &LineFormatter,
    palette: Vec<Style>,
    reverse: bool,
) -> Result<Vec<String>> {
    let mut graph: Graph<Oid, Style> = Graph::new();
    graph.set_palette(palette)?;

    let mut lines = Vec::new();
    for commit in commits {
        graph.update(commit)?;
        while !graph.is_commit_finished() {
            let rendered = graph.next_line()?;
            let text = if reverse {
                mirror(&rendered.text)
            } else {
                rendered.text
            };
            let line = if rendered.is_commit {
                formatter.format_commit(commit, refs, &text)
            } else {
                formatter.format_connector(commit, &text)
            };
            lines.push(line);
        }
    }
    Ok(lines)
}

fn write_lines(out: &mut impl Write, lines: &[String], reverse: bool) -> io::Result<()> {
    if reverse {
        for line in lines.iter().rev() {
            writeln!(out, "{}", line)?;
        }
    } else {
        for line in lines {
            writeln!(out, "{}", line)?;
        }
    }
    out.flush()
}
