//! Lane bookkeeping: columns, mapping arrays and commit ingestion

use super::error::{GraphError, GraphResult, Snapshot};
use super::line::{ColorToken, Glyph, GraphLine, RenderedLine};
use super::{GraphCommit, GraphState};
use std::fmt::Debug;
use tracing::{debug, trace};

const DEFAULT_CAPACITY: usize = 30;

/// `merge_layout` before the first parent of a merge has been placed.
pub(crate) const MERGE_LAYOUT_UNSET: isize = -1;

/// One active lane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column<I> {
    /// Commit the lane is waiting for.
    pub commit: I,
    /// Index into the palette.
    pub color: usize,
}

/// Stateful river renderer.
///
/// Feed commits children-first with [`Graph::update`], then call
/// [`Graph::next_line`] until [`Graph::is_commit_finished`] before feeding
/// the next one.
#[derive(Debug)]
pub struct Graph<I, C> {
    pub(crate) commit: Option<I>,
    pub(crate) parents: Vec<I>,
    pub(crate) state: GraphState,
    pub(crate) prev_state: GraphState,
    pub(crate) num_parents: usize,
    /// Edges a merge pushes to the right. `-1` once a later parent reused
    /// the slot just before it.
    pub(crate) edges_added: isize,
    pub(crate) prev_edges_added: isize,
    pub(crate) width: usize,
    pub(crate) expansion_row: usize,
    pub(crate) commit_index: usize,
    pub(crate) prev_commit_index: usize,
    /// -1 unset, 0 merge slants left, 1 merge slants right.
    pub(crate) merge_layout: isize,
    pub(crate) columns: Vec<Column<I>>,
    pub(crate) new_columns: Vec<Column<I>>,
    /// Screen cell -> index into `new_columns`.
    pub(crate) mapping: Vec<Option<usize>>,
    pub(crate) old_mapping: Vec<Option<usize>>,
    pub(crate) mapping_size: usize,
    pub(crate) column_capacity: usize,
    pub(crate) default_color: usize,
    pub(crate) palette: Vec<C>,
}

impl<I, C> Default for Graph<I, C>
where
    I: Clone + Eq + Debug,
    C: ColorToken,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<I, C> Graph<I, C>
where
    I: Clone + Eq + Debug,
    C: ColorToken,
{
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an engine with room for `capacity` lanes before it reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            commit: None,
            parents: Vec::new(),
            state: GraphState::Padding,
            prev_state: GraphState::Padding,
            num_parents: 0,
            edges_added: 0,
            prev_edges_added: 0,
            width: 0,
            expansion_row: 0,
            commit_index: 0,
            prev_commit_index: 0,
            merge_layout: MERGE_LAYOUT_UNSET,
            columns: Vec::with_capacity(capacity),
            new_columns: Vec::with_capacity(capacity),
            mapping: vec![None; capacity * 2],
            old_mapping: vec![None; capacity * 2],
            mapping_size: 0,
            column_capacity: capacity,
            default_color: 0,
            palette: Vec::new(),
        }
    }

    /// Install the lane colors. At least two are required.
    pub fn set_palette(&mut self, palette: Vec<C>) -> GraphResult<()> {
        if palette.len() < 2 {
            return Err(GraphError::PaletteTooSmall { len: palette.len() });
        }
        self.palette = palette;
        self.default_color %= self.palette.len();
        Ok(())
    }

    pub fn state(&self) -> GraphState {
        self.state
    }

    /// Screen cells every line of the current commit is padded to.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of lanes after the current commit.
    pub fn lanes(&self) -> usize {
        self.new_columns.len()
    }

    pub fn is_commit_finished(&self) -> bool {
        self.state == GraphState::Padding
    }

    /// Ingest the next commit.
    ///
    /// The previous commit must already be drained; if it is not, the next
    /// line is a `...` skip line and the half-drawn commit is abandoned.
    pub fn update<T>(&mut self, commit: &T) -> GraphResult<()>
    where
        T: GraphCommit<Id = I>,
    {
        if self.palette.len() < 2 {
            return Err(GraphError::PaletteTooSmall {
                len: self.palette.len(),
            });
        }

        self.commit = Some(commit.id().clone());
        self.parents = commit.parent_ids().to_vec();
        self.num_parents = self.parents.len();
        self.prev_commit_index = self.commit_index;

        self.update_columns();

        self.expansion_row = 0;
        self.state = if self.state != GraphState::Padding {
            GraphState::Skip
        } else if self.needs_pre_commit_line() {
            GraphState::PreCommit
        } else {
            GraphState::Commit
        };
        trace!(commit = ?commit.id(), state = %self.state, width = self.width, "graph updated");
        Ok(())
    }

    /// Produce the next line for the current commit.
    pub fn next_line(&mut self) -> GraphResult<RenderedLine> {
        let mut line = GraphLine::default();
        let mut is_commit = false;
        match self.state {
            GraphState::Padding => self.output_padding_line(&mut line),
            GraphState::Skip => self.output_skip_line(&mut line),
            GraphState::PreCommit => self.output_pre_commit_line(&mut line)?,
            GraphState::Commit => {
                self.output_commit_line(&mut line)?;
                is_commit = true;
            }
            GraphState::PostMerge => self.output_post_merge_line(&mut line)?,
            GraphState::Collapsing => self.output_collapsing_line(&mut line)?,
        }
        line.pad_to(self.width);
        Ok(line.finish(is_commit))
    }

    fn update_columns(&mut self) {
        std::mem::swap(&mut self.columns, &mut self.new_columns);
        self.new_columns.clear();

        let num_columns = self.columns.len();
        let max_new_columns = num_columns + self.num_parents;
        self.ensure_capacity(max_new_columns);

        self.mapping_size = max_new_columns * 2;
        self.mapping[..self.mapping_size].fill(None);

        self.width = 0;
        self.prev_edges_added = self.edges_added;
        self.edges_added = 0;

        let Some(commit) = self.commit.clone() else {
            return;
        };

        let mut seen_this = false;
        let mut in_columns = true;
        for i in 0..=num_columns {
            let col_commit = if i == num_columns {
                if seen_this {
                    break;
                }
                // Not waited on by any lane: a new branch tip.
                in_columns = false;
                commit.clone()
            } else {
                self.columns[i].commit.clone()
            };

            if col_commit == commit {
                seen_this = true;
                self.commit_index = i;
                self.merge_layout = MERGE_LAYOUT_UNSET;

                let parents = self.parents.clone();
                for parent in parents {
                    if self.num_parents > 1 || !in_columns {
                        self.increment_column_color();
                    }
                    self.insert_into_new_columns(parent, Some(i));
                }
                // Roots reserve their cell even though no lane continues.
                if self.num_parents == 0 {
                    self.width += 2;
                }
            } else {
                self.insert_into_new_columns(col_commit, None);
            }
        }

        while self.mapping_size > 1 && self.mapping[self.mapping_size - 1].is_none() {
            self.mapping_size -= 1;
        }
    }

    fn insert_into_new_columns(&mut self, commit: I, commit_column: Option<usize>) {
        let i = match self.find_new_column_by_commit(&commit) {
            Some(i) => i,
            None => {
                let color = self.find_commit_color(&commit);
                self.new_columns.push(Column { commit, color });
                self.new_columns.len() - 1
            }
        };

        let mapping_index = match commit_column {
            Some(idx) if self.num_parents > 1 && self.merge_layout == MERGE_LAYOUT_UNSET => {
                let dist = idx as isize - i as isize;
                let shift = if dist > 1 { 2 * dist - 3 } else { 1 };
                self.merge_layout = if dist > 0 { 0 } else { 1 };
                self.edges_added = self.num_parents as isize + self.merge_layout - 2;
                let index = self.width as isize + (self.merge_layout - 1) * shift;
                self.width += 2 * self.merge_layout as usize;
                index as usize
            }
            _ if self.edges_added > 0
                && self.width >= 2
                && self.mapping[self.width - 2] == Some(i) =>
            {
                self.edges_added = -1;
                self.width - 2
            }
            _ => {
                let index = self.width;
                self.width += 2;
                index
            }
        };
        self.mapping[mapping_index] = Some(i);
    }

    fn ensure_capacity(&mut self, num_columns: usize) {
        if self.column_capacity >= num_columns {
            return;
        }
        loop {
            self.column_capacity *= 2;
            if self.column_capacity > num_columns {
                break;
            }
        }
        debug!(capacity = self.column_capacity, "growing lane capacity");

        let extra = self.column_capacity.saturating_sub(self.columns.len());
        self.columns.reserve(extra);
        let extra = self.column_capacity.saturating_sub(self.new_columns.len());
        self.new_columns.reserve(extra);
        self.mapping.resize(self.column_capacity * 2, None);
        self.old_mapping.resize(self.column_capacity * 2, None);
    }

    fn increment_column_color(&mut self) {
        self.default_color = (self.default_color + 1) % self.palette.len();
    }

    fn find_new_column_by_commit(&self, commit: &I) -> Option<usize> {
        self.new_columns.iter().position(|c| &c.commit == commit)
    }

    fn find_commit_color(&self, commit: &I) -> usize {
        self.columns
            .iter()
            .find(|c| &c.commit == commit)
            .map_or(self.default_color, |c| c.color)
    }

    pub(crate) fn num_dashed_parents(&self) -> isize {
        self.num_parents as isize + self.merge_layout - 3
    }

    pub(crate) fn num_expansion_rows(&self) -> isize {
        self.num_dashed_parents() * 2
    }

    pub(crate) fn needs_pre_commit_line(&self) -> bool {
        self.num_parents >= 3
            && self.commit_index + 1 < self.columns.len()
            && (self.expansion_row as isize) < self.num_expansion_rows()
    }

    pub(crate) fn is_mapping_correct(&self) -> bool {
        self.mapping[..self.mapping_size]
            .iter()
            .enumerate()
            .all(|(i, target)| target.map_or(true, |t| t == i / 2))
    }

    pub(crate) fn update_state(&mut self, state: GraphState) {
        trace!(from = %self.state, to = %state, "graph state");
        self.prev_state = self.state;
        self.state = state;
    }

    pub(crate) fn is_current(&self, commit: &I) -> bool {
        self.commit.as_ref() == Some(commit)
    }

    pub(crate) fn paint(&self, line: &mut GraphLine, color: usize, glyph: Glyph) {
        line.push_painted(&self.palette[color % self.palette.len()], glyph);
    }

    pub(crate) fn snapshot(&self) -> Snapshot {
        Snapshot {
            commit: self
                .commit
                .as_ref()
                .map_or_else(|| "<none>".to_string(), |c| format!("{c:?}")),
            state: self.state,
            num_parents: self.num_parents,
            commit_index: self.commit_index,
            expansion_row: self.expansion_row,
            width: self.width,
            mapping_size: self.mapping_size,
        }
    }
}
