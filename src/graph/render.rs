//! Line renderers, one per [`GraphState`]

use super::engine::Graph;
use super::error::{GraphError, GraphResult};
use super::line::{ColorToken, Glyph, GraphLine, MERGE_GLYPHS};
use super::GraphState;
use std::fmt::Debug;

impl<I, C> Graph<I, C>
where
    I: Clone + Eq + Debug,
    C: ColorToken,
{
    pub(crate) fn output_padding_line(&self, line: &mut GraphLine) {
        for column in &self.new_columns {
            self.paint(line, column.color, Glyph::Padding);
            line.push_char(' ');
        }
    }

    pub(crate) fn output_skip_line(&mut self, line: &mut GraphLine) {
        line.push_str("...");
        if self.needs_pre_commit_line() {
            self.update_state(GraphState::PreCommit);
        } else {
            self.update_state(GraphState::Commit);
        }
    }

    pub(crate) fn output_pre_commit_line(&mut self, line: &mut GraphLine) -> GraphResult<()> {
        if self.num_parents < 3 {
            return Err(GraphError::PreCommitParents {
                snapshot: self.snapshot(),
            });
        }
        if (self.expansion_row as isize) >= self.num_expansion_rows() {
            return Err(GraphError::ExpansionRowOutOfRange {
                snapshot: self.snapshot(),
            });
        }

        let mut seen_this = false;
        for (i, column) in self.columns.iter().enumerate() {
            if self.is_current(&column.commit) {
                seen_this = true;
                self.paint(line, column.color, Glyph::Padding);
                line.push_spaces(self.expansion_row);
            } else if seen_this && self.expansion_row == 0 {
                if self.prev_state == GraphState::PostMerge && self.prev_commit_index < i {
                    self.paint(line, column.color, Glyph::RightMove);
                } else {
                    self.paint(line, column.color, Glyph::Padding);
                }
            } else if seen_this {
                self.paint(line, column.color, Glyph::RightMove);
            } else {
                self.paint(line, column.color, Glyph::Padding);
            }
            line.push_char(' ');
        }

        self.expansion_row += 1;
        if !self.needs_pre_commit_line() {
            self.update_state(GraphState::Commit);
        }
        Ok(())
    }

    pub(crate) fn output_commit_line(&mut self, line: &mut GraphLine) -> GraphResult<()> {
        let num_columns = self.columns.len();
        let mut seen_this = false;
        for i in 0..=num_columns {
            let column = self.columns.get(i);
            // Past the last lane the commit itself stands in: a new tip.
            let is_this = match column {
                Some(column) => self.is_current(&column.commit),
                None if seen_this => break,
                None => true,
            };
            let color = column.map_or(self.default_color, |c| c.color);

            if is_this {
                seen_this = true;
                let marker = if self.num_parents == 0 {
                    Glyph::Root
                } else if column.is_none() {
                    Glyph::Tip
                } else {
                    Glyph::Commit
                };
                self.paint(line, color, marker);
                if self.num_parents > 2 {
                    self.draw_octopus_merge(line)?;
                }
            } else if seen_this && self.edges_added > 1 {
                self.paint(line, color, Glyph::Padding);
            } else if seen_this && self.edges_added == 1 {
                if self.prev_state == GraphState::PostMerge
                    && self.prev_edges_added > 0
                    && self.prev_commit_index < i
                {
                    self.paint(line, color, Glyph::RightMove);
                } else {
                    self.paint(line, color, Glyph::Padding);
                }
            } else if self.prev_state == GraphState::Collapsing
                && self.old_mapping.get(2 * i + 1).copied().flatten() == Some(i)
                && self.mapping.get(2 * i).copied().flatten() < Some(i)
            {
                self.paint(line, color, Glyph::LeftMove);
            } else {
                self.paint(line, color, Glyph::Padding);
            }
            line.push_char(' ');
        }

        if self.num_parents > 1 {
            self.update_state(GraphState::PostMerge);
        } else if self.is_mapping_correct() {
            self.update_state(GraphState::Padding);
        } else {
            self.update_state(GraphState::Collapsing);
        }
        Ok(())
    }

    fn draw_octopus_merge(&self, line: &mut GraphLine) -> GraphResult<()> {
        let dashed_parents = self.num_dashed_parents().max(0) as usize;
        for i in 0..dashed_parents {
            let cell = (self.commit_index + i + 2) * 2;
            let color = self
                .mapping
                .get(cell)
                .copied()
                .flatten()
                .and_then(|j| self.new_columns.get(j))
                .map(|column| column.color)
                .ok_or_else(|| GraphError::MappingInvariant {
                    check: "octopus parent cell is mapped",
                    cell,
                    snapshot: self.snapshot(),
                })?;

            self.paint(line, color, Glyph::MultiBranchExtension);
            if i == dashed_parents - 1 {
                self.paint(line, color, Glyph::MultiBranchStart);
            } else {
                self.paint(line, color, Glyph::MultiBranchExtension);
            }
        }
        Ok(())
    }

    pub(crate) fn output_post_merge_line(&mut self, line: &mut GraphLine) -> GraphResult<()> {
        let num_columns = self.columns.len();
        let first_parent = self.parents.first().cloned();
        let mut parent_color: Option<usize> = None;
        let mut seen_this = false;

        // FIXME: edges_added can still be 1 here when it looks like it should be 0.
        for i in 0..=num_columns {
            let column = self.columns.get(i);
            let is_this = match column {
                Some(column) => self.is_current(&column.commit),
                None if seen_this => break,
                None => true,
            };

            if is_this {
                seen_this = true;
                let mut idx = self.merge_layout.max(0) as usize;
                for (j, parent) in self.parents.iter().enumerate() {
                    let lane = self
                        .new_columns
                        .iter()
                        .find(|c| &c.commit == parent)
                        .ok_or_else(|| GraphError::ParentLaneMissing {
                            parent: format!("{parent:?}"),
                            snapshot: self.snapshot(),
                        })?;
                    self.paint(line, lane.color, MERGE_GLYPHS[idx]);
                    if idx == 2 {
                        if self.edges_added > 0 || j + 1 < self.num_parents {
                            line.push_char(' ');
                        }
                    } else {
                        idx += 1;
                    }
                }
                if self.edges_added == 0 {
                    line.push_char(' ');
                }
            } else if let Some(column) = column {
                if seen_this {
                    if self.edges_added > 0 {
                        self.paint(line, column.color, Glyph::RightMove);
                    } else {
                        self.paint(line, column.color, Glyph::Padding);
                    }
                    line.push_char(' ');
                } else {
                    self.paint(line, column.color, Glyph::Padding);
                    if self.merge_layout != 0 || i + 1 != self.commit_index {
                        match parent_color {
                            Some(color) => self.paint(line, color, Glyph::Bridge),
                            None => line.push_char(' '),
                        }
                    }
                }
            }

            if let (Some(column), Some(first)) = (column, first_parent.as_ref()) {
                if &column.commit == first {
                    parent_color = Some(column.color);
                }
            }
        }

        if self.is_mapping_correct() {
            self.update_state(GraphState::Padding);
        } else {
            self.update_state(GraphState::Collapsing);
        }
        Ok(())
    }

    pub(crate) fn output_collapsing_line(&mut self, line: &mut GraphLine) -> GraphResult<()> {
        let mut used_horizontal = false;
        let mut horizontal_edge: Option<usize> = None;
        let mut horizontal_edge_target: Option<usize> = None;

        std::mem::swap(&mut self.mapping, &mut self.old_mapping);
        self.mapping[..self.mapping_size].fill(None);

        for i in 0..self.mapping_size {
            let Some(target) = self.old_mapping[i] else {
                continue;
            };

            if target * 2 > i {
                return Err(self.mapping_violation("target * 2 <= i", i));
            }

            if target * 2 == i {
                if self.mapping[i].is_some() {
                    return Err(self.mapping_violation("canonical cell is free", i));
                }
                self.mapping[i] = Some(target);
            } else if self.mapping[i - 1].is_none() {
                // Move one cell left; the first such lane may bridge a gap.
                self.mapping[i - 1] = Some(target);
                if horizontal_edge.is_none() {
                    horizontal_edge = Some(i);
                    horizontal_edge_target = Some(target);
                    self.fill_bridge(target, i);
                }
            } else if self.mapping[i - 1] == Some(target) {
                // Already merged into the lane to the left.
            } else {
                if self.mapping[i - 1] < Some(target) {
                    return Err(self.mapping_violation("left neighbour targets a later lane", i));
                }
                if i < 2 || self.mapping[i - 2].is_some() {
                    return Err(self.mapping_violation("cell two to the left is free", i));
                }
                self.mapping[i - 2] = Some(target);
                if horizontal_edge.is_none() {
                    horizontal_edge_target = Some(target);
                    horizontal_edge = Some(i - 1);
                    self.fill_bridge(target, i);
                }
            }
        }

        // The next commit line reads this pass's mapping, before bridge cells are erased.
        self.old_mapping.copy_from_slice(&self.mapping);

        if self.mapping_size > 0 && self.mapping[self.mapping_size - 1].is_none() {
            self.mapping_size -= 1;
        }

        for i in 0..self.mapping_size {
            let Some(target) = self.mapping[i] else {
                line.push_char(' ');
                continue;
            };
            let color = self
                .new_columns
                .get(target)
                .map(|column| column.color)
                .ok_or_else(|| self.mapping_violation("target lane exists", i))?;

            if target * 2 == i {
                self.paint(line, color, Glyph::Padding);
            } else if Some(target) == horizontal_edge_target
                && horizontal_edge.map_or(true, |edge| i + 1 != edge)
            {
                if i != target * 2 + 3 {
                    self.mapping[i] = None;
                }
                used_horizontal = true;
                self.paint(line, color, Glyph::Bridge);
            } else {
                if used_horizontal && horizontal_edge.is_some_and(|edge| i < edge) {
                    self.mapping[i] = None;
                }
                self.paint(line, color, Glyph::LeftMove);
            }
        }

        if self.is_mapping_correct() {
            self.update_state(GraphState::Padding);
        }
        Ok(())
    }

    fn fill_bridge(&mut self, target: usize, edge: usize) {
        let mut j = target * 2 + 3;
        while j + 2 < edge {
            self.mapping[j] = Some(target);
            j += 2;
        }
    }

    fn mapping_violation(&self, check: &'static str, cell: usize) -> GraphError {
        GraphError::MappingInvariant {
            check,
            cell,
            snapshot: self.snapshot(),
        }
    }
}
