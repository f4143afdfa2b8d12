//! Drag-and-drop relocation: move into free space, swap with another item,
//! or grow the grid by dropping on its bottom or right edge.
//!
//! # Span clamping
//!
//! A move into free space takes the widest footprint that fits at the target
//! anchor, up to the item's current height. Width and height constrain each
//! other, so the fit is found in three passes:
//!
//! 1. widest run at the desired height, up to the grid edge or a blocker,
//! 2. tallest run at that width, up to the desired height,
//! 3. widest run again at the final height, since a shorter footprint can
//!    have room for more columns than the first pass allowed.
//!
//! Spans never drop below 1. Edge drops keep the item's width instead of
//! widening into the new track.

use serde::{Deserialize, Serialize};
use tutorgrid_core::{Axis, Cell};

use crate::error::Result;
use crate::model::{GridDocument, GridPlacement, ItemId};
use crate::occupancy::Occupancy;

/// Where a dragged item was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum DropTarget {
    /// A grid cell, free or occupied. Out-of-range coordinates are clamped.
    Cell { cell: Cell },
    /// The sentinel strip below the last row: append a row.
    BottomEdge,
    /// The sentinel strip right of the last column: append a column.
    RightEdge,
}

impl DropTarget {
    #[must_use]
    pub const fn cell(row: u16, col: u16) -> Self {
        Self::Cell {
            cell: Cell::new(row, col),
        }
    }
}

/// Result of a move request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The item now sits at `placement`.
    Moved { placement: GridPlacement },
    /// The item exchanged placements with `with`.
    Swapped { with: ItemId },
    /// A track was appended along `axis` and the item placed at its start.
    Grew { axis: Axis, placement: GridPlacement },
    /// The drop resolved to the item's current placement.
    Unchanged,
}

impl<C> GridDocument<C> {
    /// Relocate an item according to a drop target.
    pub fn move_item(&mut self, id: &ItemId, target: DropTarget) -> Result<MoveOutcome> {
        let index = self.position(id)?;
        match target {
            DropTarget::Cell { cell } => self.drop_on_cell(index, cell),
            DropTarget::BottomEdge => self.drop_on_edge(index, Axis::Row),
            DropTarget::RightEdge => self.drop_on_edge(index, Axis::Column),
        }
    }

    fn drop_on_cell(&mut self, index: usize, cell: Cell) -> Result<MoveOutcome> {
        let occupancy = Occupancy::build(self)?;
        let cell = Cell::new(
            cell.row.clamp(1, occupancy.rows()),
            cell.col.clamp(1, occupancy.columns()),
        );
        let id = self.items[index].id.clone();

        if let Some(other) = occupancy.occupant(cell)
            && *other != id
        {
            let other = other.clone();
            let other_index = self.position(&other)?;
            let mine = self.items[index].placement;
            self.items[index].placement = self.items[other_index].placement;
            self.items[other_index].placement = mine;
            self.debug_check();
            tracing::debug!(item = %id, with = %other, "grid items swapped");
            return Ok(MoveOutcome::Swapped { with: other });
        }

        let current = self.items[index].placement;
        let room = occupancy.columns() - cell.col + 1;
        let placement = fit_at(&occupancy, &id, cell, room, current.row_span);
        if placement == current {
            tracing::trace!(item = %id, %cell, "move resolved to current placement");
            return Ok(MoveOutcome::Unchanged);
        }
        self.items[index].placement = placement;
        self.debug_check();
        tracing::debug!(
            item = %id,
            %cell,
            col_span = placement.col_span,
            row_span = placement.row_span,
            "grid item moved"
        );
        Ok(MoveOutcome::Moved { placement })
    }

    fn drop_on_edge(&mut self, index: usize, axis: Axis) -> Result<MoveOutcome> {
        let tracks = self.tracks(axis);
        let max = self.limits.max_tracks(axis);
        if tracks >= max {
            tracing::trace!(%axis, max, "edge drop at track limit, clamping to last track");
            return self.drop_on_cell(index, Cell::from_tracks(axis, max, 1));
        }

        let grown = tracks + 1;
        let (columns, rows) = match axis {
            Axis::Column => (grown, self.effective_rows()),
            Axis::Row => (self.columns, grown),
        };
        let occupancy = Occupancy::from_placements(
            columns,
            rows,
            self.items.iter().map(|item| (&item.id, &item.placement)),
        )?;
        let id = self.items[index].id.clone();
        let current = self.items[index].placement;
        let anchor = Cell::from_tracks(axis, grown, 1);
        let placement = fit_at(&occupancy, &id, anchor, current.col_span, current.row_span);
        match axis {
            Axis::Column => self.columns = grown,
            Axis::Row => self.rows = grown,
        }
        self.items[index].placement = placement;
        self.debug_check();
        tracing::debug!(item = %id, %axis, tracks = grown, "grid grew on edge drop");
        Ok(MoveOutcome::Grew { axis, placement })
    }
}

/// Largest footprint anchored at `anchor` that fits within `max_cols` ×
/// `max_rows`.
///
/// `anchor` must be free or covered by `owner`.
pub(crate) fn fit_at(
    occupancy: &Occupancy,
    owner: &ItemId,
    anchor: Cell,
    max_cols: u16,
    max_rows: u16,
) -> GridPlacement {
    let max_cols = max_cols.max(1);
    let max_rows = max_rows.max(1);
    let row_room = max_rows.min(occupancy.rows().saturating_sub(anchor.row) + 1);

    let col_span = run_length(occupancy, owner, anchor, Axis::Column, row_room, max_cols);
    let row_span = run_length(occupancy, owner, anchor, Axis::Row, col_span, max_rows);
    let col_span = run_length(occupancy, owner, anchor, Axis::Column, row_span, max_cols);

    GridPlacement::new(anchor.row, anchor.col, row_span, col_span)
}

/// Count tracks along `axis` from the anchor whose whole cross-section of
/// `cross_span` tracks is free for `owner`, stopping at `limit`. Never below 1.
fn run_length(
    occupancy: &Occupancy,
    owner: &ItemId,
    anchor: Cell,
    axis: Axis,
    cross_span: u16,
    limit: u16,
) -> u16 {
    let cross = axis.cross();
    let cross_start = anchor.track(cross);
    let start = anchor.track(axis);
    let mut run = 0;
    while run < limit {
        let track = start + run;
        let clear = (cross_start..cross_start + cross_span.max(1))
            .all(|c| occupancy.is_free_for(Cell::from_tracks(axis, track, c), owner));
        if !clear {
            break;
        }
        run += 1;
    }
    run.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GridItem;

    fn doc(columns: u16, rows: u16, items: &[(&str, GridPlacement)]) -> GridDocument<()> {
        GridDocument::from_items(
            columns,
            rows,
            items
                .iter()
                .map(|(id, placement)| GridItem::new(*id, *placement, ())),
        )
        .unwrap()
    }

    fn id(raw: &str) -> ItemId {
        ItemId::from(raw)
    }

    #[test]
    fn move_into_open_space_keeps_span() {
        let mut doc = doc(4, 2, &[("a", GridPlacement::new(1, 1, 2, 2))]);
        let outcome = doc.move_item(&id("a"), DropTarget::cell(1, 3)).unwrap();
        assert_eq!(
            outcome,
            MoveOutcome::Moved {
                placement: GridPlacement::new(1, 3, 2, 2)
            }
        );
    }

    #[test]
    fn span_clamps_to_pocket_in_both_dimensions() {
        // Row 1 has a two-column pocket closed by `x` in column 3; row 2 is
        // blocked below the pocket by `y`.
        let mut doc = doc(
            4,
            4,
            &[
                ("x", GridPlacement::new(1, 3, 1, 1)),
                ("y", GridPlacement::new(2, 1, 1, 2)),
                ("m", GridPlacement::new(3, 1, 2, 3)),
            ],
        );
        let outcome = doc.move_item(&id("m"), DropTarget::cell(1, 1)).unwrap();
        assert_eq!(
            outcome,
            MoveOutcome::Moved {
                placement: GridPlacement::new(1, 1, 1, 2)
            }
        );
    }

    #[test]
    fn single_cell_item_widens_to_fill_pocket() {
        let mut doc = doc(
            4,
            4,
            &[
                ("x", GridPlacement::new(1, 3, 1, 1)),
                ("y", GridPlacement::new(2, 1, 1, 2)),
                ("m", GridPlacement::new(4, 4, 1, 1)),
            ],
        );
        let outcome = doc.move_item(&id("m"), DropTarget::cell(1, 1)).unwrap();
        assert_eq!(
            outcome,
            MoveOutcome::Moved {
                placement: GridPlacement::new(1, 1, 1, 2)
            }
        );
    }

    #[test]
    fn width_runs_to_grid_edge_but_height_is_capped() {
        let mut doc = doc(4, 3, &[("a", GridPlacement::new(1, 1, 1, 1))]);
        doc.move_item(&id("a"), DropTarget::cell(2, 2)).unwrap();
        assert_eq!(doc.placement(&id("a")), Some(GridPlacement::new(2, 2, 1, 3)));
    }

    #[test]
    fn tall_item_keeps_height_beside_blocker() {
        // Column 2 is blocked on row 1 only, which does not limit a 1-wide item.
        let mut doc = doc(
            3,
            2,
            &[
                ("wall", GridPlacement::new(1, 2, 1, 1)),
                ("m", GridPlacement::new(1, 3, 2, 1)),
            ],
        );
        doc.move_item(&id("m"), DropTarget::cell(1, 1)).unwrap();
        assert_eq!(doc.placement(&id("m")), Some(GridPlacement::new(1, 1, 2, 1)));
    }

    #[test]
    fn drop_within_own_footprint_reanchors() {
        let mut doc = doc(3, 1, &[("a", GridPlacement::new(1, 1, 1, 2))]);
        let outcome = doc.move_item(&id("a"), DropTarget::cell(1, 2)).unwrap();
        assert_eq!(
            outcome,
            MoveOutcome::Moved {
                placement: GridPlacement::new(1, 2, 1, 2)
            }
        );
        assert_eq!(
            doc.move_item(&id("a"), DropTarget::cell(1, 2)).unwrap(),
            MoveOutcome::Unchanged
        );
    }

    #[test]
    fn drop_on_other_item_swaps_whole_placements() {
        let mut doc = doc(
            3,
            1,
            &[
                ("a", GridPlacement::new(1, 1, 1, 2)),
                ("b", GridPlacement::new(1, 3, 1, 1)),
            ],
        );
        let outcome = doc.move_item(&id("a"), DropTarget::cell(1, 3)).unwrap();
        assert_eq!(outcome, MoveOutcome::Swapped { with: id("b") });
        assert_eq!(doc.placement(&id("a")), Some(GridPlacement::new(1, 3, 1, 1)));
        assert_eq!(doc.placement(&id("b")), Some(GridPlacement::new(1, 1, 1, 2)));
    }

    #[test]
    fn out_of_range_cells_are_clamped() {
        let mut doc = doc(2, 2, &[("a", GridPlacement::new(1, 1, 1, 1))]);
        doc.move_item(&id("a"), DropTarget::cell(9, 9)).unwrap();
        assert_eq!(doc.placement(&id("a")), Some(GridPlacement::new(2, 2, 1, 1)));
    }

    #[test]
    fn bottom_edge_appends_row() {
        let mut doc = doc(
            2,
            1,
            &[
                ("a", GridPlacement::new(1, 1, 1, 1)),
                ("b", GridPlacement::new(1, 2, 1, 1)),
            ],
        );
        let outcome = doc.move_item(&id("b"), DropTarget::BottomEdge).unwrap();
        assert_eq!(
            outcome,
            MoveOutcome::Grew {
                axis: Axis::Row,
                placement: GridPlacement::new(2, 1, 1, 1)
            }
        );
        assert_eq!(doc.rows(), 2);
    }

    #[test]
    fn right_edge_appends_column_and_keeps_height() {
        let mut doc = doc(2, 2, &[("a", GridPlacement::new(1, 1, 2, 2))]);
        let outcome = doc.move_item(&id("a"), DropTarget::RightEdge).unwrap();
        assert_eq!(
            outcome,
            MoveOutcome::Grew {
                axis: Axis::Column,
                placement: GridPlacement::new(1, 3, 2, 1)
            }
        );
        assert_eq!(doc.columns(), 3);
    }

    #[test]
    fn edge_drop_at_limit_targets_last_track() {
        let mut doc = doc(
            1,
            4,
            &[
                ("a", GridPlacement::new(1, 1, 1, 1)),
                ("b", GridPlacement::new(4, 1, 1, 1)),
            ],
        );
        let outcome = doc.move_item(&id("a"), DropTarget::BottomEdge).unwrap();
        assert_eq!(outcome, MoveOutcome::Swapped { with: id("b") });
        assert_eq!(doc.rows(), 4);
        assert_eq!(doc.placement(&id("a")), Some(GridPlacement::new(4, 1, 1, 1)));
    }

    #[test]
    fn failed_edge_drop_leaves_track_count() {
        let mut doc: GridDocument<()> = GridDocument::new(2, 1);
        doc.items = vec![
            GridItem::new("a", GridPlacement::new(1, 1, 1, 2), ()),
            GridItem::new("b", GridPlacement::new(1, 2, 1, 1), ()),
        ];
        let before = doc.clone();
        for target in [DropTarget::BottomEdge, DropTarget::RightEdge] {
            assert!(doc.move_item(&id("b"), target).is_err());
            assert_eq!(doc, before);
        }
    }

    #[test]
    fn unknown_item_is_an_error() {
        let mut doc = doc(1, 1, &[]);
        assert!(doc.move_item(&id("ghost"), DropTarget::BottomEdge).is_err());
        assert_eq!(doc.rows(), 1);
    }
}
