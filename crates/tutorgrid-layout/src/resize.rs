//! Shared-line resize.
//!
//! Dragging the line between two tracks resizes every item whose edge sits on
//! that line, not just the one whose handle was grabbed. For a column line the
//! participating items are found by growing a row band to a fixed point:
//! start from the source item's rows, then absorb the rows of every item that
//! touches the line and overlaps the band, until nothing changes. Items before
//! the line (the leading group) change span; items after it (the trailing
//! group) shift their start and change span in the opposite direction.
//!
//! Row lines are the exact transpose, selected by [`Axis`].

use serde::{Deserialize, Serialize};
use tutorgrid_core::{Axis, TrackRange};

use crate::error::{GridError, Result};
use crate::model::{GridDocument, GridPlacement, ItemId};
use crate::occupancy::Occupancy;

/// Boundary between track `index` and `index + 1` along `axis`.
///
/// Line 0 is the leading grid edge, line `tracks` the trailing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResizeLine {
    pub axis: Axis,
    pub index: u16,
}

impl ResizeLine {
    #[must_use]
    pub const fn new(axis: Axis, index: u16) -> Self {
        Self { axis, index }
    }

    #[must_use]
    pub const fn column(index: u16) -> Self {
        Self::new(Axis::Column, index)
    }

    #[must_use]
    pub const fn row(index: u16) -> Self {
        Self::new(Axis::Row, index)
    }

    /// Whether `placement` has an edge on this line.
    #[must_use]
    pub fn touches(self, placement: &GridPlacement) -> bool {
        self.ends_at(placement) || self.starts_after(placement)
    }

    fn ends_at(self, placement: &GridPlacement) -> bool {
        placement.end(self.axis) == self.index
    }

    fn starts_after(self, placement: &GridPlacement) -> bool {
        placement.start(self.axis) == self.index + 1
    }
}

/// Items that move together when a line is dragged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeParticipants {
    pub line: ResizeLine,
    /// Cross-axis tracks the drag applies to.
    pub band: TrackRange,
    /// Items ending on the line.
    pub leading: Vec<ItemId>,
    /// Items starting right after the line.
    pub trailing: Vec<ItemId>,
}

impl ResizeParticipants {
    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.leading.contains(id) || self.trailing.contains(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &ItemId> {
        self.leading.iter().chain(&self.trailing)
    }
}

/// Why a resize step was not applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ResizeRejection {
    /// No item touches the line within the source item's band.
    Inert,
    ZeroDelta,
    /// The line would leave `0..=tracks`.
    LineOutOfBounds { target: i32 },
    /// The step would shrink `item` below one track.
    SpanBelowMinimum { item: ItemId },
    /// A non-participating item occupies a claimed cell.
    Blocked { by: ItemId },
}

/// Result of one resize step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResizeOutcome {
    /// The document was updated; `line` is the dragged line's new position.
    Applied {
        line: ResizeLine,
        participants: ResizeParticipants,
    },
    Rejected(ResizeRejection),
}

impl ResizeOutcome {
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

impl<C> GridDocument<C> {
    /// Compute the items that would move if `line` were dragged from `source`.
    ///
    /// Returns `None` when the grab is inert.
    pub fn resize_participants(
        &self,
        line: ResizeLine,
        source: &ItemId,
    ) -> Result<Option<ResizeParticipants>> {
        let tracks = self.tracks(line.axis);
        if line.index > tracks {
            return Err(GridError::LineOutOfRange {
                axis: line.axis,
                index: line.index,
                tracks,
            });
        }
        let source = self.items[self.position(source)?].placement;
        let cross = line.axis.cross();

        let mut band = source.range(cross);
        loop {
            let grown = self
                .items
                .iter()
                .map(|item| item.placement)
                .filter(|placement| line.touches(placement))
                .map(|placement| placement.range(cross))
                .filter(|range| range.intersects(band))
                .fold(band, TrackRange::union);
            if grown == band {
                break;
            }
            band = grown;
        }

        let in_band = |placement: &GridPlacement| placement.range(cross).intersects(band);
        let leading: Vec<ItemId> = self
            .items
            .iter()
            .filter(|item| line.ends_at(&item.placement) && in_band(&item.placement))
            .map(|item| item.id.clone())
            .collect();
        let trailing: Vec<ItemId> = self
            .items
            .iter()
            .filter(|item| line.starts_after(&item.placement) && in_band(&item.placement))
            .map(|item| item.id.clone())
            .collect();

        if leading.is_empty() && trailing.is_empty() {
            return Ok(None);
        }
        Ok(Some(ResizeParticipants {
            line,
            band,
            leading,
            trailing,
        }))
    }

    /// Move `line` by `delta` whole tracks, resizing every participant.
    ///
    /// The step is applied atomically or not at all.
    pub fn resize_line(
        &mut self,
        line: ResizeLine,
        source: &ItemId,
        delta: i32,
    ) -> Result<ResizeOutcome> {
        let Some(participants) = self.resize_participants(line, source)? else {
            tracing::trace!(axis = %line.axis, line = line.index, item = %source, "resize grab is inert");
            return Ok(ResizeOutcome::Rejected(ResizeRejection::Inert));
        };
        if delta == 0 {
            return Ok(ResizeOutcome::Rejected(ResizeRejection::ZeroDelta));
        }
        let axis = line.axis;
        let tracks = self.tracks(axis);
        let target = i32::from(line.index) + delta;
        if target < 0 || target > i32::from(tracks) {
            tracing::trace!(%axis, line = line.index, delta, "resize rejected: line out of bounds");
            return Ok(ResizeOutcome::Rejected(ResizeRejection::LineOutOfBounds {
                target,
            }));
        }

        let mut planned = self.placements();
        for (id, placement) in &mut planned {
            let span = i32::from(placement.span(axis));
            let (new_start, new_span) = if participants.leading.contains(id) {
                (i32::from(placement.start(axis)), span + delta)
            } else if participants.trailing.contains(id) {
                (i32::from(placement.start(axis)) + delta, span - delta)
            } else {
                continue;
            };
            if new_span < 1 {
                tracing::trace!(%axis, item = %id, delta, "resize rejected: span below minimum");
                return Ok(ResizeOutcome::Rejected(
                    ResizeRejection::SpanBelowMinimum { item: id.clone() },
                ));
            }
            // Both values are bounded by `tracks` after the checks above.
            placement.set_start(axis, new_start as u16);
            placement.set_span(axis, new_span as u16);
        }

        match Occupancy::from_placements(
            self.columns,
            self.effective_rows(),
            planned.iter().map(|(id, placement)| (id, placement)),
        ) {
            Ok(_) => {}
            Err(GridError::Overlap { first, second, .. }) => {
                let by = if participants.contains(&first) {
                    second
                } else {
                    first
                };
                tracing::trace!(%axis, line = line.index, delta, blocker = %by, "resize blocked");
                return Ok(ResizeOutcome::Rejected(ResizeRejection::Blocked { by }));
            }
            Err(error) => return Err(error),
        }

        self.commit_placements(&planned);
        // `target` was checked against `0..=tracks` above.
        let moved = ResizeLine::new(axis, target as u16);
        tracing::debug!(
            %axis,
            from = line.index,
            to = moved.index,
            leading = participants.leading.len(),
            trailing = participants.trailing.len(),
            "grid line resized"
        );
        Ok(ResizeOutcome::Applied {
            line: moved,
            participants: ResizeParticipants {
                line: moved,
                ..participants
            },
        })
    }

    /// Drag the vertical line after column `index`.
    pub fn resize_column_line(
        &mut self,
        index: u16,
        source: &ItemId,
        delta: i32,
    ) -> Result<ResizeOutcome> {
        self.resize_line(ResizeLine::column(index), source, delta)
    }

    /// Drag the horizontal line after row `index`.
    pub fn resize_row_line(
        &mut self,
        index: u16,
        source: &ItemId,
        delta: i32,
    ) -> Result<ResizeOutcome> {
        self.resize_line(ResizeLine::row(index), source, delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GridItem;
    use tracing_test::traced_test;

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

    fn stacked() -> GridDocument<()> {
        doc(
            4,
            3,
            &[
                ("a", GridPlacement::new(1, 1, 1, 2)),
                ("b", GridPlacement::new(2, 1, 1, 2)),
                ("c", GridPlacement::new(3, 1, 1, 2)),
                ("r", GridPlacement::new(1, 3, 2, 2)),
                ("s", GridPlacement::new(3, 3, 1, 2)),
            ],
        )
    }

    #[test]
    fn band_grows_transitively_and_stops_at_fixed_point() {
        let doc = stacked();
        let participants = doc
            .resize_participants(ResizeLine::column(2), &id("a"))
            .unwrap()
            .unwrap();
        assert_eq!(participants.band, TrackRange::new(1, 2));
        assert_eq!(participants.leading, vec![id("a"), id("b")]);
        assert_eq!(participants.trailing, vec![id("r")]);
        assert!(!participants.contains(&id("c")));
    }

    #[test]
    fn dragging_shared_line_moves_every_touching_item() {
        let mut doc = doc(
            4,
            3,
            &[
                ("a", GridPlacement::new(1, 1, 1, 2)),
                ("b", GridPlacement::new(2, 1, 1, 2)),
                ("c", GridPlacement::new(3, 1, 1, 2)),
                ("r", GridPlacement::new(1, 3, 3, 2)),
            ],
        );
        let outcome = doc.resize_column_line(2, &id("b"), 1).unwrap();
        assert!(matches!(
            outcome,
            ResizeOutcome::Applied { line, .. } if line == ResizeLine::column(3)
        ));
        for left in ["a", "b", "c"] {
            assert_eq!(doc.placement(&id(left)).unwrap().col_span, 3);
        }
        assert_eq!(doc.placement(&id("r")), Some(GridPlacement::new(1, 4, 3, 1)));
    }

    #[test]
    fn items_outside_band_are_left_alone() {
        let mut doc = stacked();
        assert!(doc.resize_column_line(2, &id("a"), 1).unwrap().is_applied());
        assert_eq!(doc.placement(&id("c")), Some(GridPlacement::new(3, 1, 1, 2)));
        assert_eq!(doc.placement(&id("s")), Some(GridPlacement::new(3, 3, 1, 2)));
        assert_eq!(doc.placement(&id("r")), Some(GridPlacement::new(1, 4, 2, 1)));
    }

    #[test]
    fn shrinking_leading_group_grows_trailing_group() {
        let mut doc = stacked();
        assert!(doc.resize_column_line(2, &id("r"), -1).unwrap().is_applied());
        assert_eq!(doc.placement(&id("a")), Some(GridPlacement::new(1, 1, 1, 1)));
        assert_eq!(doc.placement(&id("b")), Some(GridPlacement::new(2, 1, 1, 1)));
        assert_eq!(doc.placement(&id("r")), Some(GridPlacement::new(1, 2, 2, 3)));
    }

    #[test]
    fn non_participant_blocks_resize() {
        let mut doc = doc(
            3,
            1,
            &[
                ("l", GridPlacement::new(1, 1, 1, 1)),
                ("x", GridPlacement::new(1, 3, 1, 1)),
            ],
        );
        let before = doc.clone();
        assert_eq!(
            doc.resize_column_line(1, &id("l"), 2).unwrap(),
            ResizeOutcome::Rejected(ResizeRejection::Blocked { by: id("x") })
        );
        assert_eq!(doc, before);
        assert!(doc.resize_column_line(1, &id("l"), 1).unwrap().is_applied());
    }

    #[test]
    fn span_never_drops_below_one() {
        let mut doc = doc(
            2,
            1,
            &[
                ("l", GridPlacement::new(1, 1, 1, 1)),
                ("r", GridPlacement::new(1, 2, 1, 1)),
            ],
        );
        assert_eq!(
            doc.resize_column_line(1, &id("l"), -1).unwrap(),
            ResizeOutcome::Rejected(ResizeRejection::SpanBelowMinimum { item: id("l") })
        );
        assert_eq!(
            doc.resize_column_line(1, &id("l"), 1).unwrap(),
            ResizeOutcome::Rejected(ResizeRejection::SpanBelowMinimum { item: id("r") })
        );
    }

    #[test]
    fn line_cannot_leave_grid() {
        let mut doc = doc(2, 1, &[("l", GridPlacement::new(1, 1, 1, 2))]);
        assert_eq!(
            doc.resize_column_line(2, &id("l"), 1).unwrap(),
            ResizeOutcome::Rejected(ResizeRejection::LineOutOfBounds { target: 3 })
        );
        assert!(matches!(
            doc.resize_column_line(5, &id("l"), 1),
            Err(GridError::LineOutOfRange { .. })
        ));
    }

    #[test]
    fn grab_away_from_any_edge_is_inert() {
        let mut doc = doc(4, 1, &[("l", GridPlacement::new(1, 1, 1, 1))]);
        assert_eq!(
            doc.resize_column_line(3, &id("l"), 1).unwrap(),
            ResizeOutcome::Rejected(ResizeRejection::Inert)
        );
        assert_eq!(
            doc.resize_column_line(1, &id("l"), 0).unwrap(),
            ResizeOutcome::Rejected(ResizeRejection::ZeroDelta)
        );
    }

    #[test]
    fn row_line_is_the_transpose() {
        let mut doc = doc(
            2,
            3,
            &[
                ("top", GridPlacement::new(1, 1, 1, 2)),
                ("bottom", GridPlacement::new(2, 1, 2, 1)),
                ("side", GridPlacement::new(2, 2, 2, 1)),
            ],
        );
        let outcome = doc.resize_row_line(1, &id("top"), 1).unwrap();
        assert!(matches!(
            outcome,
            ResizeOutcome::Applied { line, .. } if line == ResizeLine::row(2)
        ));
        assert_eq!(doc.placement(&id("top")), Some(GridPlacement::new(1, 1, 2, 2)));
        assert_eq!(doc.placement(&id("bottom")), Some(GridPlacement::new(3, 1, 1, 1)));
        assert_eq!(doc.placement(&id("side")), Some(GridPlacement::new(3, 2, 1, 1)));
    }

    #[test]
    #[traced_test]
    fn applied_resize_is_logged() {
        let mut doc = stacked();
        doc.resize_column_line(2, &id("a"), 1).unwrap();
        assert!(logs_contain("grid line resized"));
    }
}
