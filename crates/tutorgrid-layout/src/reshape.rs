//! Explicit column and row count changes.
//!
//! Shrinking behaves differently per axis. Column shrink keeps every item,
//! pulling or truncating it into the remaining columns. Row shrink removes
//! items that start below the new last row and truncates the rest.

use tutorgrid_core::{Axis, Cell};

use crate::error::{GridError, Result};
use crate::model::{GridDocument, GridItem, GridPlacement, ItemId};
use crate::occupancy::Occupancy;

/// Side effects of a reshape on existing items.
#[derive(Debug, Clone, PartialEq)]
pub struct ReshapeOutcome<C> {
    /// Items dropped because they started past the new last row.
    pub removed: Vec<GridItem<C>>,
    /// Items pulled or truncated in place.
    pub clamped: Vec<ItemId>,
    /// Items whose clamped footprint collided and that were re-anchored as
    /// 1×1 at the first free cell.
    pub relocated: Vec<ItemId>,
}

impl<C> ReshapeOutcome<C> {
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.removed.is_empty() && self.clamped.is_empty() && self.relocated.is_empty()
    }
}

impl<C> Default for ReshapeOutcome<C> {
    fn default() -> Self {
        Self {
            removed: Vec::new(),
            clamped: Vec::new(),
            relocated: Vec::new(),
        }
    }
}

impl<C> GridDocument<C> {
    /// Set the column count, clamped to `1..=max_columns`.
    ///
    /// Items starting past the new last column move to it with span 1; items
    /// crossing it are truncated. An item whose new footprint lands on
    /// another item is re-anchored at the first free cell, appending one row
    /// if needed. If no cell can be found nothing changes and
    /// [`GridError::ReshapeWouldOverlap`] is returned.
    pub fn set_columns(&mut self, count: u16) -> Result<ReshapeOutcome<C>> {
        let count = self.limits.clamp(Axis::Column, count);
        let mut outcome = ReshapeOutcome::default();
        if count >= self.columns {
            if count > self.columns {
                tracing::debug!(from = self.columns, to = count, "grid columns grown");
                self.columns = count;
            }
            return Ok(outcome);
        }

        let mut rows = self.effective_rows();
        let mut accepted: Vec<(ItemId, GridPlacement)> = Vec::with_capacity(self.items.len());
        let mut pulled = Vec::new();
        for (id, placement) in self.placements() {
            let mut clamped = placement;
            if placement.col_start > count {
                clamped.col_start = count;
                clamped.col_span = 1;
            } else if placement.col_end() > count {
                clamped.col_span = count - placement.col_start + 1;
            }
            if clamped == placement {
                accepted.push((id, placement));
            } else {
                pulled.push((id, clamped));
            }
        }

        for (id, clamped) in pulled {
            let mut candidate = accepted.clone();
            candidate.push((id.clone(), clamped));
            if Occupancy::from_placements(count, rows, candidate.iter().map(|(i, p)| (i, p)))
                .is_ok()
            {
                outcome.clamped.push(id.clone());
                accepted.push((id, clamped));
                continue;
            }

            let occupancy =
                Occupancy::from_placements(count, rows, accepted.iter().map(|(i, p)| (i, p)))?;
            let cell = match occupancy.first_free_cell() {
                Some(cell) => cell,
                None if rows < self.limits.max_rows => {
                    rows += 1;
                    Cell::new(rows, 1)
                }
                None => {
                    tracing::trace!(to = count, item = %id, "column shrink rejected: no free cell");
                    return Err(GridError::ReshapeWouldOverlap {
                        axis: Axis::Column,
                        count,
                        item: id,
                    });
                }
            };
            outcome.relocated.push(id.clone());
            accepted.push((id, GridPlacement::single(cell)));
        }

        let planned: Vec<(ItemId, GridPlacement)> = self
            .items
            .iter()
            .filter_map(|item| accepted.iter().find(|(id, _)| *id == item.id).cloned())
            .collect();
        self.columns = count;
        self.rows = rows;
        self.commit_placements(&planned);
        tracing::debug!(
            to = count,
            clamped = outcome.clamped.len(),
            relocated = outcome.relocated.len(),
            "grid columns shrunk"
        );
        Ok(outcome)
    }

    /// Set the row count, clamped to `1..=max_rows`.
    ///
    /// Shrinking removes every item that starts past the new last row and
    /// truncates the row span of items crossing it.
    pub fn set_rows(&mut self, count: u16) -> ReshapeOutcome<C> {
        let count = self.limits.clamp(Axis::Row, count);
        let mut outcome = ReshapeOutcome::default();
        let current = self.effective_rows();
        if count == current {
            self.rows = count;
            return outcome;
        }
        if count > current {
            tracing::debug!(from = current, to = count, "grid rows grown");
            self.rows = count;
            return outcome;
        }

        let (kept, removed): (Vec<_>, Vec<_>) = std::mem::take(&mut self.items)
            .into_iter()
            .partition(|item| item.placement.row_start <= count);
        self.items = kept;
        for item in &mut self.items {
            if item.placement.row_end() > count {
                item.placement.row_span = count - item.placement.row_start + 1;
                outcome.clamped.push(item.id.clone());
            }
        }
        outcome.removed = removed;
        self.rows = count;
        self.debug_check();
        tracing::debug!(
            to = count,
            removed = outcome.removed.len(),
            clamped = outcome.clamped.len(),
            "grid rows shrunk"
        );
        outcome
    }
}
