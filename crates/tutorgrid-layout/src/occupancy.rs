//! Derived cell → item lookup.
//!
//! Occupancy is rebuilt from placements every time it is needed and never
//! maintained incrementally. At the grid sizes in play a rebuild is a few
//! dozen map inserts.

use std::collections::BTreeMap;

use tutorgrid_core::{Axis, Cell};

use crate::error::{GridError, Result};
use crate::model::{GridDocument, GridPlacement, ItemId};

/// Map from every covered cell to the item covering it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupancy {
    columns: u16,
    rows: u16,
    cells: BTreeMap<Cell, ItemId>,
}

impl Occupancy {
    /// Build the occupancy of a document over its effective rows.
    pub fn build<C>(doc: &GridDocument<C>) -> Result<Self> {
        Self::from_placements(
            doc.columns(),
            doc.effective_rows(),
            doc.items().iter().map(|item| (&item.id, &item.placement)),
        )
    }

    /// Build occupancy for an arbitrary placement set, e.g. a planned layout.
    ///
    /// Fails on the first placement that leaves the grid or lands on a cell
    /// another placement already claimed.
    pub fn from_placements<'a>(
        columns: u16,
        rows: u16,
        placements: impl IntoIterator<Item = (&'a ItemId, &'a GridPlacement)>,
    ) -> Result<Self> {
        let mut cells = BTreeMap::new();
        for (id, placement) in placements {
            for (axis, tracks) in [(Axis::Column, columns), (Axis::Row, rows)] {
                if placement.start(axis) == 0 || placement.span(axis) == 0 {
                    return Err(GridError::ZeroExtent {
                        item: id.clone(),
                        axis,
                    });
                }
                if placement.end(axis) > tracks {
                    return Err(GridError::OutOfBounds {
                        item: id.clone(),
                        axis,
                        start: placement.start(axis),
                        end: placement.end(axis),
                        tracks,
                    });
                }
            }
            for cell in placement.cells() {
                if let Some(first) = cells.insert(cell, id.clone()) {
                    return Err(GridError::Overlap {
                        cell,
                        first,
                        second: id.clone(),
                    });
                }
            }
        }
        Ok(Self {
            columns,
            rows,
            cells,
        })
    }

    #[must_use]
    pub const fn columns(&self) -> u16 {
        self.columns
    }

    #[must_use]
    pub const fn rows(&self) -> u16 {
        self.rows
    }

    /// Number of covered cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether every cell of the grid is covered.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.len() == usize::from(self.columns) * usize::from(self.rows)
    }

    #[must_use]
    pub fn occupant(&self, cell: Cell) -> Option<&ItemId> {
        self.cells.get(&cell)
    }

    /// Cell lies inside the grid and nothing covers it.
    #[must_use]
    pub fn is_free(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && !self.cells.contains_key(&cell)
    }

    /// Like [`Self::is_free`], but cells covered by `owner` count as free.
    #[must_use]
    pub fn is_free_for(&self, cell: Cell, owner: &ItemId) -> bool {
        self.in_bounds(cell) && self.cells.get(&cell).is_none_or(|id| id == owner)
    }

    #[must_use]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        (1..=self.rows).contains(&cell.row) && (1..=self.columns).contains(&cell.col)
    }

    /// First uncovered cell in row-major order.
    #[must_use]
    pub fn first_free_cell(&self) -> Option<Cell> {
        (1..=self.rows)
            .flat_map(|row| (1..=self.columns).map(move |col| Cell::new(row, col)))
            .find(|cell| !self.cells.contains_key(cell))
    }

    /// Covered cells with their occupant, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, &ItemId)> {
        self.cells.iter().map(|(cell, id)| (*cell, id))
    }
}
