//! Insertion of new items at the first free cell.

use tutorgrid_core::Cell;

use crate::error::{GridError, Result};
use crate::model::{GridDocument, GridItem, GridPlacement, ItemId};
use crate::occupancy::Occupancy;

/// Result of an insertion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A 1×1 item was placed at `cell`. `grew_row` is set when a row had to
    /// be appended to make room.
    Inserted {
        id: ItemId,
        cell: Cell,
        grew_row: bool,
    },
    /// Every cell is taken and the row limit is reached. Nothing changed.
    GridFull,
}

impl InsertOutcome {
    #[must_use]
    pub fn inserted_id(&self) -> Option<&ItemId> {
        match self {
            Self::Inserted { id, .. } => Some(id),
            Self::GridFull => None,
        }
    }
}

impl<C> GridDocument<C> {
    /// Insert `content` under a freshly allocated id.
    pub fn insert(&mut self, content: C) -> Result<InsertOutcome> {
        let id = self.next_item_id();
        self.insert_with_id(id, content)
    }

    /// Insert `content` under a host-chosen id.
    ///
    /// Cells are scanned row-major; the first uncovered one becomes the
    /// anchor. With no free cell a single row is appended if the row limit
    /// allows it.
    pub fn insert_with_id(&mut self, id: ItemId, content: C) -> Result<InsertOutcome> {
        if self.item(&id).is_some() {
            return Err(GridError::DuplicateItemId(id));
        }

        let occupancy = Occupancy::build(self)?;
        let effective_rows = occupancy.rows();
        let (cell, grew_row) = match occupancy.first_free_cell() {
            Some(cell) => (cell, false),
            None if effective_rows < self.limits.max_rows => {
                (Cell::new(effective_rows + 1, 1), true)
            }
            None => {
                tracing::trace!(item = %id, "insert skipped: grid full");
                return Ok(InsertOutcome::GridFull);
            }
        };

        self.rows = effective_rows.max(cell.row);
        self.items
            .push(GridItem::new(id.clone(), GridPlacement::single(cell), content));
        self.debug_check();

        tracing::debug!(item = %id, %cell, grew_row, "grid item inserted");
        Ok(InsertOutcome::Inserted { id, cell, grew_row })
    }

    /// Smallest unused id of the form `item-N`, starting after the item count.
    #[must_use]
    pub fn next_item_id(&self) -> ItemId {
        let mut n = self.items.len() + 1;
        loop {
            let candidate = ItemId::new(format!("item-{n}"));
            if self.item(&candidate).is_none() {
                return candidate;
            }
            n += 1;
        }
    }
}
