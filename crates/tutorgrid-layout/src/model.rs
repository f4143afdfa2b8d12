//! Grid document model.
//!
//! A [`GridDocument`] owns a column count, a row count and an ordered list of
//! [`GridItem`]s. Item placement is the single source of truth; every cell
//! lookup is derived from it on demand (see [`crate::occupancy`]).
//!
//! # Invariants
//!
//! 1. No two items share a cell.
//! 2. Every placement lies within `[1, columns] × [1, effective_rows]`.
//! 3. Item ids are unique.
//!
//! Operations that would break an invariant are clamped or rejected before
//! anything is written, so a document is never observed half-mutated.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tutorgrid_core::{Axis, Cell, TrackRange};

use crate::error::{GridError, Result};
use crate::limits::GridLimits;
use crate::occupancy::Occupancy;

/// Stable identity of a grid item across moves and resizes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

fn one() -> u16 {
    1
}

/// Anchor cell plus column and row span of an item.
///
/// Serialized with the camelCase field names the page builder stores
/// (`colStart`, `colSpan`, `rowStart`, `rowSpan`). Older records omit the
/// row fields; they default to row 1, span 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridPlacement {
    pub col_start: u16,
    #[serde(default = "one")]
    pub col_span: u16,
    #[serde(default = "one")]
    pub row_start: u16,
    #[serde(default = "one")]
    pub row_span: u16,
}

impl GridPlacement {
    #[must_use]
    pub const fn new(row_start: u16, col_start: u16, row_span: u16, col_span: u16) -> Self {
        Self {
            col_start,
            col_span,
            row_start,
            row_span,
        }
    }

    /// A 1×1 placement at `cell`.
    #[must_use]
    pub const fn single(cell: Cell) -> Self {
        Self::new(cell.row, cell.col, 1, 1)
    }

    #[must_use]
    pub const fn anchor(&self) -> Cell {
        Cell::new(self.row_start, self.col_start)
    }

    #[must_use]
    pub const fn col_end(&self) -> u16 {
        self.col_start.saturating_add(self.col_span).saturating_sub(1)
    }

    #[must_use]
    pub const fn row_end(&self) -> u16 {
        self.row_start.saturating_add(self.row_span).saturating_sub(1)
    }

    #[must_use]
    pub const fn start(&self, axis: Axis) -> u16 {
        match axis {
            Axis::Column => self.col_start,
            Axis::Row => self.row_start,
        }
    }

    #[must_use]
    pub const fn span(&self, axis: Axis) -> u16 {
        match axis {
            Axis::Column => self.col_span,
            Axis::Row => self.row_span,
        }
    }

    #[must_use]
    pub const fn end(&self, axis: Axis) -> u16 {
        match axis {
            Axis::Column => self.col_end(),
            Axis::Row => self.row_end(),
        }
    }

    /// Tracks covered along `axis`.
    #[must_use]
    pub const fn range(&self, axis: Axis) -> TrackRange {
        TrackRange::new(self.start(axis), self.end(axis))
    }

    pub fn set_start(&mut self, axis: Axis, start: u16) {
        match axis {
            Axis::Column => self.col_start = start,
            Axis::Row => self.row_start = start,
        }
    }

    pub fn set_span(&mut self, axis: Axis, span: u16) {
        match axis {
            Axis::Column => self.col_span = span,
            Axis::Row => self.row_span = span,
        }
    }

    /// Every covered cell, row-major.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let cols = self.range(Axis::Column);
        self.range(Axis::Row)
            .iter()
            .flat_map(move |row| cols.iter().map(move |col| Cell::new(row, col)))
    }

    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        self.range(Axis::Row).contains(cell.row) && self.range(Axis::Column).contains(cell.col)
    }
}

impl Default for GridPlacement {
    fn default() -> Self {
        Self::single(Cell::new(1, 1))
    }
}

/// One placed content block.
///
/// `content` is opaque to the engine; only the host dispatches on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridItem<C> {
    pub id: ItemId,
    pub placement: GridPlacement,
    pub content: C,
}

impl<C> GridItem<C> {
    pub fn new(id: impl Into<ItemId>, placement: GridPlacement, content: C) -> Self {
        Self {
            id: id.into(),
            placement,
            content,
        }
    }
}

fn default_tracks() -> u16 {
    1
}

/// Full state of one grid layout module.
///
/// Deserialization always validates against the default limits, including
/// grids nested inside item content. Use [`GridDocument::from_json_str`] to
/// load with other limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "RawGridDocument<C>",
    bound(deserialize = "C: Deserialize<'de>")
)]
pub struct GridDocument<C> {
    pub(crate) columns: u16,
    pub(crate) rows: u16,
    pub(crate) items: Vec<GridItem<C>>,
    #[serde(skip)]
    pub(crate) limits: GridLimits,
}

/// Persisted shape of a [`GridDocument`], before validation.
#[derive(Deserialize)]
#[serde(bound(deserialize = "C: Deserialize<'de>"))]
struct RawGridDocument<C> {
    columns: u16,
    #[serde(default = "default_tracks")]
    rows: u16,
    #[serde(default = "Vec::new")]
    items: Vec<GridItem<C>>,
}

impl<C> RawGridDocument<C> {
    fn into_document(self, limits: GridLimits) -> Result<GridDocument<C>> {
        let mut doc = GridDocument {
            columns: self.columns,
            rows: self.rows,
            items: self.items,
            limits,
        };
        doc.rows = doc.effective_rows().max(doc.rows);
        doc.validate()?;
        Ok(doc)
    }
}

impl<C> TryFrom<RawGridDocument<C>> for GridDocument<C> {
    type Error = GridError;

    fn try_from(raw: RawGridDocument<C>) -> Result<Self> {
        raw.into_document(GridLimits::default())
    }
}

impl<C> GridDocument<C> {
    /// Empty grid with the default 4 × 4 limits. Counts are clamped into range.
    #[must_use]
    pub fn new(columns: u16, rows: u16) -> Self {
        Self::with_limits(columns, rows, GridLimits::default())
    }

    /// Empty grid with explicit limits. Counts are clamped into range.
    #[must_use]
    pub fn with_limits(columns: u16, rows: u16, limits: GridLimits) -> Self {
        Self {
            columns: limits.clamp(Axis::Column, columns),
            rows: limits.clamp(Axis::Row, rows),
            items: Vec::new(),
            limits,
        }
    }

    /// Build a document from existing items, rejecting anything that breaks
    /// the layout invariants.
    pub fn from_items(
        columns: u16,
        rows: u16,
        items: impl IntoIterator<Item = GridItem<C>>,
    ) -> Result<Self> {
        let mut doc = Self {
            columns,
            rows,
            items: items.into_iter().collect(),
            limits: GridLimits::default(),
        };
        doc.rows = doc.effective_rows().max(doc.rows);
        doc.validate()?;
        Ok(doc)
    }

    /// Parse a persisted document and validate it against `limits`.
    pub fn from_json_str(json: &str, limits: GridLimits) -> Result<Self>
    where
        C: for<'de> Deserialize<'de>,
    {
        limits.validate()?;
        let raw: RawGridDocument<C> = serde_json::from_str(json)?;
        raw.into_document(limits)
    }

    /// Serialize to the plain JSON shape the host persists.
    pub fn to_json_string(&self) -> Result<String>
    where
        C: Serialize,
    {
        Ok(serde_json::to_string(self)?)
    }

    #[must_use]
    pub const fn columns(&self) -> u16 {
        self.columns
    }

    /// Stored row count. See [`Self::effective_rows`] for the count layout uses.
    #[must_use]
    pub const fn rows(&self) -> u16 {
        self.rows
    }

    #[must_use]
    pub const fn limits(&self) -> GridLimits {
        self.limits
    }

    /// Replace the limits, failing if the current layout does not fit them.
    pub fn set_limits(&mut self, limits: GridLimits) -> Result<()> {
        limits.validate()?;
        let previous = std::mem::replace(&mut self.limits, limits);
        if let Err(error) = self.validate() {
            self.limits = previous;
            return Err(error);
        }
        Ok(())
    }

    /// Track count along `axis`, using the effective row count for rows.
    #[must_use]
    pub fn tracks(&self, axis: Axis) -> u16 {
        match axis {
            Axis::Column => self.columns,
            Axis::Row => self.effective_rows(),
        }
    }

    /// Row count layout works with: the stored count, or the lowest item edge
    /// if an item reaches further, capped at the row limit.
    #[must_use]
    pub fn effective_rows(&self) -> u16 {
        let deepest = self
            .items
            .iter()
            .map(|item| item.placement.row_end())
            .max()
            .unwrap_or(1);
        self.rows.max(deepest).clamp(1, self.limits.max_rows)
    }

    #[must_use]
    pub fn items(&self) -> &[GridItem<C>] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&GridItem<C>> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Mutable access to an item's content. Placement stays engine-owned.
    pub fn content_mut(&mut self, id: &ItemId) -> Option<&mut C> {
        self.items
            .iter_mut()
            .find(|item| &item.id == id)
            .map(|item| &mut item.content)
    }

    #[must_use]
    pub fn placement(&self, id: &ItemId) -> Option<GridPlacement> {
        self.item(id).map(|item| item.placement)
    }

    pub(crate) fn position(&self, id: &ItemId) -> Result<usize> {
        self.items
            .iter()
            .position(|item| &item.id == id)
            .ok_or_else(|| GridError::UnknownItem(id.clone()))
    }

    /// Remove an item by id, returning it. Remaining placements are untouched.
    pub fn remove(&mut self, id: &ItemId) -> Option<GridItem<C>> {
        let index = self.items.iter().position(|item| &item.id == id)?;
        let removed = self.items.remove(index);
        tracing::debug!(item = %removed.id, "grid item removed");
        Some(removed)
    }

    /// Current placements in item order, for planners that simulate a change.
    pub(crate) fn placements(&self) -> Vec<(ItemId, GridPlacement)> {
        self.items
            .iter()
            .map(|item| (item.id.clone(), item.placement))
            .collect()
    }

    /// Write a planned placement set back. `planned` is in item order.
    pub(crate) fn commit_placements(&mut self, planned: &[(ItemId, GridPlacement)]) {
        for (item, (id, placement)) in self.items.iter_mut().zip(planned) {
            debug_assert_eq!(&item.id, id);
            item.placement = *placement;
        }
        self.debug_check();
    }

    /// Check every layout invariant.
    pub fn validate(&self) -> Result<()> {
        let max_columns = self.limits.max_columns;
        let max_rows = self.limits.max_rows;
        if self.columns == 0 || self.columns > max_columns {
            return Err(GridError::TrackCountOutOfRange {
                axis: Axis::Column,
                count: self.columns,
                max: max_columns,
            });
        }
        if self.rows == 0 || self.rows > max_rows {
            return Err(GridError::TrackCountOutOfRange {
                axis: Axis::Row,
                count: self.rows,
                max: max_rows,
            });
        }

        let mut seen = BTreeSet::new();
        for item in &self.items {
            if !seen.insert(&item.id) {
                return Err(GridError::DuplicateItemId(item.id.clone()));
            }
        }

        Occupancy::build(self).map(|_| ())
    }

    /// Fail fast in debug builds if a mutation broke an invariant.
    pub(crate) fn debug_check(&self) {
        if cfg!(debug_assertions)
            && let Err(error) = self.validate()
        {
            panic!("grid layout invariant violated: {error}");
        }
    }
}

impl<C> Default for GridDocument<C> {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, row: u16, col: u16, row_span: u16, col_span: u16) -> GridItem<()> {
        GridItem::new(id, GridPlacement::new(row, col, row_span, col_span), ())
    }

    #[test]
    fn placement_edges_are_inclusive() {
        let placement = GridPlacement::new(2, 1, 2, 3);
        assert_eq!(placement.col_end(), 3);
        assert_eq!(placement.row_end(), 3);
        assert_eq!(placement.range(Axis::Column), TrackRange::new(1, 3));
        assert_eq!(placement.cells().count(), 6);
        assert!(placement.contains(Cell::new(3, 3)));
        assert!(!placement.contains(Cell::new(1, 1)));
    }

    #[test]
    fn placement_defaults_missing_row_fields() {
        let placement: GridPlacement = serde_json::from_str(r#"{"colStart": 2}"#).unwrap();
        assert_eq!(placement, GridPlacement::new(1, 2, 1, 1));
        let json = serde_json::to_string(&placement).unwrap();
        assert_eq!(json, r#"{"colStart":2,"colSpan":1,"rowStart":1,"rowSpan":1}"#);
    }

    #[test]
    fn new_clamps_track_counts() {
        let doc = GridDocument::<()>::new(0, 9);
        assert_eq!(doc.columns(), 1);
        assert_eq!(doc.rows(), 4);
    }

    #[test]
    fn effective_rows_follow_deepest_item() {
        let doc = GridDocument {
            columns: 2,
            rows: 1,
            items: vec![item("a", 1, 1, 1, 1), item("b", 2, 2, 2, 1)],
            limits: GridLimits::default(),
        };
        assert_eq!(doc.effective_rows(), 3);
        assert_eq!(doc.tracks(Axis::Row), 3);
        assert_eq!(doc.tracks(Axis::Column), 2);
    }

    #[test]
    fn validate_rejects_duplicate_ids() {
        let result = GridDocument::from_items(2, 1, [item("a", 1, 1, 1, 1), item("a", 1, 2, 1, 1)]);
        assert_eq!(result, Err(GridError::DuplicateItemId(ItemId::from("a"))));
    }

    #[test]
    fn validate_rejects_overlap_and_out_of_bounds() {
        let overlap = GridDocument::from_items(2, 2, [item("a", 1, 1, 2, 2), item("b", 2, 2, 1, 1)]);
        assert!(matches!(overlap, Err(GridError::Overlap { .. })));

        let wide = GridDocument::from_items(2, 1, [item("a", 1, 2, 1, 2)]);
        assert!(matches!(
            wide,
            Err(GridError::OutOfBounds {
                axis: Axis::Column,
                ..
            })
        ));
    }

    #[test]
    fn remove_returns_item_and_keeps_others() {
        let mut doc =
            GridDocument::from_items(2, 1, [item("a", 1, 1, 1, 1), item("b", 1, 2, 1, 1)]).unwrap();
        let removed = doc.remove(&ItemId::from("a")).unwrap();
        assert_eq!(removed.id.as_str(), "a");
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.placement(&ItemId::from("b")), Some(GridPlacement::new(1, 2, 1, 1)));
        assert!(doc.remove(&ItemId::from("missing")).is_none());
    }

    #[test]
    fn json_round_trip_validates() {
        let json = r#"{"columns":2,"items":[{"id":"a","placement":{"colStart":1,"colSpan":2},"content":null}]}"#;
        let doc = GridDocument::<()>::from_json_str(json, GridLimits::default()).unwrap();
        assert_eq!(doc.rows(), 1);
        assert_eq!(doc.placement(&ItemId::from("a")), Some(GridPlacement::new(1, 1, 1, 2)));

        let again = GridDocument::<()>::from_json_str(&doc.to_json_string().unwrap(), GridLimits::default())
            .unwrap();
        assert_eq!(again, doc);

        let bad = r#"{"columns":1,"items":[{"id":"a","placement":{"colStart":1,"colSpan":2},"content":null}]}"#;
        assert!(GridDocument::<()>::from_json_str(bad, GridLimits::default()).is_err());
    }

    #[test]
    fn plain_deserialize_validates_and_normalizes_rows() {
        let deep: GridDocument<()> = serde_json::from_str(
            r#"{"columns":1,"rows":1,"items":[{"id":"a","placement":{"colStart":1,"rowStart":3},"content":null}]}"#,
        )
        .unwrap();
        assert_eq!(deep.rows(), 3);

        let empty = serde_json::from_str::<GridDocument<()>>(r#"{"columns":0}"#);
        assert!(empty.is_err());
    }

    #[test]
    fn set_limits_rolls_back_when_layout_does_not_fit() {
        let mut doc = GridDocument::from_items(3, 1, [item("a", 1, 3, 1, 1)]).unwrap();
        assert!(doc.set_limits(GridLimits::new(2, 4).unwrap()).is_err());
        assert_eq!(doc.limits(), GridLimits::default());
        assert!(doc.set_limits(GridLimits::new(3, 2).unwrap()).is_ok());
    }
}
