use tutorgrid_core::{Axis, Cell, MetricsError};
use thiserror::Error;

use crate::model::ItemId;

pub type Result<T> = std::result::Result<T, GridError>;

/// Malformed input or a broken layout invariant.
///
/// Expected UI states (grid full, inert resize handle, blocked drop) are not
/// errors; they come back as outcome enums from the operations themselves.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("two items claim cell {cell}: {first} and {second}")]
    Overlap {
        cell: Cell,
        first: ItemId,
        second: ItemId,
    },

    #[error("item {item} covers {axis} tracks {start}..={end} outside the grid (1..={tracks})")]
    OutOfBounds {
        item: ItemId,
        axis: Axis,
        start: u16,
        end: u16,
        tracks: u16,
    },

    #[error("item {item} has a zero {axis} start or span")]
    ZeroExtent { item: ItemId, axis: Axis },

    #[error("unknown item: {0}")]
    UnknownItem(ItemId),

    #[error("duplicate item id: {0}")]
    DuplicateItemId(ItemId),

    #[error("{axis} track count {count} outside 1..={max}")]
    TrackCountOutOfRange { axis: Axis, count: u16, max: u16 },

    #[error("invalid grid limits: max {axis} tracks must be within 1..={ceiling} (got {value})")]
    InvalidLimits { axis: Axis, value: u16, ceiling: u16 },

    #[error("reshaping to {count} {axis} tracks leaves no room for item {item}")]
    ReshapeWouldOverlap { axis: Axis, count: u16, item: ItemId },

    #[error("resize line {index} is outside 0..={tracks} on the {axis} axis")]
    LineOutOfRange { axis: Axis, index: u16, tracks: u16 },

    #[error("invalid track metrics: {0}")]
    Metrics(#[from] MetricsError),

    #[error("JSON error: {0}")]
    Json(String),
}

impl From<serde_json::Error> for GridError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error.to_string())
    }
}
