#![forbid(unsafe_code)]

//! Track geometry primitives.
//!
//! Grid coordinates are 1-based, matching the CSS grid line model the host
//! renders with: column 1 is the leftmost track, row 1 the topmost. Lines sit
//! between tracks, so a grid of `n` tracks has lines `0..=n`.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One cell of the grid, addressed by 1-based row and column.
///
/// Ordering is row-major: all cells of row 1 sort before any cell of row 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: u16,
    pub col: u16,
}

impl Cell {
    /// Create a new cell.
    #[inline]
    pub const fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }

    /// Track index of this cell along `axis`.
    #[inline]
    pub const fn track(self, axis: Axis) -> u16 {
        match axis {
            Axis::Column => self.col,
            Axis::Row => self.row,
        }
    }

    /// Build a cell from a track index along `axis` and one along the cross axis.
    #[inline]
    pub const fn from_tracks(axis: Axis, main: u16, cross: u16) -> Self {
        match axis {
            Axis::Column => Self::new(cross, main),
            Axis::Row => Self::new(main, cross),
        }
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Grid axis.
///
/// `Column` addresses column tracks (horizontal extent), `Row` addresses row
/// tracks (vertical extent). Algorithms written against one axis become their
/// own transpose by swapping in [`Axis::cross`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Column,
    Row,
}

impl Axis {
    /// The perpendicular axis.
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::Column => Self::Row,
            Self::Row => Self::Column,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column => f.write_str("column"),
            Self::Row => f.write_str("row"),
        }
    }
}

/// Inclusive range of 1-based tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackRange {
    pub start: u16,
    pub end: u16,
}

impl TrackRange {
    /// Create a range from an inclusive start and end.
    #[inline]
    pub const fn new(start: u16, end: u16) -> Self {
        Self { start, end }
    }

    /// Create a range from a start track and a span (span 0 is treated as 1).
    #[inline]
    pub const fn from_span(start: u16, span: u16) -> Self {
        let span = if span == 0 { 1 } else { span };
        Self::new(start, start.saturating_add(span - 1))
    }

    /// Number of tracks covered.
    #[inline]
    pub const fn len(self) -> u16 {
        self.end.saturating_sub(self.start).saturating_add(1)
    }

    /// Ranges always cover at least one track.
    #[inline]
    pub const fn is_empty(self) -> bool {
        false
    }

    #[inline]
    pub const fn contains(self, track: u16) -> bool {
        track >= self.start && track <= self.end
    }

    /// Whether the two ranges share at least one track.
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Smallest range covering both.
    #[inline]
    pub fn union(self, other: Self) -> Self {
        Self::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// Iterate the covered tracks in ascending order.
    pub fn iter(self) -> impl Iterator<Item = u16> {
        self.start..=self.end
    }
}

impl fmt::Display for TrackRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}
