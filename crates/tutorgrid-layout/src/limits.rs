//! Track-count limits for a grid document.
//!
//! The product caps grids at 4 × 4. The algorithms are general; the cap is a
//! configuration value so hosts and tests can reason about it explicitly.

use serde::{Deserialize, Serialize};
use tutorgrid_core::Axis;

use crate::error::{GridError, Result};

/// Default maximum column and row count.
pub const GRID_MAX_TRACKS: u16 = 4;

/// Upper bound accepted for configured limits.
pub const GRID_LIMIT_CEILING: u16 = 64;

/// Maximum number of column and row tracks a document may grow to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridLimits {
    pub max_columns: u16,
    pub max_rows: u16,
}

impl GridLimits {
    /// Validated limits.
    pub fn new(max_columns: u16, max_rows: u16) -> Result<Self> {
        let limits = Self {
            max_columns,
            max_rows,
        };
        limits.validate()?;
        Ok(limits)
    }

    /// Parse limits from a JSON configuration fragment.
    ///
    /// Missing fields fall back to [`GRID_MAX_TRACKS`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        let limits: Self = serde_json::from_str(json)?;
        limits.validate()?;
        Ok(limits)
    }

    pub fn validate(self) -> Result<()> {
        for axis in [Axis::Column, Axis::Row] {
            let value = self.max_tracks(axis);
            if value == 0 || value > GRID_LIMIT_CEILING {
                return Err(GridError::InvalidLimits {
                    axis,
                    value,
                    ceiling: GRID_LIMIT_CEILING,
                });
            }
        }
        Ok(())
    }

    /// Cap along `axis`.
    #[must_use]
    pub const fn max_tracks(self, axis: Axis) -> u16 {
        match axis {
            Axis::Column => self.max_columns,
            Axis::Row => self.max_rows,
        }
    }

    /// Clamp a requested track count into `1..=max`.
    #[must_use]
    pub fn clamp(self, axis: Axis, count: u16) -> u16 {
        count.clamp(1, self.max_tracks(axis))
    }
}

impl Default for GridLimits {
    fn default() -> Self {
        Self {
            max_columns: GRID_MAX_TRACKS,
            max_rows: GRID_MAX_TRACKS,
        }
    }
}
