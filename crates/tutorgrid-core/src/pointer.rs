#![forbid(unsafe_code)]

//! Pointer positions and pixel-to-track conversion.
//!
//! The host measures its live grid container and hands the engine the pixel
//! size of one column and one row. Gesture deltas arrive in pixels and are
//! rounded to whole tracks here, so the layout engine only ever sees integer
//! track units.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Axis;

/// Pointer position in host pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: f32,
    pub y: f32,
}

impl PointerPosition {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Pixel offset from `self` to `other` along `axis`.
    #[inline]
    pub fn delta_to(self, other: Self, axis: Axis) -> f32 {
        match axis {
            Axis::Column => other.x - self.x,
            Axis::Row => other.y - self.y,
        }
    }
}

/// Rejected metric construction.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MetricsError {
    #[error("{axis} track size must be finite and > 0 (got {size})")]
    InvalidTrackSize { axis: Axis, size: f32 },
}

/// Pixel size of a single column and a single row track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackMetrics {
    column_width: f32,
    row_height: f32,
}

impl TrackMetrics {
    /// Validate and build metrics from the measured track sizes.
    pub fn new(column_width: f32, row_height: f32) -> Result<Self, MetricsError> {
        for (axis, size) in [(Axis::Column, column_width), (Axis::Row, row_height)] {
            if !size.is_finite() || size <= 0.0 {
                return Err(MetricsError::InvalidTrackSize { axis, size });
            }
        }
        Ok(Self {
            column_width,
            row_height,
        })
    }

    /// Derive metrics from a container's pixel box and its track counts.
    pub fn from_container(
        width: f32,
        height: f32,
        columns: u16,
        rows: u16,
    ) -> Result<Self, MetricsError> {
        Self::new(width / f32::from(columns.max(1)), height / f32::from(rows.max(1)))
    }

    #[must_use]
    pub const fn column_width(&self) -> f32 {
        self.column_width
    }

    #[must_use]
    pub const fn row_height(&self) -> f32 {
        self.row_height
    }

    /// Pixel size of one track along `axis`.
    #[must_use]
    pub const fn track_size(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Column => self.column_width,
            Axis::Row => self.row_height,
        }
    }

    /// Convert a pixel offset along `axis` into whole tracks, rounding to nearest.
    #[must_use]
    pub fn units(&self, axis: Axis, pixels: f32) -> i32 {
        let units = (pixels / self.track_size(axis)).round();
        if units.is_nan() {
            return 0;
        }
        // Saturating float-to-int cast.
        units as i32
    }
}

impl Default for TrackMetrics {
    fn default() -> Self {
        Self {
            column_width: 160.0,
            row_height: 120.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_sizes() {
        assert_eq!(
            TrackMetrics::new(0.0, 10.0),
            Err(MetricsError::InvalidTrackSize {
                axis: Axis::Column,
                size: 0.0
            })
        );
        assert!(TrackMetrics::new(10.0, f32::NAN).is_err());
        assert!(TrackMetrics::new(10.0, -4.0).is_err());
    }

    #[test]
    fn units_round_to_nearest_track() {
        let metrics = TrackMetrics::new(100.0, 50.0).unwrap();
        assert_eq!(metrics.units(Axis::Column, 49.0), 0);
        assert_eq!(metrics.units(Axis::Column, 51.0), 1);
        assert_eq!(metrics.units(Axis::Column, -151.0), -2);
        assert_eq!(metrics.units(Axis::Row, 74.0), 1);
        assert_eq!(metrics.units(Axis::Row, 76.0), 2);
    }

    #[test]
    fn metrics_from_container_divide_evenly() {
        let metrics = TrackMetrics::from_container(400.0, 300.0, 4, 3).unwrap();
        assert_eq!(metrics.column_width(), 100.0);
        assert_eq!(metrics.row_height(), 100.0);
        assert!(TrackMetrics::from_container(0.0, 300.0, 4, 3).is_err());
    }

    #[test]
    fn pointer_delta_follows_axis() {
        let a = PointerPosition::new(10.0, 20.0);
        let b = PointerPosition::new(35.0, 5.0);
        assert_eq!(a.delta_to(b, Axis::Column), 25.0);
        assert_eq!(a.delta_to(b, Axis::Row), -15.0);
    }
}
