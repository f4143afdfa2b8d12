#![forbid(unsafe_code)]

//! Core: track geometry, pointer metrics, and the logging facade.
//!
//! # Role in tutorgrid
//! `tutorgrid-core` holds the host-agnostic vocabulary shared by the layout
//! engine and its hosts: 1-based [`Cell`]s, [`Axis`]-generic [`TrackRange`]s,
//! and [`TrackMetrics`] for turning pixel gestures into whole track units.

pub mod geometry;
pub mod logging;
pub mod pointer;

pub use geometry::{Axis, Cell, TrackRange};
pub use pointer::{MetricsError, PointerPosition, TrackMetrics};
