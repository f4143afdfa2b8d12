#![forbid(unsafe_code)]

//! Grid layout engine for profile page modules.
//!
//! A [`GridDocument`] is a small grid (4 × 4 by default) of placed items.
//! The engine covers the page builder's grid interactions:
//!
//! - **Insertion**: first free cell in row-major order, growing one row when full.
//! - **Move**: drop into free space with span clamping, swap with another
//!   item, or grow the grid by dropping on its bottom or right edge.
//! - **Resize**: drag a shared column or row line; every item with an edge
//!   on the line follows.
//! - **Reshape**: explicit column and row count changes.
//!
//! All operations are synchronous and either apply completely or leave the
//! document untouched. Cell occupancy is always derived from item placements.
//! [`GridInteraction`] turns pointer gestures into these operations.

pub mod content;
pub mod error;
pub mod insert;
pub mod interaction;
pub mod limits;
pub mod model;
pub mod moves;
pub mod occupancy;
pub mod reshape;
pub mod resize;

pub use content::{ContentFactory, DefaultContentFactory, ModuleContent, ModuleKind};
pub use error::{GridError, Result};
pub use insert::InsertOutcome;
pub use interaction::{
    GridGestureEffect, GridGestureEvent, GridGestureNoopReason, GridGestureState,
    GridInteraction, GridTransition, InteractionConfig, ResizeHighlight,
};
pub use limits::{GRID_MAX_TRACKS, GridLimits};
pub use model::{GridDocument, GridItem, GridPlacement, ItemId};
pub use moves::{DropTarget, MoveOutcome};
pub use occupancy::Occupancy;
pub use reshape::ReshapeOutcome;
pub use resize::{ResizeLine, ResizeOutcome, ResizeParticipants, ResizeRejection};
pub use tutorgrid_core::{Axis, Cell, PointerPosition, TrackMetrics, TrackRange};
