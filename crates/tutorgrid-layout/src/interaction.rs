//! Drag and resize gestures as a synchronous reducer.
//!
//! [`GridInteraction`] consumes discrete gesture events and applies the
//! corresponding document operations. Every call returns a
//! [`GridTransition`] describing the state change and its effect, including
//! explicit no-op reasons for events that were ignored.
//!
//! ```text
//! Idle -> Dragging -> Idle   (drop, pointer-up outside the grid, cancel)
//! Idle -> Resizing -> Idle   (pointer-up, cancel)
//! ```
//!
//! There is no commit step and no rollback: each accepted resize step is
//! already a valid document, so cancelling simply stops the gesture.

use serde::{Deserialize, Serialize};
use tutorgrid_core::{PointerPosition, TrackMetrics};

use crate::error::{GridError, Result};
use crate::model::{GridDocument, ItemId};
use crate::moves::{DropTarget, MoveOutcome};
use crate::resize::{ResizeLine, ResizeOutcome, ResizeParticipants, ResizeRejection};

/// Gesture tuning supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InteractionConfig {
    pub metrics: TrackMetrics,
}

/// Current gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GridGestureState {
    Idle,
    Dragging {
        item: ItemId,
        hover: Option<DropTarget>,
    },
    Resizing {
        /// Line under the pointer, moved with every accepted step.
        line: ResizeLine,
        source: ItemId,
        origin: PointerPosition,
        /// Whole tracks applied since the gesture started.
        applied: i32,
    },
}

/// Input to the reducer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GridGestureEvent {
    DragStart {
        item: ItemId,
    },
    /// Pointer is over a drop target (or none) during a drag.
    DragOver {
        target: Option<DropTarget>,
    },
    Drop {
        target: DropTarget,
    },
    /// Pointer pressed on the resize handle of `source` for `line`.
    ResizeStart {
        line: ResizeLine,
        source: ItemId,
        position: PointerPosition,
    },
    PointerMove {
        position: PointerPosition,
    },
    PointerUp {
        position: PointerPosition,
    },
    Cancel,
}

/// Why an event changed nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridGestureNoopReason {
    IdleWithoutGesture,
    GestureAlreadyActive,
    EventNotForGesture,
    InertHandle,
    BelowTrackThreshold,
    ResizeRejected(ResizeRejection),
}

/// What one event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridGestureEffect {
    DragStarted {
        item: ItemId,
    },
    HoverChanged {
        target: Option<DropTarget>,
    },
    Dropped {
        item: ItemId,
        outcome: MoveOutcome,
    },
    ResizeStarted {
        participants: ResizeParticipants,
    },
    Resized {
        line: ResizeLine,
        delta: i32,
    },
    ResizeEnded {
        line: ResizeLine,
        applied: i32,
    },
    Canceled,
    Noop {
        reason: GridGestureNoopReason,
    },
}

/// One reducer step.
#[derive(Debug, Clone, PartialEq)]
pub struct GridTransition {
    pub transition_id: u64,
    pub from: GridGestureState,
    pub to: GridGestureState,
    pub effect: GridGestureEffect,
}

/// Resize-handle highlighting for the host while a line is dragged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeHighlight {
    pub line: ResizeLine,
    pub participants: Vec<ItemId>,
}

/// Reducer driving drag-and-drop and line-resize gestures.
#[derive(Debug, Clone, PartialEq)]
pub struct GridInteraction {
    state: GridGestureState,
    metrics: TrackMetrics,
    transition_counter: u64,
}

impl Default for GridInteraction {
    fn default() -> Self {
        Self::new(InteractionConfig::default())
    }
}

impl GridInteraction {
    #[must_use]
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            state: GridGestureState::Idle,
            metrics: config.metrics,
            transition_counter: 0,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &GridGestureState {
        &self.state
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self.state, GridGestureState::Idle)
    }

    #[must_use]
    pub const fn metrics(&self) -> TrackMetrics {
        self.metrics
    }

    /// Replace track metrics, e.g. after the container was resized mid-gesture.
    pub fn set_metrics(&mut self, metrics: TrackMetrics) {
        self.metrics = metrics;
    }

    /// Recompute track metrics from the container's measured pixel box.
    pub fn refresh_metrics<C>(
        &mut self,
        doc: &GridDocument<C>,
        width: f32,
        height: f32,
    ) -> Result<TrackMetrics> {
        self.metrics =
            TrackMetrics::from_container(width, height, doc.columns(), doc.effective_rows())?;
        Ok(self.metrics)
    }

    /// Items to highlight and the line label to show while resizing.
    pub fn highlight<C>(&self, doc: &GridDocument<C>) -> Result<Option<ResizeHighlight>> {
        let GridGestureState::Resizing { line, source, .. } = &self.state else {
            return Ok(None);
        };
        Ok(doc
            .resize_participants(*line, source)?
            .map(|participants| ResizeHighlight {
                line: *line,
                participants: participants.ids().cloned().collect(),
            }))
    }

    /// Apply one gesture event to `doc`.
    pub fn apply<C>(
        &mut self,
        doc: &mut GridDocument<C>,
        event: GridGestureEvent,
    ) -> Result<GridTransition> {
        let _span = tracing::debug_span!(
            "grid.gesture",
            transition = self.transition_counter + 1
        )
        .entered();

        let from = self.state.clone();
        let effect = match (from.clone(), event) {
            (GridGestureState::Idle, GridGestureEvent::DragStart { item }) => {
                if doc.item(&item).is_none() {
                    return Err(GridError::UnknownItem(item));
                }
                self.state = GridGestureState::Dragging {
                    item: item.clone(),
                    hover: None,
                };
                GridGestureEffect::DragStarted { item }
            }
            (
                GridGestureState::Idle,
                GridGestureEvent::ResizeStart {
                    line,
                    source,
                    position,
                },
            ) => match doc.resize_participants(line, &source)? {
                Some(participants) => {
                    self.state = GridGestureState::Resizing {
                        line,
                        source,
                        origin: position,
                        applied: 0,
                    };
                    GridGestureEffect::ResizeStarted { participants }
                }
                None => noop(GridGestureNoopReason::InertHandle),
            },
            (GridGestureState::Idle, _) => noop(GridGestureNoopReason::IdleWithoutGesture),

            (GridGestureState::Dragging { item, .. }, GridGestureEvent::DragOver { target }) => {
                self.state = GridGestureState::Dragging {
                    item,
                    hover: target,
                };
                GridGestureEffect::HoverChanged { target }
            }
            (GridGestureState::Dragging { item, .. }, GridGestureEvent::Drop { target }) => {
                let outcome = doc.move_item(&item, target)?;
                self.state = GridGestureState::Idle;
                GridGestureEffect::Dropped { item, outcome }
            }
            (
                GridGestureState::Dragging { .. },
                GridGestureEvent::PointerUp { .. } | GridGestureEvent::Cancel,
            ) => {
                self.state = GridGestureState::Idle;
                GridGestureEffect::Canceled
            }

            (GridGestureState::Resizing { .. }, GridGestureEvent::PointerMove { position }) => {
                self.resize_towards(doc, position)?
            }
            (GridGestureState::Resizing { .. }, GridGestureEvent::PointerUp { position }) => {
                self.resize_towards(doc, position)?;
                match std::mem::replace(&mut self.state, GridGestureState::Idle) {
                    GridGestureState::Resizing { line, applied, .. } => {
                        GridGestureEffect::ResizeEnded { line, applied }
                    }
                    _ => GridGestureEffect::Canceled,
                }
            }
            (GridGestureState::Resizing { .. }, GridGestureEvent::Cancel) => {
                self.state = GridGestureState::Idle;
                GridGestureEffect::Canceled
            }

            (
                GridGestureState::Dragging { .. } | GridGestureState::Resizing { .. },
                GridGestureEvent::DragStart { .. } | GridGestureEvent::ResizeStart { .. },
            ) => noop(GridGestureNoopReason::GestureAlreadyActive),
            (GridGestureState::Dragging { .. } | GridGestureState::Resizing { .. }, _) => {
                noop(GridGestureNoopReason::EventNotForGesture)
            }
        };

        self.transition_counter = self.transition_counter.saturating_add(1);
        let transition = GridTransition {
            transition_id: self.transition_counter,
            from,
            to: self.state.clone(),
            effect,
        };
        tracing::trace!(effect = ?transition.effect, "grid gesture transition");
        Ok(transition)
    }

    /// Step the dragged line one track at a time towards the pointer,
    /// stopping at the first rejected step.
    fn resize_towards<C>(
        &mut self,
        doc: &mut GridDocument<C>,
        position: PointerPosition,
    ) -> Result<GridGestureEffect> {
        let GridGestureState::Resizing {
            line,
            source,
            origin,
            applied,
        } = &mut self.state
        else {
            return Ok(noop(GridGestureNoopReason::EventNotForGesture));
        };

        let wanted = self
            .metrics
            .units(line.axis, origin.delta_to(position, line.axis));
        let remaining = wanted.saturating_sub(*applied);
        if remaining == 0 {
            return Ok(noop(GridGestureNoopReason::BelowTrackThreshold));
        }

        let unit = remaining.signum();
        let mut moved = 0;
        let mut rejection = None;
        while moved != remaining {
            match doc.resize_line(*line, source, unit)? {
                ResizeOutcome::Applied { line: next, .. } => {
                    *line = next;
                    moved += unit;
                }
                ResizeOutcome::Rejected(reason) => {
                    rejection = Some(reason);
                    break;
                }
            }
        }
        *applied += moved;

        if moved == 0 {
            let reason = rejection.unwrap_or(ResizeRejection::ZeroDelta);
            return Ok(noop(GridGestureNoopReason::ResizeRejected(reason)));
        }
        Ok(GridGestureEffect::Resized {
            line: *line,
            delta: moved,
        })
    }
}

const fn noop(reason: GridGestureNoopReason) -> GridGestureEffect {
    GridGestureEffect::Noop { reason }
}
