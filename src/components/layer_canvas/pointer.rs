// Copyright 2025 the Layerdeck Authors
// SPDX-License-Identifier: Apache-2.0

//! Pointer and wheel event handlers for LayerCanvas

use super::LayerCanvas;
use crate::editing::{EditKind, topmost_hit};
use crate::geometry::{self, ScaleStep};
use crate::model::Layer;
use kurbo::Point;

/// Drag state machine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerState {
    /// No button held over a layer
    Idle,

    /// A layer is being dragged
    Dragging {
        /// Store index of the dragged layer
        index: usize,
        /// Last pointer position, in buffer coordinates
        last: Point,
        /// Whether any move has been applied since the drag started
        moved: bool,
    },
}

impl PointerState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    pub(super) fn reset_moved(&mut self) {
        if let Self::Dragging { moved, .. } = self {
            *moved = false;
        }
    }
}

impl LayerCanvas {
    // ============================================================================
    // POINTER EVENT HANDLERS
    // ============================================================================

    pub fn pointer_state(&self) -> PointerState {
        self.pointer
    }

    /// Handle pointer down at a display-space position.
    ///
    /// A hit selects the topmost layer under the pointer and starts a drag.
    /// A miss clears the selection. Returns whether a drag started.
    pub fn pointer_down(&mut self, display_pos: Point) -> bool {
        let Some(mapping) = self.mapping else {
            tracing::debug!("[LayerCanvas::pointer_down] no surface, ignored");
            return false;
        };
        let pos = mapping.to_buffer(display_pos);

        // A down without a matching up abandons the previous gesture
        self.end_drag();

        let Some(index) = topmost_hit(&self.store, pos) else {
            // Click missed every layer - deselect
            self.selection.clear();
            return false;
        };

        self.selection.select(index);
        self.pointer = PointerState::Dragging {
            index,
            last: pos,
            moved: false,
        };
        self.history.begin_batch();
        tracing::debug!("[LayerCanvas::pointer_down] dragging layer {}", index);
        true
    }

    /// Handle pointer move. While dragging, moves the dragged layer by the
    /// delta since the last event; the history entry is deferred to
    /// pointer up.
    pub fn pointer_move(&mut self, display_pos: Point) -> bool {
        let PointerState::Dragging { index, last, .. } = self.pointer else {
            return false;
        };
        let Some(mapping) = self.mapping else {
            return false;
        };
        let pos = mapping.to_buffer(display_pos);
        let delta = pos - last;
        if delta.x == 0.0 && delta.y == 0.0 {
            return false;
        }

        let next = match self.store.get(index) {
            Some(Layer::Image(image)) => self.store.set_layer_bounds(
                index,
                image.bounds + delta,
                image.origin_bounds + delta,
            ),
            Some(Layer::Path(_)) => self.store.translate_layer(index, delta),
            None => {
                tracing::debug!("[LayerCanvas::pointer_move] layer {} is gone", index);
                self.end_drag();
                return false;
            }
        };

        self.apply(next);
        self.history.commit(self.store.clone());
        self.pointer = PointerState::Dragging {
            index,
            last: pos,
            moved: true,
        };
        true
    }

    /// Handle pointer up. A drag that moved becomes one undo step.
    pub fn pointer_up(&mut self) -> bool {
        let PointerState::Dragging { index, moved, .. } = self.pointer else {
            return false;
        };
        self.pointer = PointerState::Idle;

        if !moved {
            self.history.cancel_batch();
            return false;
        }

        if !self.history.end_batch() {
            return false;
        }
        self.log.push(EditKind::Move.label());
        tracing::info!(
            "{} {}: history {}/{}",
            EditKind::Move,
            index,
            self.history.cursor() + 1,
            self.history.len()
        );
        true
    }

    /// Handle the pointer leaving the surface.
    ///
    /// The drag ends without a history entry. Moves already applied stay
    /// in the live store, uncommitted, until the next recorded edit.
    pub fn pointer_leave(&mut self) -> bool {
        let PointerState::Dragging { moved, .. } = self.pointer else {
            return false;
        };
        if moved {
            tracing::debug!("[LayerCanvas::pointer_leave] drag abandoned with uncommitted moves");
        }
        self.end_drag();
        true
    }

    /// Handle a wheel event: one scale step on the selected image layer,
    /// committed immediately. Works whether or not a drag is in progress.
    pub fn wheel(&mut self, delta_y: f64) -> bool {
        let Some(step) = ScaleStep::from_wheel_delta(delta_y) else {
            return false;
        };
        if self.store.is_empty() {
            return false;
        }
        let Some(index) = self.selection.active() else {
            tracing::debug!("[LayerCanvas::wheel] no selection, ignored");
            return false;
        };
        let Some(Layer::Image(image)) = self.store.get(index) else {
            return false;
        };

        let Some(scale) = geometry::step_scale(image.scale, step, &self.settings) else {
            // Already at the limit
            return false;
        };
        let scaled = image.with_scale(scale);
        let next = self.store.set_layer_scale(index, scaled.scale, scaled.bounds);
        self.apply(next);
        self.record_edit(EditKind::Scale);
        true
    }

    /// Return to idle, discarding any open drag batch
    pub(super) fn end_drag(&mut self) {
        if self.pointer.is_dragging() {
            self.history.cancel_batch();
            self.pointer = PointerState::Idle;
        }
    }
}
