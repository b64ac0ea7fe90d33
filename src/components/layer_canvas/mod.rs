// Copyright 2025 the Layerdeck Authors
// SPDX-License-Identifier: Apache-2.0

//! Layer canvas controller - turns input events into store edits
//!
//! The controller owns the live layer store, the history, the selection
//! and the drag bookkeeping. Every handler runs synchronously: it mutates
//! the store, commits to the history when a logical action completes, and
//! marks the canvas for repaint. Nothing else writes to this state.

mod keyboard;
mod layer_list;
mod paint;
mod pointer;

pub use layer_list::LayerRow;
pub use pointer::PointerState;

use crate::editing::{ActionLog, EditKind, History, LayerStore, Selection};
use crate::geometry::SurfaceMapping;
use crate::model::{Bitmap, PathStyle};
use crate::settings::Settings;
use kurbo::{BezPath, Point, Size, Vec2};

/// Interaction controller for a stack of layers on one drawing surface
#[derive(Debug, Clone)]
pub struct LayerCanvas {
    /// The live composition. Equal to `history.current()` except during a
    /// drag and after a drag abandoned by pointer-leave.
    store: LayerStore,

    /// Committed snapshots
    history: History<LayerStore>,

    /// The active layer, kept valid against `store`
    selection: Selection,

    /// Pointer state machine
    pointer: PointerState,

    /// Recent action labels
    log: ActionLog,

    /// Display/buffer sizes of the surface, once known
    mapping: Option<SurfaceMapping>,

    settings: Settings,

    /// Set by every store change, cleared by painting
    needs_paint: bool,
}

impl Default for LayerCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerCanvas {
    /// An empty canvas with default settings
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    /// An empty canvas with the given settings
    pub fn with_settings(settings: Settings) -> Self {
        let store = LayerStore::new();
        Self {
            history: History::new(store.clone()),
            store,
            selection: Selection::new(),
            pointer: PointerState::Idle,
            log: ActionLog::new(settings.action_log_capacity),
            mapping: None,
            settings,
            needs_paint: true,
        }
    }

    // ============================================================================
    // ACCESSORS
    // ============================================================================

    pub fn store(&self) -> &LayerStore {
        &self.store
    }

    pub fn history(&self) -> &History<LayerStore> {
        &self.history
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn action_log(&self) -> &ActionLog {
        &self.log
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn surface_mapping(&self) -> Option<SurfaceMapping> {
        self.mapping
    }

    /// Record the surface's pixel buffer size and its displayed size.
    ///
    /// Until this is called with valid sizes, pointer and drop events are
    /// ignored.
    pub fn set_surface_size(&mut self, buffer_size: Size, display_size: Size) {
        self.mapping = SurfaceMapping::new(buffer_size, display_size);
        if self.mapping.is_none() {
            tracing::debug!(
                "[LayerCanvas] unusable surface size buffer={:?} display={:?}",
                buffer_size,
                display_size
            );
        }
    }

    // ============================================================================
    // EDITS
    // ============================================================================

    /// Add a freshly loaded bitmap at the buffer origin with its natural
    /// size, and select it.
    pub fn on_image_ready(&mut self, image: Bitmap) -> bool {
        let size = image.size();
        let store = self.store.add_image_layer(image, Point::ZERO, size);
        self.add_layer(store)
    }

    /// Drop a bitmap onto the canvas.
    ///
    /// `grab_offset` is where inside the image the user picked it up, in
    /// display units, so the image lands under the pointer the same way it
    /// was held.
    pub fn drop_image(&mut self, image: Bitmap, display_pos: Point, grab_offset: Vec2) -> bool {
        let Some(mapping) = self.mapping else {
            tracing::debug!("[LayerCanvas::drop_image] no surface, drop ignored");
            return false;
        };
        let position = mapping.to_buffer(display_pos - grab_offset);
        let size = image.size();
        let store = self.store.add_image_layer(image, position, size);
        self.add_layer(store)
    }

    /// Add a vector layer on top and select it
    pub fn add_path_layer(&mut self, path: BezPath, style: PathStyle) -> bool {
        let store = self.store.add_path_layer(path, style);
        self.add_layer(store)
    }

    /// Remove every layer. Does nothing (and records nothing) when the
    /// canvas is already empty.
    pub fn clear(&mut self) -> bool {
        self.end_drag();
        let cleared = self.store.clear();
        if !self.apply(cleared) {
            tracing::debug!("[LayerCanvas::clear] already empty");
            return false;
        }
        self.selection.clear();
        self.record_edit(EditKind::Clear);
        true
    }

    /// Undo the last committed edit
    pub fn undo(&mut self) -> bool {
        self.end_drag();
        let Some(previous) = self.history.undo().cloned() else {
            tracing::debug!("[LayerCanvas::undo] nothing to undo");
            return false;
        };
        self.restore(previous, EditKind::Undo);
        true
    }

    /// Redo the last undone edit
    pub fn redo(&mut self) -> bool {
        self.end_drag();
        let Some(next) = self.history.redo().cloned() else {
            tracing::debug!("[LayerCanvas::redo] nothing to redo");
            return false;
        };
        self.restore(next, EditKind::Redo);
        true
    }

    // ============================================================================
    // HELPERS
    // ============================================================================

    fn add_layer(&mut self, store: LayerStore) -> bool {
        self.apply(store);
        self.selection.select(self.store.len() - 1);
        self.record_edit(EditKind::AddLayer);
        true
    }

    fn restore(&mut self, store: LayerStore, kind: EditKind) {
        self.store = store;
        self.needs_paint = true;
        self.selection.retain_within(self.store.len());
        self.log.push(kind.label());
        tracing::info!(
            "{}: history {}/{}",
            kind,
            self.history.cursor() + 1,
            self.history.len()
        );
    }

    /// Make `store` the live composition. Returns false if it is the same
    /// snapshot (the operation was a no-op).
    fn apply(&mut self, store: LayerStore) -> bool {
        if store.ptr_eq(&self.store) {
            return false;
        }
        self.store = store;
        self.needs_paint = true;
        true
    }

    /// Commit the live store as one undo step and log it.
    ///
    /// An edit that lands in the middle of a drag (a wheel tick) flushes the
    /// drag's moves as their own step first, then reopens the batch.
    fn record_edit(&mut self, kind: EditKind) {
        let resume_batch = self.history.is_batching();
        if resume_batch {
            if self.history.end_batch() {
                self.log.push(EditKind::Move.label());
            }
            self.pointer.reset_moved();
        }

        self.history.commit(self.store.clone());
        self.log.push(kind.label());
        tracing::info!(
            "{}: {} layers, history {}/{}",
            kind,
            self.store.len(),
            self.history.cursor() + 1,
            self.history.len()
        );

        if resume_batch {
            self.history.begin_batch();
        }
    }
}
