// Copyright 2025 the Layerdeck Authors
// SPDX-License-Identifier: Apache-2.0

//! Repaint on change for LayerCanvas

use super::LayerCanvas;
use crate::render::{Surface, render_layers};

impl LayerCanvas {
    /// Whether the store changed since the last paint
    pub fn needs_paint(&self) -> bool {
        self.needs_paint
    }

    /// Paint the live store if it changed since the last paint.
    ///
    /// Returns whether anything was drawn.
    pub fn paint<S: Surface + ?Sized>(&mut self, surface: &mut S) -> bool {
        if !self.needs_paint {
            return false;
        }
        self.force_paint(surface);
        true
    }

    /// Paint the live store unconditionally (e.g. after the host resized
    /// or lost the surface)
    pub fn force_paint<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        render_layers(&self.store, surface);
        self.needs_paint = false;
    }
}
