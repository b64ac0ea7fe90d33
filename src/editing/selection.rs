// Copyright 2025 the Layerdeck Authors
// SPDX-License-Identifier: Apache-2.0

//! The single active layer.
//!
//! Selection is an index into the current layer store, or nothing. The
//! canvas keeps it in step with every store change: it follows its layer
//! through reorders and is dropped when the layer it points at disappears.

/// At most one selected layer, by array index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    active: Option<usize>,
}

impl Selection {
    /// Create a new empty selection
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_none()
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.active == Some(index)
    }

    /// Select `index` exclusively
    pub fn select(&mut self, index: usize) {
        self.active = Some(index);
    }

    pub fn clear(&mut self) {
        self.active = None;
    }

    /// Clicking the selected layer deselects it; clicking any other layer
    /// selects it instead.
    pub fn toggle(&mut self, index: usize) {
        if self.is_selected(index) {
            self.active = None;
        } else {
            self.active = Some(index);
        }
    }

    /// Update the index after the layer at `from` moved to `to`, shifting
    /// the layers in between.
    pub fn follow_reorder(&mut self, from: usize, to: usize) {
        let Some(active) = self.active else {
            return;
        };
        self.active = Some(if active == from {
            to
        } else if from < active && active <= to {
            active - 1
        } else if to <= active && active < from {
            active + 1
        } else {
            active
        });
    }

    /// Drop the selection if it no longer addresses a layer
    pub fn retain_within(&mut self, len: usize) {
        if self.active.is_some_and(|index| index >= len) {
            self.active = None;
        }
    }
}
