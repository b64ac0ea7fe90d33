// Copyright 2025 the Layerdeck Authors
// SPDX-License-Identifier: Apache-2.0

//! Side-list data and list interactions for LayerCanvas

use super::LayerCanvas;
use crate::editing::EditKind;
use crate::model::{LayerId, LayerKind};

/// One row of the layer list, in store order (bottom first)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerRow {
    pub index: usize,
    pub id: LayerId,
    pub rank: usize,
    pub kind: LayerKind,
    /// Whether this row carries the single "active" marker
    pub active: bool,
}

impl LayerCanvas {
    /// Rows describing the live store
    pub fn layer_list(&self) -> Vec<LayerRow> {
        self.store
            .iter()
            .enumerate()
            .map(|(index, layer)| LayerRow {
                index,
                id: layer.id(),
                rank: index + 1,
                kind: layer.kind(),
                active: self.selection.is_selected(index),
            })
            .collect()
    }

    /// Click on a list row: toggles the row's selection.
    pub fn click_layer(&mut self, index: usize) -> bool {
        if index >= self.store.len() {
            return false;
        }
        self.selection.toggle(index);
        true
    }

    /// Drag-to-reorder within the list. Dropping a row onto itself does
    /// nothing and records nothing.
    pub fn reorder_layers(&mut self, source: usize, target: usize) -> bool {
        if source == target {
            return false;
        }
        let reordered = self.store.reorder(source, target);
        if !self.apply(reordered) {
            tracing::debug!(
                "[LayerCanvas::reorder_layers] {} -> {} out of range",
                source,
                target
            );
            return false;
        }
        self.end_drag();
        self.selection.follow_reorder(source, target);
        self.record_edit(EditKind::Reorder);
        true
    }
}
