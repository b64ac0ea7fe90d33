// Copyright 2025 the Layerdeck Authors
// SPDX-License-Identifier: Apache-2.0

//! Resolve a buffer-space point to the topmost layer under it

use super::LayerStore;
use kurbo::Point;

/// Index of the topmost layer containing `point`, if any.
///
/// Layers are tested bottom to top and every match overwrites the previous
/// one, so when layers overlap the last one in array order (the one painted
/// on top) wins. `point` must already be in buffer coordinates.
pub fn topmost_hit(store: &LayerStore, point: Point) -> Option<usize> {
    let mut hit = None;
    for (index, layer) in store.iter().enumerate() {
        if layer.contains(point) {
            hit = Some(index);
        }
    }

    match hit {
        Some(index) => tracing::debug!(
            "[topmost_hit] ({}, {}) -> layer {} ({})",
            point.x,
            point.y,
            index,
            store.layers()[index].id()
        ),
        None => tracing::debug!("[topmost_hit] ({}, {}) -> no hit", point.x, point.y),
    }

    hit
}
