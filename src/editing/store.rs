// Copyright 2025 the Layerdeck Authors
// SPDX-License-Identifier: Apache-2.0

//! Immutable layer snapshots.
//!
//! Every operation takes `&self` and returns a new `LayerStore`; the input
//! is never modified, so snapshots held by the history stay valid. An
//! operation that does nothing (bad index, equal reorder indices, clearing
//! an empty store) returns a clone that shares the input's storage, which
//! [`LayerStore::ptr_eq`] detects without comparing pixels.

use crate::model::{Bitmap, ImageLayer, Layer, PathLayer, PathStyle};
use kurbo::{BezPath, Point, Rect, Size, Vec2};
use std::sync::Arc;

/// An ordered sequence of layers. Later entries paint on top.
#[derive(Debug, Clone, Default)]
pub struct LayerStore {
    layers: Arc<Vec<Layer>>,
}

impl LayerStore {
    /// An empty composition
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    /// Iterate bottom to top
    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Rank of the layer at `index`. Always the live 1-based position.
    pub fn rank(&self, index: usize) -> Option<usize> {
        (index < self.len()).then_some(index + 1)
    }

    /// Whether both snapshots share storage (i.e. one was returned unchanged
    /// from an operation on the other)
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.layers, &other.layers)
    }

    fn with_layers(layers: Vec<Layer>) -> Self {
        Self {
            layers: Arc::new(layers),
        }
    }

    /// Append an unscaled image layer at `position` with `size`.
    /// The new layer's rank is `len + 1`.
    pub fn add_image_layer(&self, image: Bitmap, position: Point, size: Size) -> Self {
        let bounds = Rect::from_origin_size(position, size);
        self.push(Layer::Image(ImageLayer::new(image, bounds)))
    }

    /// Append a vector layer
    pub fn add_path_layer(&self, path: BezPath, style: PathStyle) -> Self {
        self.push(Layer::Path(PathLayer::new(path, style)))
    }

    /// Append an already-built layer
    pub fn push(&self, layer: Layer) -> Self {
        let mut layers = (*self.layers).clone();
        layers.push(layer);
        Self::with_layers(layers)
    }

    /// Replace the bounds of the image layer at `index`.
    pub fn set_layer_bounds(&self, index: usize, bounds: Rect, origin_bounds: Rect) -> Self {
        self.update_image(index, |image| ImageLayer {
            bounds,
            origin_bounds,
            ..image.clone()
        })
    }

    /// Replace the scale and recomputed bounds of the image layer at `index`.
    pub fn set_layer_scale(&self, index: usize, scale: f64, bounds: Rect) -> Self {
        self.update_image(index, |image| ImageLayer {
            scale,
            bounds,
            ..image.clone()
        })
    }

    /// Move the layer at `index` by `delta`, whatever its variant.
    pub fn translate_layer(&self, index: usize, delta: Vec2) -> Self {
        let Some(layer) = self.layers.get(index) else {
            return self.clone();
        };
        let moved = layer.translated(delta);
        self.replace(index, moved)
    }

    /// Remove the layer at `from` and reinsert it at `to`.
    pub fn reorder(&self, from: usize, to: usize) -> Self {
        if from == to || from >= self.len() || to >= self.len() {
            return self.clone();
        }
        let mut layers = (*self.layers).clone();
        let layer = layers.remove(from);
        layers.insert(to, layer);
        Self::with_layers(layers)
    }

    /// Empty the composition. Clearing an empty store returns it unchanged.
    pub fn clear(&self) -> Self {
        if self.is_empty() {
            return self.clone();
        }
        Self::new()
    }

    fn update_image(&self, index: usize, f: impl FnOnce(&ImageLayer) -> ImageLayer) -> Self {
        match self.layers.get(index) {
            Some(Layer::Image(image)) => {
                let updated = Layer::Image(f(image));
                self.replace(index, updated)
            }
            _ => self.clone(),
        }
    }

    fn replace(&self, index: usize, layer: Layer) -> Self {
        let mut layers = (*self.layers).clone();
        layers[index] = layer;
        Self::with_layers(layers)
    }
}

impl PartialEq for LayerStore {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.layers == other.layers
    }
}
