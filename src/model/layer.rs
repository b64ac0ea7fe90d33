// Copyright 2025 the Layerdeck Authors
// SPDX-License-Identifier: Apache-2.0

//! Layer types: bitmap images and vector regions.
//!
//! A layer never stores its own stacking position. The array order of the
//! [`LayerStore`](crate::editing::LayerStore) is the single source of truth
//! for paint order, hit-test precedence and rank.

use super::{Bitmap, LayerId};
use crate::geometry;
use kurbo::{Affine, BezPath, Point, Rect, Shape, Vec2};
use peniko::Color;

/// One drawable unit in the composition
#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    Image(ImageLayer),
    Path(PathLayer),
}

impl Layer {
    /// Stable identity of this layer
    pub fn id(&self) -> LayerId {
        match self {
            Self::Image(image) => image.id,
            Self::Path(path) => path.id,
        }
    }

    /// Short name of the variant, for layer lists and logs
    pub fn kind(&self) -> LayerKind {
        match self {
            Self::Image(_) => LayerKind::Image,
            Self::Path(_) => LayerKind::Path,
        }
    }

    /// Whether `point` (buffer coordinates) lies inside the layer's
    /// current geometry
    pub fn contains(&self, point: Point) -> bool {
        match self {
            Self::Image(image) => image.contains(point),
            Self::Path(path) => path.contains(point),
        }
    }

    /// Axis-aligned bounds of the current geometry
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Image(image) => image.bounds,
            Self::Path(path) => path.path.bounding_box(),
        }
    }

    /// Return a copy moved by `delta`
    pub fn translated(&self, delta: Vec2) -> Self {
        match self {
            Self::Image(image) => Self::Image(ImageLayer {
                bounds: image.bounds + delta,
                origin_bounds: image.origin_bounds + delta,
                ..image.clone()
            }),
            Self::Path(path) => Self::Path(PathLayer {
                path: Affine::translate(delta) * &path.path,
                ..path.clone()
            }),
        }
    }

    pub fn as_image(&self) -> Option<&ImageLayer> {
        match self {
            Self::Image(image) => Some(image),
            Self::Path(_) => None,
        }
    }

    pub fn as_path(&self) -> Option<&PathLayer> {
        match self {
            Self::Path(path) => Some(path),
            Self::Image(_) => None,
        }
    }
}

/// Variant tag of a [`Layer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Image,
    Path,
}

impl LayerKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Path => "path",
        }
    }
}

// ============================================================================
// IMAGE LAYER
// ============================================================================

/// A bitmap placed on the canvas.
///
/// `bounds` is always `origin_bounds` scaled by `scale` about its center.
/// Drags translate both rectangles together, so the relation holds after
/// any sequence of moves and scales.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageLayer {
    pub id: LayerId,
    /// Current scale factor relative to `origin_bounds`.
    pub scale: f64,
    /// On-canvas rectangle the bitmap is drawn into.
    pub bounds: Rect,
    /// Unscaled reference rectangle.
    pub origin_bounds: Rect,
    /// Shared pixels.
    pub image: Bitmap,
}

impl ImageLayer {
    /// New unscaled image layer covering `bounds`
    pub fn new(image: Bitmap, bounds: Rect) -> Self {
        Self {
            id: LayerId::next(),
            scale: 1.0,
            bounds,
            origin_bounds: bounds,
            image,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        self.bounds.contains(point)
    }

    /// Copy with a new scale; bounds are recomputed about the origin's center
    pub fn with_scale(&self, scale: f64) -> Self {
        Self {
            scale,
            bounds: geometry::scaled_about_center(self.origin_bounds, scale),
            ..self.clone()
        }
    }
}

// ============================================================================
// PATH LAYER
// ============================================================================

/// Fill and stroke style of a vector layer
#[derive(Debug, Clone, Copy)]
pub struct PathStyle {
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: f64,
}

impl PartialEq for PathStyle {
    fn eq(&self, other: &Self) -> bool {
        self.fill.components == other.fill.components
            && self.stroke.components == other.stroke.components
            && self.stroke_width == other.stroke_width
    }
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            fill: Color::from_rgb8(0x80, 0x80, 0x80),
            stroke: Color::from_rgb8(0x10, 0x10, 0x10),
            stroke_width: 1.0,
        }
    }
}

/// A vector region filled and stroked on the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct PathLayer {
    pub id: LayerId,
    pub path: BezPath,
    pub style: PathStyle,
    /// Pre-clipped bitmap associated with the region, if any. Carried with
    /// the layer; the painter does not draw it.
    pub image: Option<Bitmap>,
}

impl PathLayer {
    pub fn new(path: BezPath, style: PathStyle) -> Self {
        Self {
            id: LayerId::next(),
            path,
            style,
            image: None,
        }
    }

    /// Exact nonzero-winding containment
    pub fn contains(&self, point: Point) -> bool {
        self.path.winding(point) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn bitmap() -> Bitmap {
        Bitmap::from_rgba(RgbaImage::new(10, 10)).unwrap()
    }

    fn triangle() -> BezPath {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((100.0, 0.0));
        path.line_to((0.0, 100.0));
        path.close_path();
        path
    }

    #[test]
    fn image_contains_uses_current_bounds() {
        let layer = ImageLayer::new(bitmap(), Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(layer.contains(Point::new(5.0, 5.0)));
        assert!(!layer.contains(Point::new(15.0, 5.0)));

        let scaled = layer.with_scale(2.0);
        assert!(scaled.contains(Point::new(-4.0, -4.0)));
        assert_eq!(scaled.origin_bounds, layer.origin_bounds);
    }

    #[test]
    fn path_contains_is_exact() {
        let layer = PathLayer::new(triangle(), PathStyle::default());
        assert!(layer.contains(Point::new(10.0, 10.0)));
        // Inside the bounding box but outside the triangle
        assert!(!layer.contains(Point::new(90.0, 90.0)));
    }

    #[test]
    fn translate_moves_both_image_rects() {
        let layer = Layer::Image(ImageLayer::new(bitmap(), Rect::new(0.0, 0.0, 10.0, 10.0)));
        let moved = layer.translated(Vec2::new(5.0, -5.0));
        let image = moved.as_image().unwrap();
        assert_eq!(image.bounds, Rect::new(5.0, -5.0, 15.0, 5.0));
        assert_eq!(image.origin_bounds, Rect::new(5.0, -5.0, 15.0, 5.0));
        assert_eq!(moved.id(), layer.id());
    }

    #[test]
    fn translate_moves_path() {
        let layer = Layer::Path(PathLayer::new(triangle(), PathStyle::default()));
        let moved = layer.translated(Vec2::new(10.0, 10.0));
        assert!(moved.contains(Point::new(15.0, 15.0)));
        assert!(!moved.contains(Point::new(5.0, 5.0)));
        assert_eq!(moved.bounds(), Rect::new(10.0, 10.0, 110.0, 110.0));
    }

    #[test]
    fn kind_labels() {
        let image = Layer::Image(ImageLayer::new(bitmap(), Rect::ZERO));
        let path = Layer::Path(PathLayer::new(triangle(), PathStyle::default()));
        assert_eq!(image.kind(), LayerKind::Image);
        assert_eq!(path.kind().label(), "path");
        assert!(path.as_image().is_none());
        assert!(image.as_path().is_none());
    }
}
