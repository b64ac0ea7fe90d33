// Copyright 2025 the Layerdeck Authors
// SPDX-License-Identifier: Apache-2.0

//! Painting the layer store onto a 2D surface.
//!
//! The painter walks the store bottom to top (painter's algorithm). Image
//! layers are blitted straight into their current bounds, which already
//! include the scale, so no per-layer transform is needed. Each layer is
//! drawn between `save` and `restore` so its style cannot leak into the next.

mod raster;

pub use raster::RasterSurface;

use crate::editing::LayerStore;
use crate::model::{Bitmap, Layer};
use kurbo::{BezPath, Rect, Size};
use peniko::Color;

/// A 2D raster drawing target with canvas-style state
pub trait Surface {
    /// Buffer size in pixels
    fn size(&self) -> Size;

    /// Reset every pixel to transparent
    fn clear(&mut self);

    /// Push the current drawing state
    fn save(&mut self);

    /// Pop the drawing state pushed by the matching `save`
    fn restore(&mut self);

    fn set_fill(&mut self, color: Color);

    fn set_stroke(&mut self, color: Color, width: f64);

    /// Fill with the current fill color (nonzero winding)
    fn fill_path(&mut self, path: &BezPath);

    /// Stroke with the current stroke color and width
    fn stroke_path(&mut self, path: &BezPath);

    /// Draw `image` stretched into `dest`
    fn draw_image(&mut self, image: &Bitmap, dest: Rect);
}

/// Clear `surface` and paint every layer of `store` in array order
pub fn render_layers<S: Surface + ?Sized>(store: &LayerStore, surface: &mut S) {
    surface.clear();

    for layer in store.iter() {
        surface.save();
        match layer {
            Layer::Image(image) => {
                surface.draw_image(&image.image, image.bounds);
            }
            Layer::Path(path) => {
                surface.set_fill(path.style.fill);
                surface.set_stroke(path.style.stroke, path.style.stroke_width);
                surface.fill_path(&path.path);
                surface.stroke_path(&path.path);
            }
        }
        surface.restore();
    }

    tracing::debug!("[render_layers] painted {} layers", store.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PathStyle;
    use image::RgbaImage;
    use kurbo::{Point, Shape};

    /// Records calls so tests can check ordering and isolation
    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
        depth: i32,
    }

    impl Surface for Recorder {
        fn size(&self) -> Size {
            Size::new(100.0, 100.0)
        }
        fn clear(&mut self) {
            self.calls.push("clear".into());
        }
        fn save(&mut self) {
            self.depth += 1;
            self.calls.push("save".into());
        }
        fn restore(&mut self) {
            self.depth -= 1;
            self.calls.push("restore".into());
        }
        fn set_fill(&mut self, _color: Color) {
            self.calls.push("set_fill".into());
        }
        fn set_stroke(&mut self, _color: Color, width: f64) {
            self.calls.push(format!("set_stroke {width}"));
        }
        fn fill_path(&mut self, _path: &BezPath) {
            self.calls.push("fill".into());
        }
        fn stroke_path(&mut self, _path: &BezPath) {
            self.calls.push("stroke".into());
        }
        fn draw_image(&mut self, image: &Bitmap, dest: Rect) {
            self.calls
                .push(format!("image {}x{} at {},{}", image.width(), image.height(), dest.x0, dest.y0));
        }
    }

    #[test]
    fn empty_store_only_clears() {
        let mut recorder = Recorder::default();
        render_layers(&LayerStore::new(), &mut recorder);
        assert_eq!(recorder.calls, vec!["clear"]);
    }

    #[test]
    fn layers_paint_in_order_with_isolation() {
        let bitmap = Bitmap::from_rgba(RgbaImage::new(3, 2)).unwrap();
        let store = LayerStore::new()
            .add_image_layer(bitmap, Point::new(1.0, 2.0), Size::new(3.0, 2.0))
            .add_path_layer(
                Rect::new(0.0, 0.0, 5.0, 5.0).to_path(0.1),
                PathStyle {
                    stroke_width: 3.0,
                    ..PathStyle::default()
                },
            );

        let mut recorder = Recorder::default();
        render_layers(&store, &mut recorder);
        assert_eq!(
            recorder.calls,
            vec![
                "clear",
                "save",
                "image 3x2 at 1,2",
                "restore",
                "save",
                "set_fill",
                "set_stroke 3",
                "fill",
                "stroke",
                "restore",
            ]
        );
        assert_eq!(recorder.depth, 0);
    }
}
