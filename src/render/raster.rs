// Copyright 2025 the Layerdeck Authors
// SPDX-License-Identifier: Apache-2.0

//! Software surface rasterized by `vello_cpu`.
//!
//! Draw calls are recorded into a `vello_cpu::RenderContext` and only
//! rasterized when pixels are read back. The context has no canvas-style
//! state stack, so fill and stroke styles live here and are pushed into the
//! context on every draw. Bitmaps are sampled nearest-neighbour.

use super::Surface;
use crate::model::Bitmap;
use image::{Rgba, RgbaImage};
use kurbo::{BezPath, PathEl, Rect, Size};
use peniko::Color;
use std::sync::Arc;
use vello_cpu::peniko::color::PremulRgba8;
use vello_cpu::{Pixmap, RenderContext};

#[derive(Debug, Clone, Copy)]
struct DrawState {
    fill: Color,
    stroke: Color,
    line_width: f64,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            fill: Color::BLACK,
            stroke: Color::BLACK,
            line_width: 1.0,
        }
    }
}

/// An in-memory RGBA8 drawing surface
pub struct RasterSurface {
    ctx: RenderContext,
    state: DrawState,
    saved: Vec<DrawState>,
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("width", &self.ctx.width())
            .field("height", &self.ctx.height())
            .field("state", &self.state)
            .field("saved", &self.saved.len())
            .finish_non_exhaustive()
    }
}

impl RasterSurface {
    /// A transparent surface of `width` x `height` pixels
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            ctx: RenderContext::new(width, height),
            state: DrawState::default(),
            saved: Vec::new(),
        }
    }

    /// Rasterize everything drawn since the last `clear` into straight-alpha RGBA
    pub fn rasterize(&mut self) -> RgbaImage {
        let (width, height) = (self.ctx.width(), self.ctx.height());
        let mut pixmap = Pixmap::new(width, height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);

        let mut bytes = pixmap.data_as_u8_slice().to_vec();
        unpremultiply_rgba8_in_place(&mut bytes);
        RgbaImage::from_raw(u32::from(width), u32::from(height), bytes)
            .unwrap_or_else(|| RgbaImage::new(u32::from(width), u32::from(height)))
    }

    pub fn into_image(mut self) -> RgbaImage {
        self.rasterize()
    }

    /// Pixel at `(x, y)`, or `None` outside the buffer
    pub fn pixel(&mut self, x: u32, y: u32) -> Option<Rgba<u8>> {
        self.rasterize().get_pixel_checked(x, y).copied()
    }

    fn use_color(&mut self, color: Color) {
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(color_to_cpu(color));
    }
}

impl Surface for RasterSurface {
    fn size(&self) -> Size {
        Size::new(f64::from(self.ctx.width()), f64::from(self.ctx.height()))
    }

    fn clear(&mut self) {
        self.ctx.reset();
    }

    fn save(&mut self) {
        self.saved.push(self.state);
    }

    fn restore(&mut self) {
        // Unbalanced restore is ignored, like a 2D canvas context
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    fn set_fill(&mut self, color: Color) {
        self.state.fill = color;
    }

    fn set_stroke(&mut self, color: Color, width: f64) {
        self.state.stroke = color;
        self.state.line_width = width;
    }

    fn fill_path(&mut self, path: &BezPath) {
        self.use_color(self.state.fill);
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    fn stroke_path(&mut self, path: &BezPath) {
        if self.state.line_width <= 0.0 {
            return;
        }
        self.use_color(self.state.stroke);
        self.ctx
            .set_stroke(vello_cpu::kurbo::Stroke::new(self.state.line_width));
        self.ctx.stroke_path(&bezpath_to_cpu(path));
    }

    fn draw_image(&mut self, image: &Bitmap, dest: Rect) {
        let dest = dest.abs();
        if dest.is_zero_area() {
            return;
        }
        let Some(paint) = image_paint(image) else {
            tracing::warn!(
                "[RasterSurface] skipping {}x{} bitmap, too large to sample",
                image.width(),
                image.height()
            );
            return;
        };

        let placement = vello_cpu::kurbo::Affine::translate((dest.x0, dest.y0))
            * vello_cpu::kurbo::Affine::scale_non_uniform(
                dest.width() / f64::from(image.width()),
                dest.height() / f64::from(image.height()),
            );
        self.ctx.set_paint(paint);
        self.ctx.set_paint_transform(placement);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            dest.x0, dest.y0, dest.x1, dest.y1,
        ));
    }
}

fn color_to_cpu(color: Color) -> vello_cpu::peniko::Color {
    let rgba = color.to_rgba8();
    vello_cpu::peniko::Color::from_rgba8(rgba.r, rgba.g, rgba.b, rgba.a)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    let point = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);

    let mut out = vello_cpu::kurbo::BezPath::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => out.move_to(point(p)),
            PathEl::LineTo(p) => out.line_to(point(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point(p1), point(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(point(p1), point(p2), point(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

/// Wrap a bitmap as a nearest-neighbour image paint.
///
/// Returns `None` when the bitmap does not fit a `vello_cpu` pixmap.
fn image_paint(image: &Bitmap) -> Option<vello_cpu::Image> {
    let width = u16::try_from(image.width()).ok()?;
    let height = u16::try_from(image.height()).ok()?;

    let pixels = image
        .pixels()
        .pixels()
        .map(|px| PremulRgba8::from_u8_array(premul_rgba8(px.0)))
        .collect();
    let pixmap = Pixmap::from_parts(pixels, width, height);

    let mut sampler = vello_cpu::peniko::ImageSampler::default();
    sampler.quality = vello_cpu::peniko::ImageQuality::Low;
    Some(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler,
    })
}

fn premul_rgba8(rgba: [u8; 4]) -> [u8; 4] {
    let [r, g, b, a] = rgba;
    let a16 = u16::from(a);
    let premul = |c: u8| -> u8 { ((u16::from(c) * a16 + 127) / 255) as u8 };
    [premul(r), premul(g), premul(b), a]
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[..3].fill(0);
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::LayerStore;
    use crate::model::PathStyle;
    use crate::render::render_layers;
    use kurbo::{Point, Shape};

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    fn solid(width: u32, height: u32, color: Rgba<u8>) -> Bitmap {
        Bitmap::from_rgba(RgbaImage::from_pixel(width, height, color)).unwrap()
    }

    #[test]
    fn draw_image_stretches_into_dest() {
        let mut surface = RasterSurface::new(20, 20);
        surface.draw_image(&solid(2, 2, RED), Rect::new(5.0, 5.0, 15.0, 15.0));
        let pixels = surface.rasterize();
        assert_eq!(pixels.get_pixel(5, 5), &RED);
        assert_eq!(pixels.get_pixel(14, 14), &RED);
        assert_eq!(pixels.get_pixel(4, 4), &CLEAR);
        assert_eq!(pixels.get_pixel(15, 15), &CLEAR);
    }

    #[test]
    fn draw_image_samples_nearest_pixel() {
        let mut source = RgbaImage::from_pixel(2, 1, RED);
        source.put_pixel(1, 0, BLUE);
        let bitmap = Bitmap::from_rgba(source).unwrap();
        let mut surface = RasterSurface::new(20, 10);
        surface.draw_image(&bitmap, Rect::new(0.0, 0.0, 20.0, 10.0));
        let pixels = surface.rasterize();
        assert_eq!(pixels.get_pixel(2, 5), &RED);
        assert_eq!(pixels.get_pixel(17, 5), &BLUE);
    }

    #[test]
    fn draw_image_clips_to_buffer() {
        let mut surface = RasterSurface::new(10, 10);
        surface.draw_image(&solid(1, 1, RED), Rect::new(-5.0, -5.0, 5.0, 5.0));
        surface.draw_image(&solid(1, 1, RED), Rect::new(50.0, 50.0, 60.0, 60.0));
        let pixels = surface.rasterize();
        assert_eq!(pixels.get_pixel(0, 0), &RED);
        assert_eq!(pixels.get_pixel(5, 5), &CLEAR);
        assert_eq!(pixels.get_pixel(9, 9), &CLEAR);
        assert_eq!(surface.pixel(10, 10), None);
    }

    #[test]
    fn fill_uses_current_fill_color() {
        let mut surface = RasterSurface::new(10, 10);
        surface.set_fill(Color::from_rgb8(0, 0, 255));
        surface.fill_path(&Rect::new(2.0, 2.0, 6.0, 6.0).to_path(0.1));
        assert_eq!(surface.pixel(3, 3), Some(BLUE));
        assert_eq!(surface.pixel(7, 7), Some(CLEAR));
    }

    #[test]
    fn stroke_covers_outline_not_interior() {
        let mut surface = RasterSurface::new(40, 40);
        surface.set_stroke(Color::from_rgb8(255, 0, 0), 4.0);
        surface.stroke_path(&Rect::new(10.0, 10.0, 30.0, 30.0).to_path(0.1));
        assert_eq!(surface.pixel(10, 20), Some(RED));
        assert_eq!(surface.pixel(20, 20), Some(CLEAR));
    }

    #[test]
    fn zero_width_stroke_draws_nothing() {
        let mut surface = RasterSurface::new(20, 20);
        surface.set_stroke(Color::from_rgb8(255, 0, 0), 0.0);
        surface.stroke_path(&Rect::new(5.0, 5.0, 15.0, 15.0).to_path(0.1));
        assert_eq!(surface.pixel(5, 10), Some(CLEAR));
    }

    #[test]
    fn restore_brings_back_style() {
        let mut surface = RasterSurface::new(10, 10);
        surface.set_fill(Color::from_rgb8(255, 0, 0));
        surface.save();
        surface.set_fill(Color::from_rgb8(0, 0, 255));
        surface.restore();
        surface.fill_path(&Rect::new(0.0, 0.0, 10.0, 10.0).to_path(0.1));
        assert_eq!(surface.pixel(5, 5), Some(RED));
        // Extra restore is harmless
        surface.restore();
    }

    #[test]
    fn half_transparent_fill_blends_over_opaque() {
        let square = Rect::new(0.0, 0.0, 10.0, 10.0).to_path(0.1);
        let mut surface = RasterSurface::new(10, 10);
        surface.set_fill(Color::from_rgb8(0, 0, 255));
        surface.fill_path(&square);
        surface.set_fill(Color::from_rgba8(255, 0, 0, 128));
        surface.fill_path(&square);

        let Some(Rgba([r, g, b, a])) = surface.pixel(5, 5) else {
            panic!("pixel inside the buffer");
        };
        assert_eq!(a, 255);
        assert_eq!(g, 0);
        assert!((120..136).contains(&r));
        assert!((120..136).contains(&b));
    }

    #[test]
    fn later_layer_paints_on_top() {
        let store = LayerStore::new()
            .add_image_layer(solid(1, 1, RED), Point::new(0.0, 0.0), Size::new(10.0, 10.0))
            .add_image_layer(solid(1, 1, BLUE), Point::new(5.0, 5.0), Size::new(10.0, 10.0));
        let mut surface = RasterSurface::new(20, 20);
        render_layers(&store, &mut surface);
        let pixels = surface.into_image();
        assert_eq!(pixels.get_pixel(2, 2), &RED);
        assert_eq!(pixels.get_pixel(7, 7), &BLUE);
        assert_eq!(pixels.get_pixel(18, 18), &CLEAR);
    }

    #[test]
    fn path_style_does_not_leak_into_next_layer() {
        let red_square = Rect::new(0.0, 0.0, 10.0, 10.0).to_path(0.1);
        let default_square = Rect::new(20.0, 0.0, 30.0, 10.0).to_path(0.1);
        let store = LayerStore::new().add_path_layer(
            red_square,
            PathStyle {
                fill: Color::from_rgb8(255, 0, 0),
                stroke: Color::from_rgb8(255, 0, 0),
                stroke_width: 0.0,
            },
        );
        let mut surface = RasterSurface::new(40, 20);
        render_layers(&store, &mut surface);
        // Drawing after the painter returns uses the surface's own default
        surface.fill_path(&default_square);
        assert_eq!(surface.pixel(5, 5), Some(RED));
        assert_eq!(surface.pixel(25, 5), Some(Rgba([0, 0, 0, 255])));
    }

    #[test]
    fn render_clears_previous_frame() {
        let mut surface = RasterSurface::new(10, 10);
        surface.draw_image(&solid(1, 1, RED), Rect::new(0.0, 0.0, 10.0, 10.0));
        render_layers(&LayerStore::new(), &mut surface);
        assert_eq!(surface.pixel(5, 5), Some(CLEAR));
    }
}
