// Copyright 2025 the Layerdeck Authors
// SPDX-License-Identifier: Apache-2.0

//! Layerdeck: a layer composition and interaction engine
//!
//! A composition is an ordered stack of bitmap and vector layers. The
//! [`LayerCanvas`] controller turns host input (pointer, wheel, drops,
//! list clicks, shortcuts) into edits of an immutable [`LayerStore`],
//! records one undo step per logical action in a [`History`], and repaints
//! onto any [`Surface`] when the store changes.
//!
//! ```
//! use layerdeck::{Bitmap, LayerCanvas, RasterSurface};
//! use kurbo::{Point, Size, Vec2};
//!
//! let mut canvas = LayerCanvas::new();
//! canvas.set_surface_size(Size::new(200.0, 200.0), Size::new(200.0, 200.0));
//!
//! let pixels = image::RgbaImage::new(40, 40);
//! let bitmap = Bitmap::from_rgba(pixels).unwrap();
//! canvas.drop_image(bitmap, Point::new(20.0, 20.0), Vec2::ZERO);
//!
//! canvas.pointer_down(Point::new(30.0, 30.0));
//! canvas.pointer_move(Point::new(40.0, 30.0));
//! canvas.pointer_up();
//! canvas.wheel(-1.0);
//!
//! let mut surface = RasterSurface::new(200, 200);
//! canvas.paint(&mut surface);
//! assert!(canvas.undo());
//! ```

pub mod components;
pub mod editing;
pub mod geometry;
pub mod model;
pub mod render;
pub mod settings;

pub use components::{LayerCanvas, LayerRow, PointerState};
pub use editing::{ActionLog, EditKind, History, LayerStore, Selection, topmost_hit};
pub use geometry::{ScaleStep, SurfaceMapping};
pub use model::{Bitmap, ImageLayer, IngestError, Layer, LayerId, LayerKind, PathLayer, PathStyle};
pub use render::{RasterSurface, Surface, render_layers};
pub use settings::{Settings, SettingsError};

/// Install a `tracing` subscriber for hosts that don't bring their own.
///
/// The filter comes from `RUST_LOG`, with `layerdeck=info` added as a
/// default. Calling this more than once (or after another subscriber was
/// installed) is harmless.
pub fn init_tracing() {
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "layerdeck=info".parse::<tracing_subscriber::filter::Directive>() {
        filter = filter.add_directive(directive);
    }
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
