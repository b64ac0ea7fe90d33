// Copyright 2025 the Layerdeck Authors
// SPDX-License-Identifier: Apache-2.0

//! Transform math: centered scaling and display-to-buffer mapping.

use crate::settings::Settings;
use kurbo::{Point, Rect, Size};

/// Scale `origin` by `scale` about its own center.
///
/// `new_size = origin_size * scale` and the top-left corner moves by half
/// the growth, so the center stays fixed.
pub fn scaled_about_center(origin: Rect, scale: f64) -> Rect {
    let width = origin.width() * scale;
    let height = origin.height() * scale;
    let x = origin.x0 - (width - origin.width()) / 2.0;
    let y = origin.y0 - (height - origin.height()) / 2.0;
    Rect::from_origin_size((x, y), (width, height))
}

/// Direction of one wheel tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleStep {
    Up,
    Down,
}

impl ScaleStep {
    /// Map a vertical wheel delta to a step. Wheel up (negative delta)
    /// grows the layer; a zero delta is not a step.
    pub fn from_wheel_delta(delta_y: f64) -> Option<Self> {
        if delta_y < 0.0 {
            Some(Self::Up)
        } else if delta_y > 0.0 {
            Some(Self::Down)
        } else {
            None
        }
    }

    fn sign(self) -> f64 {
        match self {
            Self::Up => 1.0,
            Self::Down => -1.0,
        }
    }
}

/// Apply one step to `current`, clamped to the configured range.
///
/// Returns `None` when the clamped result equals `current` (within
/// `settings::scale::EPSILON`), so callers skip the commit and repaint.
pub fn step_scale(current: f64, step: ScaleStep, settings: &Settings) -> Option<f64> {
    let raw = current + step.sign() * settings.scale_step;
    let precision = crate::settings::scale::PRECISION;
    let rounded = (raw * precision).round() / precision;
    let next = rounded.clamp(settings.min_scale, settings.max_scale);
    if approx_eq(next, current) {
        None
    } else {
        Some(next)
    }
}

/// Float equality within `settings::scale::EPSILON`
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= crate::settings::scale::EPSILON
}

/// Relation between the drawing surface's displayed size and its pixel
/// buffer size.
///
/// Pointer positions arrive in display coordinates; hit testing and layer
/// placement work in buffer coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceMapping {
    buffer: Size,
    display: Size,
}

impl SurfaceMapping {
    /// Returns `None` if either size has a non-positive dimension.
    pub fn new(buffer: Size, display: Size) -> Option<Self> {
        let valid = |s: Size| s.width > 0.0 && s.height > 0.0;
        (valid(buffer) && valid(display)).then_some(Self { buffer, display })
    }

    pub fn buffer_size(&self) -> Size {
        self.buffer
    }

    pub fn display_size(&self) -> Size {
        self.display
    }

    /// Rescale a display-space point by `buffer / display` per axis
    pub fn to_buffer(&self, display_pos: Point) -> Point {
        Point::new(
            display_pos.x * self.buffer.width / self.display.width,
            display_pos.y * self.buffer.height / self.display.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rect_approx(a: Rect, b: Rect) {
        for (x, y) in [(a.x0, b.x0), (a.y0, b.y0), (a.x1, b.x1), (a.y1, b.y1)] {
            assert!((x - y).abs() < 1e-9, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn scaling_keeps_center() {
        let origin = Rect::new(10.0, 20.0, 110.0, 70.0);
        let scaled = scaled_about_center(origin, 1.1);
        assert_rect_approx(scaled, Rect::new(5.0, 17.5, 115.0, 72.5));
        assert!((scaled.center() - origin.center()).hypot() < 1e-9);
    }

    #[test]
    fn unit_scale_is_identity() {
        let origin = Rect::new(3.0, 4.0, 13.0, 24.0);
        assert_rect_approx(scaled_about_center(origin, 1.0), origin);
    }

    #[test]
    fn wheel_delta_direction() {
        assert_eq!(ScaleStep::from_wheel_delta(-120.0), Some(ScaleStep::Up));
        assert_eq!(ScaleStep::from_wheel_delta(3.0), Some(ScaleStep::Down));
        assert_eq!(ScaleStep::from_wheel_delta(0.0), None);
    }

    #[test]
    fn single_step_up() {
        let settings = Settings::default();
        let next = step_scale(1.0, ScaleStep::Up, &settings).unwrap();
        assert!(approx_eq(next, 1.1));
    }

    #[test]
    fn custom_step_is_added_not_snapped() {
        let settings = Settings {
            scale_step: 0.3,
            ..Settings::default()
        };
        assert_eq!(step_scale(1.0, ScaleStep::Up, &settings), Some(1.3));
        assert_eq!(step_scale(1.3, ScaleStep::Down, &settings), Some(1.0));
    }

    #[test]
    fn off_grid_limits_are_respected() {
        let settings = Settings {
            min_scale: 0.15,
            max_scale: 1.95,
            ..Settings::default()
        };
        assert_eq!(step_scale(0.15, ScaleStep::Up, &settings), Some(0.25));
        assert_eq!(step_scale(0.2, ScaleStep::Down, &settings), Some(0.15));
        assert_eq!(step_scale(1.9, ScaleStep::Up, &settings), Some(1.95));
        assert_eq!(step_scale(1.95, ScaleStep::Up, &settings), None);
    }

    #[test]
    fn steps_converge_to_max_and_stay() {
        let settings = Settings::default();
        let mut scale = 1.0;
        let mut changes = 0;
        for _ in 0..30 {
            if let Some(next) = step_scale(scale, ScaleStep::Up, &settings) {
                assert!(next <= settings.max_scale);
                scale = next;
                changes += 1;
            }
        }
        assert_eq!(scale, settings.max_scale);
        assert_eq!(changes, 10);
        assert_eq!(step_scale(scale, ScaleStep::Up, &settings), None);
    }

    #[test]
    fn steps_converge_to_min_and_stay() {
        let settings = Settings::default();
        let mut scale = 1.0;
        for _ in 0..30 {
            if let Some(next) = step_scale(scale, ScaleStep::Down, &settings) {
                assert!(next >= settings.min_scale);
                scale = next;
            }
        }
        assert_eq!(scale, settings.min_scale);
        assert_eq!(step_scale(scale, ScaleStep::Down, &settings), None);
    }

    #[test]
    fn mapping_rescales_per_axis() {
        let mapping =
            SurfaceMapping::new(Size::new(800.0, 600.0), Size::new(400.0, 200.0)).unwrap();
        assert_eq!(mapping.to_buffer(Point::new(100.0, 50.0)), Point::new(200.0, 150.0));
    }

    #[test]
    fn mapping_rejects_zero_display() {
        assert!(SurfaceMapping::new(Size::new(800.0, 600.0), Size::new(0.0, 200.0)).is_none());
        assert!(SurfaceMapping::new(Size::ZERO, Size::new(10.0, 10.0)).is_none());
    }
}
