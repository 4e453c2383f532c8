//! Screen-to-world projection for selection gestures.
//!
//! Orthographic camera looking at the field. Screen space has its origin at
//! the top-left corner with y pointing down; world space has y pointing up.

use glam::DVec2;

use frogbox_core::types::{Position, ScreenPoint};

/// Converts screen points into world positions.
pub trait Projection {
    fn screen_to_world(&self, point: ScreenPoint) -> Position;
}

/// Orthographic camera centered on a world position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoCamera {
    center: DVec2,
    pixels_per_unit: f64,
    viewport: DVec2,
}

impl OrthoCamera {
    pub fn new(center: Position, pixels_per_unit: f64, viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            center: center.as_vec(),
            pixels_per_unit,
            viewport: DVec2::new(viewport_width, viewport_height),
        }
    }

    /// Largest zoom that shows the whole field (centered on the origin) in the viewport.
    pub fn fit_field(half_width: f64, half_height: f64, viewport_width: f64, viewport_height: f64) -> Self {
        let scale_x = viewport_width / (2.0 * half_width);
        let scale_y = viewport_height / (2.0 * half_height);
        Self::new(Position::default(), scale_x.min(scale_y), viewport_width, viewport_height)
    }

    pub fn pixels_per_unit(&self) -> f64 {
        self.pixels_per_unit
    }

    /// Inverse of [`Projection::screen_to_world`].
    pub fn world_to_screen(&self, position: &Position) -> ScreenPoint {
        let offset = (position.as_vec() - self.center) * self.pixels_per_unit;
        let screen = self.viewport * 0.5 + DVec2::new(offset.x, -offset.y);
        ScreenPoint::new(screen.x, screen.y)
    }
}

impl Projection for OrthoCamera {
    fn screen_to_world(&self, point: ScreenPoint) -> Position {
        let offset = (DVec2::new(point.x, point.y) - self.viewport * 0.5) / self.pixels_per_unit;
        (self.center + DVec2::new(offset.x, -offset.y)).into()
    }
}
