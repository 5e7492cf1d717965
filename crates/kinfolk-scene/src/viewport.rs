#![forbid(unsafe_code)]

//! Zoom and pan between scene and view coordinates.

use kinfolk_core::{Point, Rect};

/// Multiplier applied by [`Viewport::zoom_in`].
pub const ZOOM_IN_FACTOR: f64 = 1.1;
/// Multiplier applied by [`Viewport::zoom_out`].
pub const ZOOM_OUT_FACTOR: f64 = 0.9;
/// Smallest zoom [`Viewport::zoom_out`] goes down to.
pub const MIN_ZOOM: f64 = 0.1;

/// Maps scene coordinates to view coordinates: `view = (scene - origin) * zoom`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    zoom: f64,
    /// Scene point shown at the view's top-left corner.
    origin: Point,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            origin: Point::ZERO,
        }
    }
}

impl Viewport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    #[inline]
    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn zoom_in(&mut self) -> f64 {
        self.zoom *= ZOOM_IN_FACTOR;
        self.zoom
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.zoom = (self.zoom * ZOOM_OUT_FACTOR).max(MIN_ZOOM);
        self.zoom
    }

    /// Set the zoom directly, clamped to at least [`MIN_ZOOM`].
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = if zoom.is_finite() {
            zoom.max(MIN_ZOOM)
        } else {
            1.0
        };
    }

    /// Scroll so that `origin` is at the view's top-left corner.
    pub fn scroll_to(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Scroll by a distance measured in view pixels.
    pub fn pan_by(&mut self, view_delta: Point) {
        self.origin = self.origin - view_delta.scale(1.0 / self.zoom);
    }

    /// Back to zoom 1 at the scene origin.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn to_view(&self, scene: Point) -> Point {
        (scene - self.origin).scale(self.zoom)
    }

    #[must_use]
    pub fn to_scene(&self, view: Point) -> Point {
        view.scale(1.0 / self.zoom) + self.origin
    }

    /// Scene rectangle visible in a view of `width` x `height` pixels.
    #[must_use]
    pub fn visible_rect(&self, width: f64, height: f64) -> Rect {
        Rect::at(self.origin, width / self.zoom, height / self.zoom)
    }
}
