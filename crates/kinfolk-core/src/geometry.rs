#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Scene coordinates are floating-point pixels with the origin at the
//! top-left and y growing downward.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A point in scene coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin.
    pub const ZERO: Point = Point::new(0.0, 0.0);

    /// Scale both coordinates by `factor`.
    #[inline]
    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// An axis-aligned rectangle for placements, bounds, and hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: f64,
    /// Top edge (inclusive).
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle at `origin` with the given size.
    #[inline]
    pub const fn at(origin: Point, width: f64, height: f64) -> Self {
        Self::new(origin.x, origin.y, width, height)
    }

    /// Top-left corner.
    #[inline]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    #[inline]
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Midpoint of the top edge.
    #[inline]
    pub fn top_center(&self) -> Point {
        Point::new(self.center_x(), self.y)
    }

    /// Midpoint of the bottom edge.
    #[inline]
    pub fn bottom_center(&self) -> Point {
        Point::new(self.center_x(), self.bottom())
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        self.contains_x(point.x) && point.y >= self.y && point.y < self.bottom()
    }

    /// Check if `x` lies in the half-open span `[x, right)`.
    #[inline]
    pub fn contains_x(&self, x: f64) -> bool {
        x >= self.x && x < self.right()
    }

    /// Move the rectangle by `offset`.
    #[inline]
    #[must_use]
    pub fn translate(&self, offset: Point) -> Rect {
        Rect::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }

    /// Scale position and size by `factor`.
    #[inline]
    #[must_use]
    pub fn scale(&self, factor: f64) -> Rect {
        Rect::new(
            self.x * factor,
            self.y * factor,
            self.width * factor,
            self.height * factor,
        )
    }

    /// Create a new rectangle that is the union of this rectangle and another.
    ///
    /// The result is the smallest rectangle that contains both. An empty
    /// operand is ignored.
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());

        Rect {
            x,
            y,
            width: right - x,
            height: bottom - y,
        }
    }

    /// Whether the horizontal spans of two rectangles overlap.
    #[inline]
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.x < other.right() && other.x < self.right()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn edges_and_centers() {
        let r = Rect::new(10.0, 20.0, 200.0, 280.0);
        assert_eq!(r.right(), 210.0);
        assert_eq!(r.bottom(), 300.0);
        assert_eq!(r.top_center(), Point::new(110.0, 20.0));
        assert_eq!(r.bottom_center(), Point::new(110.0, 300.0));
    }

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(r.contains(Point::new(9.9, 9.9)));
        assert!(!r.contains(Point::new(10.0, 5.0)));
        assert!(!r.contains(Point::new(5.0, 10.0)));
        assert!(!r.contains_x(-0.1));
    }

    #[test]
    fn union_ignores_empty() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 5.0, 5.0, 20.0);
        assert_eq!(a.union(&b), Rect::new(0.0, 0.0, 25.0, 25.0));
        assert_eq!(Rect::default().union(&b), b);
        assert_eq!(a.union(&Rect::default()), a);
    }

    #[test]
    fn horizontal_overlap() {
        let a = Rect::new(0.0, 0.0, 200.0, 10.0);
        let b = Rect::new(240.0, 0.0, 200.0, 10.0);
        let c = Rect::new(199.0, 50.0, 5.0, 5.0);
        assert!(!a.overlaps_x(&b));
        assert!(a.overlaps_x(&c));
    }

    #[test]
    fn point_arithmetic() {
        let p = Point::new(3.0, 4.0) - Point::new(1.0, 1.0);
        assert_eq!(p, Point::new(2.0, 3.0));
        assert_eq!(p + Point::ZERO, p);
        assert_eq!(p.scale(2.0), Point::new(4.0, 6.0));
    }

    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (-1e4f64..1e4, -1e4f64..1e4, 0.5f64..1e3, 0.5f64..1e3)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn union_covers_both_operands(a in rect_strategy(), b in rect_strategy()) {
            // `right()` is recomputed as `x + width`, so edges match to rounding.
            const EPS: f64 = 1e-9;
            let u = a.union(&b);
            for r in [a, b] {
                prop_assert!(u.x <= r.x && u.y <= r.y);
                prop_assert!(u.right() >= r.right() - EPS);
                prop_assert!(u.bottom() >= r.bottom() - EPS);
            }
        }

        #[test]
        fn translate_preserves_size(r in rect_strategy(), dx in -1e3f64..1e3, dy in -1e3f64..1e3) {
            let moved = r.translate(Point::new(dx, dy));
            prop_assert_eq!(moved.width, r.width);
            prop_assert_eq!(moved.height, r.height);
            prop_assert!(moved.contains(Point::new(r.x + dx, r.y + dy)));
        }
    }
}
