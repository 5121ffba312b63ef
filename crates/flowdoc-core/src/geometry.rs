//! Plane geometry in diagram units.
//!
//! Flow coordinates use a y-up convention: the first step of a flow sits at
//! the largest `y` and later steps below it. Nothing here knows about
//! pixels; exporters project these values onto their own canvas.

use serde::{Deserialize, Serialize};

/// A position, or a displacement, in diagram units.
///
/// Serialized as `[x, y]`, the form used for manual positions and
/// annotation anchors in flow definitions.
///
/// ```
/// # use flowdoc_core::geometry::Point;
/// let start = Point::new(0.0, 10.0);
/// let install = Point::new(-2.0, -1.0);
///
/// assert_eq!(start.midpoint(install), Point::new(-1.0, 4.5));
/// assert_eq!(install.sub_point(start), Point::new(-2.0, -11.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 2]", into = "[f32; 2]")]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }

    /// `false` if either coordinate is NaN or infinite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn add_point(self, other: Point) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    pub fn sub_point(self, other: Point) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    pub fn midpoint(self, other: Point) -> Self {
        self.add_point(other).scale(0.5)
    }

    /// Length of the vector from the origin to this point.
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    pub fn distance(self, other: Point) -> f32 {
        other.sub_point(self).hypot()
    }

    pub fn scale(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// The vector turned a quarter clockwise: `(y, -x)`.
    pub fn perpendicular(self) -> Self {
        Self::new(self.y, -self.x)
    }

    /// Unit vector in the same direction; `None` for a (near) zero vector.
    pub fn normalize(self) -> Option<Self> {
        let length = self.hypot();
        (length >= 1e-6).then(|| self.scale(length.recip()))
    }

    /// The rectangle of `size` centered on this point.
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_center(self, size)
    }
}

impl From<[f32; 2]> for Point {
    fn from([x, y]: [f32; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for [f32; 2] {
    fn from(point: Point) -> Self {
        [point.x, point.y]
    }
}

/// Width and height.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }

    /// Component-wise maximum, i.e. the smallest size containing both.
    pub fn max(self, other: Size) -> Self {
        Self::new(self.width.max(other.width), self.height.max(other.height))
    }

    /// Grow by `amount` on every side.
    pub fn grow(self, amount: f32) -> Self {
        Self::new(self.width + 2.0 * amount, self.height + 2.0 * amount)
    }

    pub fn scale(self, factor: f32) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }
}

/// An axis-aligned rectangle given by its extreme coordinates.
///
/// ```
/// # use flowdoc_core::geometry::{Bounds, Point, Size};
/// let circle = Point::new(0.0, 10.0).to_bounds(Size::new(0.5, 0.5));
/// let box_ = Point::new(0.0, 6.0).to_bounds(Size::new(1.0, 0.5));
///
/// let both = circle.merge(&box_);
/// assert_eq!(both.max_y(), 10.25);
/// assert_eq!(both.min_y(), 5.75);
/// assert_eq!(both.width(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min: Point,
    max: Point,
}

impl Bounds {
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half = Point::new(size.width, size.height).scale(0.5);
        Self {
            min: center.sub_point(half),
            max: center.add_point(half),
        }
    }

    /// A zero-area rectangle at `point`.
    pub fn from_point(point: Point) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    pub fn min_x(self) -> f32 {
        self.min.x
    }

    pub fn min_y(self) -> f32 {
        self.min.y
    }

    pub fn max_x(self) -> f32 {
        self.max.x
    }

    pub fn max_y(self) -> f32 {
        self.max.y
    }

    pub fn center(self) -> Point {
        self.min.midpoint(self.max)
    }

    pub fn width(self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(self) -> f32 {
        self.max.y - self.min.y
    }

    /// Whether both corners have finite coordinates.
    pub fn is_finite(self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// The smallest rectangle covering both.
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min: Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.add_point(b), Point::new(4.0, 6.0));
        assert_eq!(b.sub_point(a), Point::new(2.0, 2.0));
        assert_eq!(a.scale(2.0), Point::new(2.0, 4.0));
    }

    #[test]
    fn test_point_lengths() {
        assert_eq!(Point::new(3.0, 4.0).hypot(), 5.0);
        assert_eq!(Point::new(1.0, 1.0).distance(Point::new(4.0, 5.0)), 5.0);
    }

    #[test]
    fn test_point_perpendicular() {
        assert_eq!(Point::new(2.0, 1.0).perpendicular(), Point::new(1.0, -2.0));
    }

    #[test]
    fn test_point_normalize() {
        assert_eq!(Point::new(0.0, 2.0).normalize(), Some(Point::new(0.0, 1.0)));
        assert!(Point::default().normalize().is_none());
    }

    #[test]
    fn test_point_array_conversion() {
        let point = Point::from([-2.0, -1.0]);
        assert_eq!((point.x(), point.y()), (-2.0, -1.0));
        let array: [f32; 2] = point.into();
        assert_eq!(array, [-2.0, -1.0]);
    }

    #[test]
    fn test_bounds_from_center() {
        let bounds = Point::new(0.0, 10.0).to_bounds(Size::new(0.5, 0.5));
        assert_eq!(bounds.min_x(), -0.25);
        assert_eq!(bounds.max_y(), 10.25);
        assert_eq!(bounds.center(), Point::new(0.0, 10.0));
    }

    #[test]
    fn test_bounds_merge_points() {
        let merged =
            Bounds::from_point(Point::new(1.0, 1.0)).merge(&Bounds::from_point(Point::new(-1.0, 3.0)));
        assert_eq!((merged.width(), merged.height()), (2.0, 2.0));
        assert_eq!(merged.center(), Point::new(0.0, 2.0));
    }

    #[test]
    fn test_bounds_is_finite() {
        assert!(Point::new(1.0, 2.0).to_bounds(Size::new(1.0, 1.0)).is_finite());
        assert!(!Bounds::from_point(Point::new(f32::INFINITY, 0.0)).is_finite());
        assert!(!Bounds::from_point(Point::new(0.0, f32::NAN)).is_finite());
    }

    #[test]
    fn test_size_grow_and_max() {
        assert_eq!(Size::new(10.0, 20.0).grow(2.0), Size::new(14.0, 24.0));
        assert_eq!(
            Size::new(1.0, 5.0).max(Size::new(3.0, 2.0)),
            Size::new(3.0, 5.0)
        );
    }
}
