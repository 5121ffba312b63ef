//! Curved connector geometry and arrowheads.
//!
//! A connector is a quadratic Bézier curve whose control point is pushed
//! off the chord by a fixed fraction of the chord length. The bias is
//! constant: it does not react to other connectors passing nearby.

use crate::geometry::Point;

/// Default curvature bias of connectors.
pub const DEFAULT_CURVATURE: f32 = 0.1;
/// Arrowhead length in diagram units.
pub const ARROW_HEAD_LENGTH: f32 = 0.12;
/// Arrowhead base width in diagram units.
pub const ARROW_HEAD_WIDTH: f32 = 0.08;

/// A quadratic curve from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connector {
    start: Point,
    control: Point,
    end: Point,
}

impl Connector {
    /// Build a curve between two points bent by `curvature`.
    ///
    /// The control point is `midpoint + curvature * (dy, -dx)` where
    /// `(dx, dy) = end - start`, so a positive curvature bends the curve
    /// to the right of the direction of travel.
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowdoc_core::draw::Connector;
    /// # use flowdoc_core::geometry::Point;
    /// let c = Connector::curved(Point::new(0.0, 1.0), Point::new(0.0, 0.0), 0.1);
    /// assert_eq!(c.control(), Point::new(-0.1, 0.5));
    /// ```
    pub fn curved(start: Point, end: Point, curvature: f32) -> Self {
        let chord = end.sub_point(start);
        let control = start
            .midpoint(end)
            .add_point(chord.perpendicular().scale(curvature));
        Self {
            start,
            control,
            end,
        }
    }

    /// Returns the same curve with its endpoints moved, keeping the control point.
    pub fn with_endpoints(self, start: Point, end: Point) -> Self {
        Self {
            start,
            control: self.control,
            end,
        }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn control(&self) -> Point {
        self.control
    }

    pub fn end(&self) -> Point {
        self.end
    }

    /// Evaluate the curve at parameter `t` in `[0, 1]`.
    pub fn point_at(&self, t: f32) -> Point {
        let u = 1.0 - t;
        self.start
            .scale(u * u)
            .add_point(self.control.scale(2.0 * u * t))
            .add_point(self.end.scale(t * t))
    }

    /// Direction of travel where the curve arrives at `end`.
    pub fn end_direction(&self) -> Point {
        let tangent = self.end.sub_point(self.control);
        tangent
            .normalize()
            .or_else(|| self.end.sub_point(self.start).normalize())
            .unwrap_or(Point::new(0.0, -1.0))
    }

    /// SVG path data, after mapping every point through `transform`.
    pub fn to_path_data(&self, transform: impl Fn(Point) -> Point) -> String {
        let start = transform(self.start);
        let control = transform(self.control);
        let end = transform(self.end);
        format!(
            "M {} {} Q {} {}, {} {}",
            start.x(),
            start.y(),
            control.x(),
            control.y(),
            end.x(),
            end.y()
        )
    }
}

/// A filled triangle marking the target end of a connector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowHead {
    tip: Point,
    left: Point,
    right: Point,
}

impl ArrowHead {
    /// Build an arrowhead whose tip sits at the end of `connector`.
    pub fn for_connector(connector: &Connector) -> Self {
        Self::new(
            connector.end(),
            connector.end_direction(),
            ARROW_HEAD_LENGTH,
            ARROW_HEAD_WIDTH,
        )
    }

    /// Build an arrowhead pointing along the unit vector `direction`.
    pub fn new(tip: Point, direction: Point, length: f32, width: f32) -> Self {
        let base = tip.sub_point(direction.scale(length));
        let half_base = direction.perpendicular().scale(width / 2.0);
        Self {
            tip,
            left: base.sub_point(half_base),
            right: base.add_point(half_base),
        }
    }

    pub fn tip(&self) -> Point {
        self.tip
    }

    /// The three corners, tip first.
    pub fn points(&self) -> [Point; 3] {
        [self.tip, self.left, self.right]
    }
}
