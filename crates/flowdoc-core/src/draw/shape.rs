//! Shape kinds and their fixed geometry.
//!
//! Every node is drawn as one of three primitives. Sizes are fixed
//! constants in diagram units; they are not derived from the label.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use svg::{self, node::element as svg_element};

use crate::{
    color::Color,
    draw::StrokeDefinition,
    geometry::{Point, Size},
};

/// Radius of start/end circles.
pub const CIRCLE_RADIUS: f32 = 0.25;
/// Distance from a diamond's center to each of its four vertices.
pub const DIAMOND_RADIUS: f32 = 0.3;
/// Width of process/action boxes.
pub const ROUNDED_RECT_WIDTH: f32 = 0.8;
/// Height of process/action boxes.
pub const ROUNDED_RECT_HEIGHT: f32 = 0.3;
/// Corner rounding of process/action boxes.
pub const ROUNDED_RECT_PAD: f32 = 0.02;

/// Fill opacity applied to every node shape.
pub const SHAPE_FILL_ALPHA: f32 = 0.8;

/// The visual primitive a node type maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeKind {
    Circle,
    /// A square rotated 45 degrees.
    Diamond,
    RoundedRectangle,
}

impl ShapeKind {
    /// Returns the bounding-box size of this shape in diagram units.
    pub fn size(self) -> Size {
        match self {
            Self::Circle => Size::new(CIRCLE_RADIUS * 2.0, CIRCLE_RADIUS * 2.0),
            Self::Diamond => Size::new(DIAMOND_RADIUS * 2.0, DIAMOND_RADIUS * 2.0),
            Self::RoundedRectangle => Size::new(
                ROUNDED_RECT_WIDTH + ROUNDED_RECT_PAD * 2.0,
                ROUNDED_RECT_HEIGHT + ROUNDED_RECT_PAD * 2.0,
            ),
        }
    }

    /// Find the point where a ray from `center` towards `toward` leaves
    /// the outline of this shape, given the shape's bounding `size`.
    ///
    /// Returns `toward` itself when the two points coincide or the shape
    /// is degenerate.
    pub fn find_intersection(self, center: Point, toward: Point, size: Size) -> Point {
        let half_width = size.width() / 2.0;
        let half_height = size.height() / 2.0;
        let Some(direction) = toward.sub_point(center).normalize() else {
            return toward;
        };
        if half_width <= 0.0 || half_height <= 0.0 {
            return toward;
        }

        let dx = direction.x().abs();
        let dy = direction.y().abs();
        let t = match self {
            // Ellipse inscribed in the bounding box
            Self::Circle => {
                (half_width * half_height) / (half_height * dx).hypot(half_width * dy)
            }
            // |x|/hw + |y|/hh = 1
            Self::Diamond => 1.0 / (dx / half_width + dy / half_height),
            Self::RoundedRectangle => {
                let t_x = if dx > 0.0 { half_width / dx } else { f32::MAX };
                let t_y = if dy > 0.0 { half_height / dy } else { f32::MAX };
                t_x.min(t_y)
            }
        };

        if !t.is_finite() {
            return toward;
        }
        center.add_point(direction.scale(t))
    }

    /// Renders this shape to an SVG node element.
    ///
    /// `position` is the center and `size` the bounding box, both already in
    /// output pixels; `corner` is the rectangle rounding radius in pixels.
    pub fn render_to_svg(
        self,
        position: Point,
        size: Size,
        corner: f32,
        fill: Color,
        stroke: &StrokeDefinition,
    ) -> Box<dyn svg::Node> {
        let bounds = position.to_bounds(size);
        match self {
            Self::Circle => {
                let circle = svg_element::Ellipse::new()
                    .set("cx", position.x())
                    .set("cy", position.y())
                    .set("rx", size.width() / 2.0)
                    .set("ry", size.height() / 2.0)
                    .set("fill", fill.to_string())
                    .set("fill-opacity", fill.alpha() * SHAPE_FILL_ALPHA);
                Box::new(crate::apply_stroke!(circle, stroke))
            }
            Self::Diamond => {
                let points = format!(
                    "{},{} {},{} {},{} {},{}",
                    position.x(),
                    bounds.min_y(),
                    bounds.max_x(),
                    position.y(),
                    position.x(),
                    bounds.max_y(),
                    bounds.min_x(),
                    position.y()
                );
                let diamond = svg_element::Polygon::new()
                    .set("points", points)
                    .set("fill", fill.to_string())
                    .set("fill-opacity", fill.alpha() * SHAPE_FILL_ALPHA);
                Box::new(crate::apply_stroke!(diamond, stroke))
            }
            Self::RoundedRectangle => {
                let rect = svg_element::Rectangle::new()
                    .set("x", bounds.min_x())
                    .set("y", bounds.min_y())
                    .set("width", size.width())
                    .set("height", size.height())
                    .set("rx", corner)
                    .set("fill", fill.to_string())
                    .set("fill-opacity", fill.alpha() * SHAPE_FILL_ALPHA);
                Box::new(crate::apply_stroke!(rect, stroke))
            }
        }
    }

    /// Returns the kebab-case name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Diamond => "diamond",
            Self::RoundedRectangle => "rounded-rectangle",
        }
    }
}

impl FromStr for ShapeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "circle" => Ok(Self::Circle),
            "diamond" => Ok(Self::Diamond),
            "rounded-rectangle" => Ok(Self::RoundedRectangle),
            _ => Err(format!(
                "invalid shape `{s}`, valid values: circle, diamond, rounded-rectangle"
            )),
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
