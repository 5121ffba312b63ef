//! Draw commands: the output of rendering and the input of every exporter.
//!
//! Commands are positioned in diagram units with the y axis pointing up.
//! A [`Projection`] maps them onto an output canvas in pixels.

use crate::{
    color::Color,
    draw::{ArrowHead, Connector, LayeredOutput, RenderLayer, ShapeKind, StrokeDefinition, TextRole},
    geometry::{Bounds, Point, Size},
    identifier::Id,
    node_type::NodeType,
};

/// Side length of a legend swatch in diagram units.
pub const LEGEND_SWATCH_SIZE: f32 = 0.2;
/// Gap between a legend swatch and its label in diagram units.
pub const LEGEND_LABEL_GAP: f32 = 0.15;

/// One drawable primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// A node shape with its label centered on it.
    Shape {
        node: Id,
        kind: ShapeKind,
        center: Point,
        size: Size,
        fill: Color,
        stroke: StrokeDefinition,
        label: String,
    },
    /// A directed curve between two nodes, ending in an arrowhead.
    Connector {
        from: Id,
        to: Id,
        path: Connector,
        head: ArrowHead,
        stroke: StrokeDefinition,
    },
    /// Free text.
    Text {
        text: String,
        position: Point,
        role: TextRole,
    },
    /// A legend row: a small shape followed by its label.
    LegendSwatch {
        node_type: NodeType,
        kind: ShapeKind,
        color: Color,
        label: String,
        position: Point,
    },
}

impl DrawCommand {
    /// Extent of the command in diagram units.
    ///
    /// Text is measured in pixels, so `px_per_unit` is needed to express
    /// it in diagram units.
    pub fn bounds(&self, px_per_unit: f32) -> Bounds {
        match self {
            Self::Shape { center, size, .. } => center.to_bounds(*size),
            Self::Connector { path, head, .. } => head.points().iter().fold(
                Bounds::from_point(path.start())
                    .merge(&Bounds::from_point(path.control()))
                    .merge(&Bounds::from_point(path.end())),
                |acc, p| acc.merge(&Bounds::from_point(*p)),
            ),
            Self::Text {
                text,
                position,
                role,
            } => {
                let size = role.estimate_size(text).scale(1.0 / px_per_unit);
                position.to_bounds(size)
            }
            Self::LegendSwatch {
                label, position, ..
            } => {
                let swatch = position.to_bounds(Size::new(LEGEND_SWATCH_SIZE, LEGEND_SWATCH_SIZE));
                let text_size = TextRole::Legend
                    .estimate_size(label)
                    .scale(1.0 / px_per_unit);
                let text_start = legend_label_anchor(*position);
                let text_bounds = Point::new(
                    text_start.x() + text_size.width() / 2.0,
                    text_start.y(),
                )
                .to_bounds(text_size);
                swatch.merge(&text_bounds)
            }
        }
    }

    /// Render the command to SVG nodes through `projection`.
    pub fn render_to_layers(&self, projection: &Projection) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        match self {
            Self::Shape {
                kind,
                center,
                size,
                fill,
                stroke,
                label,
                ..
            } => {
                let position = projection.point(*center);
                let size_px = size.scale(projection.scale());
                let corner = projection.length(crate::draw::ROUNDED_RECT_PAD);
                let node = kind.render_to_svg(position, size_px, corner, *fill, stroke);
                output.add_to_layer(RenderLayer::Shape, node);
                output.merge(TextRole::NodeLabel.render_to_layers(label, position));
            }
            Self::Connector {
                path, head, stroke, ..
            } => {
                let data = path.to_path_data(|p| projection.point(p));
                let curve = svg::node::element::Path::new()
                    .set("d", data)
                    .set("fill", "none");
                output.add_to_layer(
                    RenderLayer::Connector,
                    Box::new(crate::apply_stroke!(curve, stroke)),
                );

                let points = head
                    .points()
                    .iter()
                    .map(|p| {
                        let p = projection.point(*p);
                        format!("{},{}", p.x(), p.y())
                    })
                    .collect::<Vec<_>>()
                    .join(" ");
                let color = stroke.color();
                let arrow = svg::node::element::Polygon::new()
                    .set("points", points)
                    .set("fill", color.to_string())
                    .set("fill-opacity", color.alpha());
                output.add_to_layer(RenderLayer::Connector, Box::new(arrow));
            }
            Self::Text {
                text,
                position,
                role,
            } => {
                output.merge(role.render_to_layers(text, projection.point(*position)));
            }
            Self::LegendSwatch {
                kind,
                color,
                label,
                position,
                ..
            } => {
                let size_px = Size::new(LEGEND_SWATCH_SIZE, LEGEND_SWATCH_SIZE)
                    .scale(projection.scale());
                let swatch = kind.render_to_svg(
                    projection.point(*position),
                    size_px,
                    projection.length(ROUNDED_SWATCH_CORNER),
                    *color,
                    &StrokeDefinition::solid(*color, 1.0),
                );
                output.add_to_layer(RenderLayer::Legend, swatch);
                output.merge(
                    TextRole::Legend
                        .render_to_layers(label, projection.point(legend_label_anchor(*position))),
                );
            }
        }
        output
    }
}

const ROUNDED_SWATCH_CORNER: f32 = 0.03;

fn legend_label_anchor(swatch_center: Point) -> Point {
    Point::new(
        swatch_center.x() + LEGEND_SWATCH_SIZE / 2.0 + LEGEND_LABEL_GAP,
        swatch_center.y(),
    )
}

/// Maps diagram coordinates (y up) onto canvas pixels (y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    scale: f32,
    margin: f32,
    bounds: Bounds,
}

impl Projection {
    /// `bounds` is the diagram extent to fit; it lands `margin` pixels
    /// from the canvas edge.
    pub fn new(bounds: Bounds, scale: f32, margin: f32) -> Self {
        Self {
            scale,
            margin,
            bounds,
        }
    }

    /// Pixels per diagram unit.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn point(&self, p: Point) -> Point {
        Point::new(
            (p.x() - self.bounds.min_x()) * self.scale + self.margin,
            (self.bounds.max_y() - p.y()) * self.scale + self.margin,
        )
    }

    pub fn length(&self, units: f32) -> f32 {
        units * self.scale
    }

    /// Canvas size in pixels, margins included.
    pub fn canvas_size(&self) -> Size {
        Size::new(
            self.bounds.width() * self.scale + 2.0 * self.margin,
            self.bounds.height() * self.scale + 2.0 * self.margin,
        )
    }
}

/// An ordered list of draw commands.
///
/// Order is paint order for exporters that do not layer their output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Append all commands of `other` after those already present.
    pub fn extend(&mut self, other: DrawList) {
        self.commands.extend(other.commands);
    }

    /// Concatenate lists in order.
    pub fn compose(lists: impl IntoIterator<Item = DrawList>) -> Self {
        let mut composed = Self::new();
        for list in lists {
            composed.extend(list);
        }
        composed
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Union of all command bounds, or `None` for an empty list.
    pub fn bounds(&self, px_per_unit: f32) -> Option<Bounds> {
        self.commands
            .iter()
            .map(|command| command.bounds(px_per_unit))
            .reduce(|acc, b| acc.merge(&b))
    }
}

impl FromIterator<DrawCommand> for DrawList {
    fn from_iter<T: IntoIterator<Item = DrawCommand>>(iter: T) -> Self {
        Self {
            commands: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a DrawList {
    type Item = &'a DrawCommand;
    type IntoIter = std::slice::Iter<'a, DrawCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}
