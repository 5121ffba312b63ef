//! Node shapes.

use log::trace;

use flowdoc_core::{
    color::Color,
    draw::{DrawCommand, StrokeDefinition},
    geometry::Point,
};

use crate::{error::PaletteError, graph::Node, render::Palette};

/// Stroke drawn around every node shape.
fn outline() -> StrokeDefinition {
    StrokeDefinition::solid(Color::new("black").unwrap_or_default(), 2.0)
}

/// Turns a positioned node into a [`DrawCommand::Shape`].
#[derive(Debug)]
pub struct ShapeRenderer<'a> {
    palette: &'a Palette,
}

impl<'a> ShapeRenderer<'a> {
    pub fn new(palette: &'a Palette) -> Self {
        Self { palette }
    }

    /// Emit the shape for `node` centered on `coordinate`.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::TypeNotInPalette`] if the node type has no
    /// palette entry.
    pub fn render(&self, node: &Node, coordinate: Point) -> Result<DrawCommand, PaletteError> {
        let entry = self.palette.get(node.node_type())?;
        let kind = entry.shape();
        trace!(node:% = node.id(), kind:% = kind, x = coordinate.x(), y = coordinate.y(); "Shape rendered");
        Ok(DrawCommand::Shape {
            node: node.id(),
            kind,
            center: coordinate,
            size: kind.size(),
            fill: entry.color(),
            stroke: outline(),
            label: node.label().to_string(),
        })
    }
}
