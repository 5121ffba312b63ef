//! In-memory SVG output.

use log::{debug, info};
use svg::{Document, node::element as svg_element};

use flowdoc_core::{
    color::Color,
    draw::{DrawList, LayeredOutput, Projection, RenderLayer},
};

use crate::export::{self, Exporter};

/// Renders a draw list into an SVG document string.
///
/// Diagram units are scaled to pixels and the y axis is flipped so that
/// larger y values end up higher on the canvas.
#[derive(Debug)]
pub struct SvgExporter {
    scale: f32,
    margin: f32,
    background: Option<Color>,
    output: Option<String>,
}

impl SvgExporter {
    /// `scale` is in pixels per diagram unit, `margin` in pixels.
    pub fn new(scale: f32, margin: f32) -> Self {
        Self {
            scale,
            margin,
            background: None,
            output: None,
        }
    }

    pub fn with_background(mut self, background: Option<Color>) -> Self {
        self.background = background;
        self
    }

    /// Consume the exporter and return the rendered document.
    pub fn finish(self) -> Result<String, export::Error> {
        self.output
            .ok_or_else(|| export::Error::Render("no draw list was exported".to_string()))
    }
}

impl Exporter for SvgExporter {
    fn export(&mut self, draw_list: &DrawList) -> Result<(), export::Error> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(export::Error::Render(format!(
                "scale must be a positive number, got {}",
                self.scale
            )));
        }

        if draw_list
            .commands()
            .iter()
            .any(|command| !command.bounds(self.scale).is_finite())
        {
            return Err(export::Error::Render(
                "draw list contains a command at a non-finite position".to_string(),
            ));
        }

        let bounds = draw_list.bounds(self.scale).unwrap_or_default();
        let projection = Projection::new(bounds, self.scale, self.margin);
        let canvas = projection.canvas_size();
        if !(canvas.width().is_finite() && canvas.height().is_finite()) {
            return Err(export::Error::Render(
                "diagram extent overflows the pixel canvas".to_string(),
            ));
        }
        debug!(width = canvas.width(), height = canvas.height(); "SVG canvas sized");

        let mut layers = LayeredOutput::new();
        if let Some(background) = self.background {
            let rect = svg_element::Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", canvas.width())
                .set("height", canvas.height())
                .set("fill", background.to_string())
                .set("fill-opacity", background.alpha());
            layers.add_to_layer(RenderLayer::Background, Box::new(rect));
        }
        for command in draw_list {
            layers.merge(command.render_to_layers(&projection));
        }

        let document = layers.render().into_iter().fold(
            Document::new()
                .set("viewBox", (0.0, 0.0, canvas.width(), canvas.height()))
                .set("width", canvas.width())
                .set("height", canvas.height()),
            |document, group| document.add(group),
        );

        self.output = Some(document.to_string());
        info!(commands = draw_list.len(); "SVG exported");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use flowdoc_core::{
        draw::{DrawCommand, ShapeKind, StrokeDefinition, TextRole},
        geometry::Point,
        identifier::Id,
    };

    use super::*;

    fn sample() -> DrawList {
        [
            DrawCommand::Shape {
                node: Id::new("start"),
                kind: ShapeKind::Circle,
                center: Point::new(0.0, 1.0),
                size: ShapeKind::Circle.size(),
                fill: Color::new("#4CAF50").unwrap(),
                stroke: StrokeDefinition::default(),
                label: "Start CLI".to_string(),
            },
            DrawCommand::Text {
                text: "if initializeGit".to_string(),
                position: Point::new(-1.0, 0.0),
                role: TextRole::Annotation,
            },
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_export_produces_document() {
        let mut exporter = SvgExporter::new(80.0, 40.0);
        exporter.export(&sample()).unwrap();
        let svg = exporter.finish().unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("</svg>"));
        assert!(svg.contains("Start CLI"));
        assert!(svg.contains("if initializeGit"));
        assert!(svg.contains("data-layer=\"shape\""));
    }

    #[test]
    fn test_background_layer() {
        let mut exporter =
            SvgExporter::new(80.0, 40.0).with_background(Some(Color::new("white").unwrap()));
        exporter.export(&sample()).unwrap();
        assert!(exporter.finish().unwrap().contains("data-layer=\"background\""));
    }

    #[test]
    fn test_empty_list_exports_empty_canvas() {
        let mut exporter = SvgExporter::new(80.0, 40.0);
        exporter.export(&DrawList::new()).unwrap();
        let svg = exporter.finish().unwrap();
        assert!(svg.contains("width=\"80\""));
        assert!(!svg.contains("<g"));
    }

    #[test]
    fn test_finish_without_export_fails() {
        assert!(SvgExporter::new(80.0, 40.0).finish().is_err());
    }

    #[test]
    fn test_non_finite_position_rejected() {
        let mut list = sample();
        list.push(DrawCommand::Text {
            text: "lost".to_string(),
            position: Point::new(f32::INFINITY, 0.0),
            role: TextRole::Annotation,
        });

        let mut exporter = SvgExporter::new(80.0, 40.0);
        let err = exporter.export(&list).unwrap_err();
        assert!(err.to_string().contains("non-finite"));
        assert!(exporter.finish().is_err());
    }

    #[test]
    fn test_invalid_scale_rejected() {
        let mut exporter = SvgExporter::new(0.0, 40.0);
        assert!(exporter.export(&sample()).is_err());
    }
}
