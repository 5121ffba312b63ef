//! Render stages turning a laid-out graph into draw commands.
//!
//! Every stage returns immutable [`DrawCommand`]s; nothing here touches an
//! output backend. [`DiagramRenderer::render`] runs them in pipeline order
//! and composes the final [`DrawList`]: shapes, connectors, annotations,
//! legend, title.

pub mod annotate;
pub mod edge;
pub mod legend;
mod palette;
pub mod shape;

pub use edge::EdgeRouter;
pub use palette::{Palette, PaletteEntry};
pub use shape::ShapeRenderer;

use log::{debug, info};

use flowdoc_core::{
    draw::{DrawCommand, DrawList, StrokeDefinition},
    geometry::Point,
};

use crate::{
    config::StyleConfig,
    definition::AnnotationSpec,
    error::{FlowError, LayoutError},
    graph::Graph,
    layout::LayoutMap,
};

/// Gap between the diagram and the legend, in diagram units.
const LEGEND_GAP: f32 = 0.6;
/// Gap between the diagram top and the title baseline, in diagram units.
const TITLE_GAP: f32 = 0.5;

/// Runs all render stages for one diagram.
#[derive(Debug)]
pub struct DiagramRenderer<'a> {
    palette: &'a Palette,
    style: &'a StyleConfig,
}

impl<'a> DiagramRenderer<'a> {
    pub fn new(palette: &'a Palette, style: &'a StyleConfig) -> Self {
        Self { palette, style }
    }

    /// Render a laid-out graph with its annotations and optional title.
    ///
    /// The first failing stage aborts the render; no partial list is
    /// returned.
    pub fn render(
        &self,
        graph: &Graph,
        layout: &LayoutMap,
        annotations: &[AnnotationSpec],
        title: Option<&str>,
    ) -> Result<DrawList, FlowError> {
        info!(nodes = graph.node_count(); "Rendering shapes");
        let shape_renderer = ShapeRenderer::new(self.palette);
        let shapes = graph
            .nodes()
            .map(|node| -> Result<DrawCommand, FlowError> {
                let coordinate = layout
                    .get(node.id())
                    .ok_or(LayoutError::NodeWithoutCoordinate(node.id()))?;
                Ok(shape_renderer.render(node, coordinate)?)
            })
            .collect::<Result<DrawList, FlowError>>()?;

        info!(edges = graph.edge_count(); "Routing connectors");
        let stroke = StrokeDefinition::solid(
            self.style.edge_color().map_err(FlowError::Config)?,
            self.style.edge_width(),
        )
        .with_style(self.style.edge_style());
        let router = EdgeRouter::new(self.style.curvature(), stroke).with_shapes(
            graph.nodes().filter_map(|node| {
                self.palette
                    .get(node.node_type())
                    .ok()
                    .map(|entry| (node.id(), entry.shape()))
            }),
        );
        let connectors = graph
            .edges()
            .iter()
            .map(|edge| router.render(edge, layout))
            .collect::<Result<DrawList, _>>()?;

        let annotations = annotate::render_all(annotations);

        let body = DrawList::compose([shapes, connectors, annotations]);
        let bounds = body.bounds(self.style.scale());

        let entries = legend::build(self.palette, &graph.used_types());
        debug!(entries = entries.len(); "Legend built");
        let legend_anchor = bounds
            .map(|b| Point::new(b.max_x() + LEGEND_GAP, b.max_y()))
            .unwrap_or_default();
        let legend = legend::render(&entries, legend_anchor);

        let mut title_list = DrawList::new();
        if let Some(title) = title {
            let position = bounds
                .map(|b| Point::new(b.center().x(), b.max_y() + TITLE_GAP))
                .unwrap_or_default();
            title_list.push(annotate::render_title(title, position));
        }

        let draw_list = DrawList::compose([body, legend, title_list]);
        debug!(commands = draw_list.len(); "Draw list composed");
        Ok(draw_list)
    }
}

/// Number of connector commands in a list.
pub fn connector_count(draw_list: &DrawList) -> usize {
    draw_list
        .commands()
        .iter()
        .filter(|command| matches!(command, DrawCommand::Connector { .. }))
        .count()
}

#[cfg(test)]
mod tests {
    use flowdoc_core::{identifier::Id, node_type::NodeType};

    use super::*;
    use crate::definition::{EdgeSpec, NodeSpec};

    fn layout_of(points: &[(&str, f32, f32)]) -> LayoutMap {
        points
            .iter()
            .map(|(id, x, y)| (Id::new(id), Point::new(*x, *y)))
            .collect()
    }

    fn kinds(list: &DrawList) -> Vec<&'static str> {
        list.commands()
            .iter()
            .map(|command| match command {
                DrawCommand::Shape { .. } => "shape",
                DrawCommand::Connector { .. } => "connector",
                DrawCommand::Text { .. } => "text",
                DrawCommand::LegendSwatch { .. } => "legend",
            })
            .collect()
    }

    #[test]
    fn test_composite_order() {
        let graph = Graph::build(
            [
                NodeSpec::new("a", "A", NodeType::Start),
                NodeSpec::new("b", "B", NodeType::End),
            ],
            [EdgeSpec::new("a", "b")],
        )
        .unwrap();
        let layout = layout_of(&[("a", 0.0, 1.0), ("b", 0.0, 0.0)]);
        let palette = Palette::default();
        let style = StyleConfig::default();

        let list = DiagramRenderer::new(&palette, &style)
            .render(
                &graph,
                &layout,
                &[AnnotationSpec::new("note", Point::new(1.0, 0.5))],
                Some("Title"),
            )
            .unwrap();
        assert_eq!(
            kinds(&list),
            ["shape", "shape", "connector", "text", "legend", "legend", "text"]
        );
    }

    #[test]
    fn test_empty_graph_renders_empty_diagram() {
        let graph = Graph::build([], []).unwrap();
        let palette = Palette::default();
        let style = StyleConfig::default();

        let list = DiagramRenderer::new(&palette, &style)
            .render(&graph, &LayoutMap::default(), &[], None)
            .unwrap();
        assert!(list.is_empty());
        assert_eq!(connector_count(&list), 0);
    }

    #[test]
    fn test_isolated_node_has_no_connector() {
        let graph = Graph::build([NodeSpec::new("solo", "Solo", NodeType::Process)], []).unwrap();
        let palette = Palette::default();
        let style = StyleConfig::default();

        let list = DiagramRenderer::new(&palette, &style)
            .render(&graph, &layout_of(&[("solo", 0.0, 0.0)]), &[], None)
            .unwrap();
        assert_eq!(kinds(&list), ["shape", "legend"]);
    }

    #[test]
    fn test_palette_error_aborts_render() {
        let graph = Graph::build([NodeSpec::new("a", "A", NodeType::Decision)], []).unwrap();
        let palette = Palette::empty();
        let style = StyleConfig::default();

        let err = DiagramRenderer::new(&palette, &style)
            .render(&graph, &layout_of(&[("a", 0.0, 0.0)]), &[], None)
            .unwrap_err();
        assert!(matches!(err, FlowError::Palette(_)));
    }
}
