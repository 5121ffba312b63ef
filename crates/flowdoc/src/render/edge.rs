//! Curved, arrow-terminated connectors between nodes.

use std::collections::HashMap;

use log::trace;

use flowdoc_core::{
    draw::{ArrowHead, Connector, DrawCommand, ShapeKind, StrokeDefinition},
    geometry::Point,
    identifier::Id,
};

use crate::{error::RenderError, graph::Edge, layout::LayoutMap};

/// Emits one [`DrawCommand::Connector`] per edge.
///
/// The curvature bias is fixed: connectors converging on the same node do
/// not spread out, so dense merge points rely on manual spacing.
#[derive(Debug, Clone)]
pub struct EdgeRouter {
    curvature: f32,
    stroke: StrokeDefinition,
    shapes: HashMap<Id, ShapeKind>,
}

impl EdgeRouter {
    pub fn new(curvature: f32, stroke: StrokeDefinition) -> Self {
        Self {
            curvature,
            stroke,
            shapes: HashMap::new(),
        }
    }

    /// Register node shapes so connector ends stop at shape boundaries
    /// instead of node centers.
    pub fn with_shapes(mut self, shapes: impl IntoIterator<Item = (Id, ShapeKind)>) -> Self {
        self.shapes.extend(shapes);
        self
    }

    /// # Errors
    ///
    /// Returns [`RenderError::MissingEndpointCoordinate`] if either endpoint
    /// has no coordinate in `layout`.
    pub fn render(&self, edge: &Edge, layout: &LayoutMap) -> Result<DrawCommand, RenderError> {
        let source = layout
            .get(edge.from())
            .ok_or(RenderError::MissingEndpointCoordinate(edge.from()))?;
        let target = layout
            .get(edge.to())
            .ok_or(RenderError::MissingEndpointCoordinate(edge.to()))?;

        let curve = Connector::curved(source, target, self.curvature);
        let start = self.clip(edge.from(), source, curve.control());
        let end = self.clip(edge.to(), target, curve.control());
        let path = curve.with_endpoints(start, end);

        trace!(from:% = edge.from(), to:% = edge.to(); "Connector routed");

        Ok(DrawCommand::Connector {
            from: edge.from(),
            to: edge.to(),
            path,
            head: ArrowHead::for_connector(&path),
            stroke: self.stroke.clone(),
        })
    }

    fn clip(&self, node: Id, center: Point, toward: Point) -> Point {
        match self.shapes.get(&node) {
            Some(kind) => kind.find_intersection(center, toward, kind.size()),
            None => center,
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use flowdoc_core::node_type::NodeType;

    use super::*;
    use crate::{
        definition::{EdgeSpec, NodeSpec},
        graph::Graph,
    };

    fn pair() -> Graph {
        Graph::build(
            [
                NodeSpec::new("a", "A", NodeType::Start),
                NodeSpec::new("b", "B", NodeType::End),
            ],
            [EdgeSpec::new("a", "b")],
        )
        .unwrap()
    }

    fn layout() -> LayoutMap {
        [
            (Id::new("a"), Point::new(0.0, 1.0)),
            (Id::new("b"), Point::new(0.0, 0.0)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_render_unclipped_uses_centers() {
        let graph = pair();
        let router = EdgeRouter::new(0.1, StrokeDefinition::default());
        let command = router.render(&graph.edges()[0], &layout()).unwrap();

        let DrawCommand::Connector { path, head, .. } = command else {
            panic!("expected connector");
        };
        assert_eq!(path.start(), Point::new(0.0, 1.0));
        assert_eq!(path.end(), Point::new(0.0, 0.0));
        assert_approx_eq!(f32, path.control().x(), -0.1);
        assert_approx_eq!(f32, path.control().y(), 0.5);
        assert_eq!(head.tip(), path.end());
    }

    #[test]
    fn test_render_clips_to_shape_boundaries() {
        let graph = pair();
        let router = EdgeRouter::new(0.1, StrokeDefinition::default()).with_shapes([
            (Id::new("a"), ShapeKind::Circle),
            (Id::new("b"), ShapeKind::Circle),
        ]);
        let command = router.render(&graph.edges()[0], &layout()).unwrap();

        let DrawCommand::Connector { path, .. } = command else {
            panic!("expected connector");
        };
        let radius = ShapeKind::Circle.size().width() / 2.0;
        assert_approx_eq!(
            f32,
            path.start().distance(Point::new(0.0, 1.0)),
            radius,
            epsilon = 1e-4
        );
        assert_approx_eq!(
            f32,
            path.end().distance(Point::new(0.0, 0.0)),
            radius,
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_missing_endpoint_coordinate() {
        let graph = pair();
        let partial: LayoutMap = [(Id::new("a"), Point::new(0.0, 1.0))].into_iter().collect();
        let err = EdgeRouter::new(0.1, StrokeDefinition::default())
            .render(&graph.edges()[0], &partial)
            .unwrap_err();
        assert_eq!(err, RenderError::MissingEndpointCoordinate(Id::new("b")));
    }
}
