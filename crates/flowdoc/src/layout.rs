//! Coordinate assignment.
//!
//! Two strategies are composed in priority order: a caller-supplied manual
//! table wins, and the force-directed simulation in [`force`] places every
//! node the table leaves out. What happens to such gaps is decided by the
//! configured [`GapPolicy`].

mod force;
mod manual;

use indexmap::IndexMap;
use log::{debug, info, trace};

use flowdoc_core::{geometry::Point, identifier::Id};

use crate::{
    config::{GapPolicy, LayoutConfig},
    error::LayoutError,
    graph::Graph,
};

/// A coordinate for every node of a graph, in diagram units (y up).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutMap {
    positions: IndexMap<Id, Point>,
}

impl LayoutMap {
    pub fn get(&self, id: Id) -> Option<Point> {
        self.positions.get(&id).copied()
    }

    pub fn contains(&self, id: Id) -> bool {
        self.positions.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Coordinates in node declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Id, Point)> + '_ {
        self.positions.iter().map(|(id, point)| (*id, *point))
    }
}

impl FromIterator<(Id, Point)> for LayoutMap {
    fn from_iter<T: IntoIterator<Item = (Id, Point)>>(iter: T) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}

/// Assigns coordinates to graph nodes.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    gap_policy: GapPolicy,
    force: force::Engine,
}

impl LayoutEngine {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            gap_policy: config.gap_policy(),
            force: force::Engine::new(config.force()),
        }
    }

    /// Compute a layout covering every node of `graph`.
    ///
    /// `manual` is the optional override table. With no table every node is
    /// placed automatically. With a table, nodes it misses are either
    /// simulated around the pinned ones ([`GapPolicy::Fill`]) or rejected
    /// ([`GapPolicy::Strict`]).
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::NodeWithoutCoordinate`] for the first node
    /// left without a coordinate.
    pub fn layout(
        &self,
        graph: &Graph,
        manual: Option<&IndexMap<Id, Point>>,
    ) -> Result<LayoutMap, LayoutError> {
        let pinned = manual
            .map(|table| manual::resolve(graph, table))
            .unwrap_or_default();
        let missing: Vec<Id> = graph
            .nodes()
            .map(|node| node.id())
            .filter(|id| !pinned.contains_key(id))
            .collect();

        info!(
            nodes = graph.node_count(),
            pinned = pinned.len(),
            missing = missing.len(),
            policy:? = self.gap_policy;
            "Computing layout"
        );

        if manual.is_some() && self.gap_policy == GapPolicy::Strict {
            if let Some(&id) = missing.first() {
                return Err(LayoutError::NodeWithoutCoordinate(id));
            }
        }

        let positions = if missing.is_empty() {
            pinned
        } else {
            debug!(missing = missing.len(); "Running force simulation for unplaced nodes");
            self.force.place(graph, &pinned)
        };

        let layout = graph
            .nodes()
            .map(|node| -> Result<(Id, Point), LayoutError> {
                let id = node.id();
                let point = positions
                    .get(&id)
                    .copied()
                    .ok_or(LayoutError::NodeWithoutCoordinate(id))?;
                trace!(node:% = id, x = point.x(), y = point.y(); "Node placed");
                Ok((id, point))
            })
            .collect::<Result<LayoutMap, LayoutError>>()?;

        Ok(layout)
    }
}
