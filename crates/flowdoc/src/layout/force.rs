//! Force-directed placement.
//!
//! A small physics simulation: every pair of nodes repels, every edge acts
//! as a spring, and velocities are damped each step. Nodes are visited in
//! declaration order and the initial jitter comes from a seeded RNG, so the
//! same graph and table always produce the same coordinates.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::debug;
use rand::{Rng, SeedableRng, rngs::StdRng};

use flowdoc_core::{
    draw::{ROUNDED_RECT_HEIGHT, ROUNDED_RECT_PAD, ROUNDED_RECT_WIDTH},
    geometry::{Bounds, Point, Size},
    identifier::Id,
};

use crate::{config::ForceConfig, graph::Graph};

/// Below this separation two nodes are treated as this far apart.
const MIN_SEPARATION: f32 = 0.05;
/// Half-width of the random offset added to initial positions.
const JITTER: f32 = 0.2;

/// Footprint used for every node; the widest shape bounds all others.
fn node_footprint() -> Size {
    Size::new(
        ROUNDED_RECT_WIDTH + ROUNDED_RECT_PAD * 2.0,
        ROUNDED_RECT_HEIGHT + ROUNDED_RECT_PAD * 2.0,
    )
}

#[derive(Debug, Clone)]
pub(super) struct Engine {
    iterations: usize,
    seed: u64,
    spring_constant: f32,
    repulsion_constant: f32,
    damping_factor: f32,
    min_distance: f32,
    max_extent: f32,
}

impl Engine {
    pub(super) fn new(config: &ForceConfig) -> Self {
        Self {
            iterations: config.iterations,
            seed: config.seed,
            spring_constant: config.spring,
            repulsion_constant: config.repulsion,
            damping_factor: config.damping,
            min_distance: config.min_distance,
            max_extent: config.max_extent,
        }
    }

    /// Place every node of `graph`. Nodes in `pinned` keep their
    /// coordinates and only exert forces on the others.
    ///
    /// Without pinned nodes the result is centered on the origin and
    /// scaled down to fit `max_extent`.
    pub(super) fn place(&self, graph: &Graph, pinned: &IndexMap<Id, Point>) -> IndexMap<Id, Point> {
        let ids: Vec<Id> = graph.nodes().map(|node| node.id()).collect();
        if ids.is_empty() {
            return IndexMap::new();
        }

        let index_of: HashMap<Id, usize> =
            ids.iter().enumerate().map(|(idx, id)| (*id, idx)).collect();
        let springs: Vec<(usize, usize)> = graph
            .edges()
            .iter()
            .map(|edge| (index_of[&edge.from()], index_of[&edge.to()]))
            .collect();
        let fixed: Vec<bool> = ids.iter().map(|id| pinned.contains_key(id)).collect();

        let mut positions = self.initialize_positions(graph, &ids, pinned);
        self.run_simulation(&mut positions, &fixed, &springs);

        if pinned.is_empty() {
            self.center_layout(&mut positions);
        }

        debug!(
            nodes = ids.len(),
            pinned = pinned.len(),
            iterations = self.iterations,
            seed = self.seed;
            "Force simulation finished"
        );

        ids.into_iter().zip(positions).collect()
    }

    /// Pinned nodes start at their coordinates. A free node starts at the
    /// centroid of its pinned neighbours if it has any, otherwise on a grid
    /// beside the pinned nodes. Free nodes get a seeded random offset.
    fn initialize_positions(
        &self,
        graph: &Graph,
        ids: &[Id],
        pinned: &IndexMap<Id, Point>,
    ) -> Vec<Point> {
        let mut rng = StdRng::seed_from_u64(self.seed);

        let free_count = ids.len() - pinned.len();
        let grid_size = (free_count as f32).sqrt().ceil().max(1.0) as usize;
        let cell_size = self.min_distance * 1.5;

        let grid_origin = pinned
            .values()
            .map(|point| Bounds::from_point(*point))
            .reduce(|acc, bounds| acc.merge(&bounds))
            .map(|bounds| Point::new(bounds.max_x() + cell_size, bounds.max_y()))
            .unwrap_or_default();

        let mut free_index = 0;
        ids.iter()
            .map(|id| {
                if let Some(point) = pinned.get(id) {
                    return *point;
                }

                let anchors: Vec<Point> = graph
                    .neighbors(*id)
                    .into_iter()
                    .filter_map(|neighbor| pinned.get(&neighbor).copied())
                    .collect();
                let base = if anchors.is_empty() {
                    let row = free_index / grid_size;
                    let col = free_index % grid_size;
                    grid_origin.add_point(Point::new(
                        col as f32 * cell_size,
                        -(row as f32) * cell_size,
                    ))
                } else {
                    anchors
                        .iter()
                        .fold(Point::default(), |acc, point| acc.add_point(*point))
                        .scale(1.0 / anchors.len() as f32)
                };
                free_index += 1;

                let jitter = Point::new(
                    rng.random_range(-JITTER..JITTER),
                    rng.random_range(-JITTER..JITTER),
                );
                base.add_point(jitter)
            })
            .collect()
    }

    fn run_simulation(&self, positions: &mut [Point], fixed: &[bool], springs: &[(usize, usize)]) {
        let footprint = node_footprint();
        // Clearance between two node centers before repulsion turns quadratic
        let min_dist = (footprint.width() + footprint.height()) / 2.0 + self.min_distance;
        let max_speed = self.min_distance;
        let mut velocities = vec![Point::default(); positions.len()];

        for _ in 0..self.iterations {
            let mut forces = vec![Point::default(); positions.len()];

            for i in 0..positions.len() {
                for j in 0..positions.len() {
                    if i == j {
                        continue;
                    }
                    let trans = positions[i].sub_point(positions[j]);
                    let distance = trans.hypot().max(MIN_SEPARATION);

                    let force_factor = if distance < min_dist {
                        self.repulsion_constant * (min_dist / distance).powi(2)
                    } else {
                        self.repulsion_constant / distance
                    };
                    forces[i] = forces[i].add_point(trans.scale(force_factor / distance));
                }
            }

            for &(source, target) in springs {
                // Proportional to distance, so the unit direction cancels out
                let pull = positions[source]
                    .sub_point(positions[target])
                    .scale(self.spring_constant);
                forces[source] = forces[source].sub_point(pull);
                forces[target] = forces[target].add_point(pull);
            }

            for (idx, position) in positions.iter_mut().enumerate() {
                if fixed[idx] {
                    continue;
                }
                let mut velocity = velocities[idx]
                    .add_point(forces[idx])
                    .scale(self.damping_factor);
                let speed = velocity.hypot();
                if speed > max_speed {
                    velocity = velocity.scale(max_speed / speed);
                }
                velocities[idx] = velocity;
                *position = position.add_point(velocity);
            }
        }
    }

    /// Center the layout on the origin and shrink it to `max_extent`.
    fn center_layout(&self, positions: &mut [Point]) {
        let Some(bounds) = positions
            .iter()
            .map(|point| Bounds::from_point(*point))
            .reduce(|acc, bounds| acc.merge(&bounds))
        else {
            return;
        };

        let center = bounds.center();
        for position in positions.iter_mut() {
            *position = position.sub_point(center);
        }

        let largest = bounds.width().max(bounds.height());
        if largest > self.max_extent {
            let scale_factor = self.max_extent / largest;
            for position in positions.iter_mut() {
                *position = position.scale(scale_factor);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use flowdoc_core::node_type::NodeType;
    use proptest::prelude::*;

    use super::*;
    use crate::definition::{EdgeSpec, NodeSpec};

    fn engine() -> Engine {
        Engine::new(&ForceConfig::default())
    }

    fn graph_from(node_count: usize, edges: &[(usize, usize)]) -> Graph {
        let names: Vec<String> = (0..node_count).map(|idx| format!("n{idx}")).collect();
        Graph::build(
            names
                .iter()
                .map(|name| NodeSpec::new(name, name, NodeType::Process)),
            edges
                .iter()
                .filter(|(from, to)| from != to)
                .map(|(from, to)| EdgeSpec::new(&names[*from], &names[*to])),
        )
        .unwrap()
    }

    #[test]
    fn test_same_seed_same_layout() {
        let graph = graph_from(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (1, 4)]);
        let first = engine().place(&graph, &IndexMap::new());
        let second = engine().place(&graph, &IndexMap::new());
        assert_eq!(first, second);
    }

    #[test]
    fn test_different_seed_different_layout() {
        let graph = graph_from(4, &[(0, 1), (1, 2), (2, 3)]);
        let other = Engine::new(&ForceConfig {
            seed: 7,
            ..ForceConfig::default()
        });
        assert_ne!(
            engine().place(&graph, &IndexMap::new()),
            other.place(&graph, &IndexMap::new())
        );
    }

    #[test]
    fn test_unpinned_layout_is_centered_and_bounded() {
        let graph = graph_from(9, &[(0, 1), (1, 2), (3, 4), (5, 6), (7, 8)]);
        let config = ForceConfig::default();
        let positions = engine().place(&graph, &IndexMap::new());

        let bounds = positions
            .values()
            .map(|p| Bounds::from_point(*p))
            .reduce(|acc, b| acc.merge(&b))
            .unwrap();
        assert!(bounds.width() <= config.max_extent + 1e-3);
        assert!(bounds.height() <= config.max_extent + 1e-3);
        assert!(bounds.center().hypot() < 1e-3);
    }

    #[test]
    fn test_connected_nodes_are_separated() {
        let graph = graph_from(2, &[(0, 1)]);
        let positions = engine().place(&graph, &IndexMap::new());
        let points: Vec<Point> = positions.values().copied().collect();
        assert!(points[0].distance(points[1]) > 0.5);
    }

    #[test]
    fn test_pinned_nodes_do_not_move() {
        let graph = graph_from(3, &[(0, 1), (1, 2)]);
        let pinned: IndexMap<Id, Point> = [
            (Id::new("n0"), Point::new(0.0, 4.0)),
            (Id::new("n2"), Point::new(0.0, 0.0)),
        ]
        .into_iter()
        .collect();

        let positions = engine().place(&graph, &pinned);
        assert_eq!(positions[&Id::new("n0")], Point::new(0.0, 4.0));
        assert_eq!(positions[&Id::new("n2")], Point::new(0.0, 0.0));
        assert!(positions[&Id::new("n1")].is_finite());
    }

    proptest! {
        #[test]
        fn prop_layout_is_finite_and_deterministic(
            node_count in 1usize..8,
            raw_edges in prop::collection::vec((0usize..8, 0usize..8), 0..12),
        ) {
            let edges: Vec<(usize, usize)> = raw_edges
                .into_iter()
                .filter(|(from, to)| *from < node_count && *to < node_count)
                .collect();
            let graph = graph_from(node_count, &edges);

            let first = engine().place(&graph, &IndexMap::new());
            let second = engine().place(&graph, &IndexMap::new());

            prop_assert_eq!(first.len(), node_count);
            prop_assert!(first.values().all(|p| p.is_finite()));
            prop_assert_eq!(first, second);
        }
    }
}
