//! The validated, immutable flow graph.
//!
//! Nodes are kept in declaration order in an [`IndexMap`]; adjacency lives in
//! a `petgraph` directed graph whose node indices follow the same order, so
//! every traversal below is deterministic.

use std::{
    cmp::Reverse,
    collections::{BTreeSet, BinaryHeap},
};

use indexmap::IndexMap;
use log::{debug, trace};
use petgraph::{
    Direction,
    algo::is_cyclic_directed,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};

use flowdoc_core::{identifier::Id, node_type::NodeType};

use crate::{
    definition::{EdgeSpec, NodeSpec, NodeSummary},
    error::DefinitionError,
};

/// A step of the flow.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: Id,
    label: String,
    node_type: NodeType,
    summary: Option<NodeSummary>,
}

impl Node {
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    pub fn summary(&self) -> Option<&NodeSummary> {
        self.summary.as_ref()
    }
}

/// A directed transition between two declared nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    from: Id,
    to: Id,
}

impl Edge {
    pub fn from(&self) -> Id {
        self.from
    }

    pub fn to(&self) -> Id {
        self.to
    }
}

/// A process flow whose nodes are unique and whose edges only reference
/// declared nodes. Never mutated after [`Graph::build`].
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: IndexMap<Id, Node>,
    edges: Vec<Edge>,
    adjacency: DiGraph<Id, usize>,
}

impl Graph {
    /// Build a graph from node and edge declarations.
    ///
    /// # Errors
    ///
    /// - [`DefinitionError::DuplicateNodeId`] if two nodes share an id.
    /// - [`DefinitionError::UnknownEndpoint`] if an edge references an
    ///   undeclared node; `edge_index` is its zero-based position.
    /// - [`DefinitionError::SelfLoop`] if an edge starts and ends at the
    ///   same node.
    ///
    /// Parallel edges are kept as declared.
    pub fn build(
        nodes: impl IntoIterator<Item = NodeSpec>,
        edges: impl IntoIterator<Item = EdgeSpec>,
    ) -> Result<Self, DefinitionError> {
        let mut node_map: IndexMap<Id, Node> = IndexMap::new();
        let mut adjacency = DiGraph::new();

        for spec in nodes {
            if node_map.contains_key(&spec.id) {
                return Err(DefinitionError::DuplicateNodeId(spec.id));
            }
            adjacency.add_node(spec.id);
            node_map.insert(
                spec.id,
                Node {
                    id: spec.id,
                    label: spec.label,
                    node_type: spec.node_type,
                    summary: spec.summary,
                },
            );
        }

        let mut edge_list = Vec::new();
        for (edge_index, spec) in edges.into_iter().enumerate() {
            let from = node_map
                .get_index_of(&spec.from)
                .ok_or(DefinitionError::UnknownEndpoint {
                    edge_index,
                    id: spec.from,
                })?;
            let to = node_map
                .get_index_of(&spec.to)
                .ok_or(DefinitionError::UnknownEndpoint {
                    edge_index,
                    id: spec.to,
                })?;
            if from == to {
                return Err(DefinitionError::SelfLoop(spec.from));
            }
            adjacency.add_edge(NodeIndex::new(from), NodeIndex::new(to), edge_index);
            edge_list.push(Edge {
                from: spec.from,
                to: spec.to,
            });
            trace!(edge_index = edge_index, from:% = spec.from, to:% = spec.to; "Edge added");
        }

        debug!(nodes = node_map.len(), edges = edge_list.len(); "Graph built");

        Ok(Self {
            nodes: node_map,
            edges: edge_list,
            adjacency,
        })
    }

    /// Nodes in declaration order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &Node> {
        self.nodes.values()
    }

    /// Edges in declaration order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: Id) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node types present on at least one node, in canonical order.
    pub fn used_types(&self) -> BTreeSet<NodeType> {
        self.nodes.values().map(Node::node_type).collect()
    }

    /// Targets of the edges leaving `id`, in edge declaration order.
    pub fn successors(&self, id: Id) -> Vec<Id> {
        self.edges
            .iter()
            .filter(|edge| edge.from == id)
            .map(|edge| edge.to)
            .collect()
    }

    /// Nodes sharing an edge with `id` in either direction, each listed once.
    pub fn neighbors(&self, id: Id) -> Vec<Id> {
        let mut neighbors: Vec<Id> = Vec::new();
        for edge in &self.edges {
            let other = if edge.from == id {
                edge.to
            } else if edge.to == id {
                edge.from
            } else {
                continue;
            };
            if !neighbors.contains(&other) {
                neighbors.push(other);
            }
        }
        neighbors
    }

    pub fn is_cyclic(&self) -> bool {
        is_cyclic_directed(&self.adjacency)
    }

    /// Topological order with ties broken by declaration order, or `None`
    /// if the graph has a cycle.
    pub fn topological_order(&self) -> Option<Vec<Id>> {
        let mut in_degree: Vec<usize> = self
            .adjacency
            .node_indices()
            .map(|idx| {
                self.adjacency
                    .edges_directed(idx, Direction::Incoming)
                    .count()
            })
            .collect();

        let mut ready: BinaryHeap<Reverse<usize>> = in_degree
            .iter()
            .enumerate()
            .filter(|(_, degree)| **degree == 0)
            .map(|(idx, _)| Reverse(idx))
            .collect();

        let mut order = Vec::with_capacity(self.nodes.len());
        while let Some(Reverse(idx)) = ready.pop() {
            order.push(self.adjacency[NodeIndex::new(idx)]);
            for edge in self
                .adjacency
                .edges_directed(NodeIndex::new(idx), Direction::Outgoing)
            {
                let target = edge.target().index();
                in_degree[target] -= 1;
                if in_degree[target] == 0 {
                    ready.push(Reverse(target));
                }
            }
        }

        (order.len() == self.nodes.len()).then_some(order)
    }

    /// The declarative form of this graph; `build` on the result yields an
    /// equal graph.
    pub fn to_definition(&self) -> (Vec<NodeSpec>, Vec<EdgeSpec>) {
        let nodes = self
            .nodes
            .values()
            .map(|node| NodeSpec {
                id: node.id,
                label: node.label.clone(),
                node_type: node.node_type,
                summary: node.summary.clone(),
            })
            .collect();
        let edges = self
            .edges
            .iter()
            .map(|edge| EdgeSpec {
                from: edge.from,
                to: edge.to,
            })
            .collect();
        (nodes, edges)
    }
}

impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.nodes.len() == other.nodes.len()
            && self.nodes.values().eq(other.nodes.values())
            && self.edges == other.edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Graph {
        Graph::build(
            [
                NodeSpec::new("start", "Start", NodeType::Start),
                NodeSpec::new("check", "Check?", NodeType::Decision),
                NodeSpec::new("act", "Act", NodeType::Action),
                NodeSpec::new("done", "Done", NodeType::End),
            ],
            [
                EdgeSpec::new("start", "check"),
                EdgeSpec::new("check", "act"),
                EdgeSpec::new("check", "done"),
                EdgeSpec::new("act", "done"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_build_keeps_declaration_order() {
        let graph = diamond();
        let ids: Vec<String> = graph.nodes().map(|n| n.id().name()).collect();
        assert_eq!(ids, ["start", "check", "act", "done"]);
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.node(Id::new("check")).unwrap().label(), "Check?");
    }

    #[test]
    fn test_duplicate_node_id() {
        let err = Graph::build(
            [
                NodeSpec::new("a", "A", NodeType::Process),
                NodeSpec::new("a", "Again", NodeType::Action),
            ],
            [],
        )
        .unwrap_err();
        assert_eq!(err, DefinitionError::DuplicateNodeId(Id::new("a")));
    }

    #[test]
    fn test_unknown_endpoint_reports_edge_index() {
        let err = Graph::build(
            [
                NodeSpec::new("a", "A", NodeType::Start),
                NodeSpec::new("b", "B", NodeType::End),
            ],
            [EdgeSpec::new("a", "b"), EdgeSpec::new("b", "ghost")],
        )
        .unwrap_err();
        assert_eq!(
            err,
            DefinitionError::UnknownEndpoint {
                edge_index: 1,
                id: Id::new("ghost"),
            }
        );
    }

    #[test]
    fn test_self_loop() {
        let err = Graph::build(
            [NodeSpec::new("a", "A", NodeType::Process)],
            [EdgeSpec::new("a", "a")],
        )
        .unwrap_err();
        assert_eq!(err, DefinitionError::SelfLoop(Id::new("a")));
    }

    #[test]
    fn test_parallel_edges_are_kept() {
        let graph = Graph::build(
            [
                NodeSpec::new("a", "A", NodeType::Start),
                NodeSpec::new("b", "B", NodeType::End),
            ],
            [EdgeSpec::new("a", "b"), EdgeSpec::new("a", "b")],
        )
        .unwrap();
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.successors(Id::new("a")).len(), 2);
        assert_eq!(graph.neighbors(Id::new("a")), vec![Id::new("b")]);
    }

    #[test]
    fn test_used_types_in_canonical_order() {
        let types: Vec<NodeType> = diamond().used_types().into_iter().collect();
        assert_eq!(
            types,
            [NodeType::Start, NodeType::Decision, NodeType::Action, NodeType::End]
        );
    }

    #[test]
    fn test_topological_order_breaks_ties_by_declaration() {
        let graph = Graph::build(
            [
                NodeSpec::new("late", "Late", NodeType::Process),
                NodeSpec::new("root", "Root", NodeType::Start),
                NodeSpec::new("early", "Early", NodeType::Process),
            ],
            [EdgeSpec::new("root", "late"), EdgeSpec::new("root", "early")],
        )
        .unwrap();
        let order: Vec<String> = graph
            .topological_order()
            .unwrap()
            .into_iter()
            .map(|id| id.name())
            .collect();
        assert_eq!(order, ["root", "late", "early"]);
    }

    #[test]
    fn test_cycle_detection() {
        let graph = Graph::build(
            [
                NodeSpec::new("a", "A", NodeType::Process),
                NodeSpec::new("b", "B", NodeType::Process),
            ],
            [EdgeSpec::new("a", "b"), EdgeSpec::new("b", "a")],
        )
        .unwrap();
        assert!(graph.is_cyclic());
        assert!(graph.topological_order().is_none());
        assert!(!diamond().is_cyclic());
    }

    #[test]
    fn test_round_trip_through_definition() {
        let graph = diamond();
        let (nodes, edges) = graph.to_definition();
        assert_eq!(Graph::build(nodes, edges).unwrap(), graph);
    }

    #[test]
    fn test_empty_graph() {
        let graph = Graph::build([], []).unwrap();
        assert!(graph.is_empty());
        assert!(graph.used_types().is_empty());
        assert_eq!(graph.topological_order(), Some(vec![]));
    }
}
