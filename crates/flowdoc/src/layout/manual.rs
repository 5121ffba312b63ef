//! Resolution of the manual position table against a graph.

use indexmap::IndexMap;
use log::warn;

use flowdoc_core::{geometry::Point, identifier::Id};

use crate::graph::Graph;

/// Keep the table entries that name a node of `graph`, in node order.
///
/// Entries for unknown ids, and coordinates that are not finite, are
/// dropped with a warning.
pub(super) fn resolve(graph: &Graph, table: &IndexMap<Id, Point>) -> IndexMap<Id, Point> {
    for (id, _) in table.iter().filter(|(id, _)| graph.node(**id).is_none()) {
        warn!(node:% = id; "Ignoring manual position for unknown node");
    }

    graph
        .nodes()
        .filter_map(|node| {
            let point = *table.get(&node.id())?;
            if !point.is_finite() {
                warn!(node:% = node.id(); "Ignoring non-finite manual position");
                return None;
            }
            Some((node.id(), point))
        })
        .collect()
}
