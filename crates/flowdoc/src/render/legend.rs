//! The legend: one swatch and label per node type in use.

use std::collections::BTreeSet;

use flowdoc_core::{
    color::Color,
    draw::{DrawCommand, DrawList, ShapeKind},
    geometry::Point,
    node_type::NodeType,
};

use crate::render::Palette;

/// Vertical distance between legend rows, in diagram units.
const ROW_SPACING: f32 = 0.35;

/// One legend row.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub node_type: NodeType,
    pub shape: ShapeKind,
    pub color: Color,
    pub label: String,
}

/// Legend entries in canonical type order.
///
/// A type is listed when it has a palette entry and appears in `used`, so
/// every type on a node gets exactly one row and an empty graph gets none.
pub fn build(palette: &Palette, used: &BTreeSet<NodeType>) -> Vec<LegendEntry> {
    NodeType::ALL
        .into_iter()
        .filter(|node_type| used.contains(node_type))
        .filter_map(|node_type| {
            let entry = palette.get(node_type).ok()?;
            Some(LegendEntry {
                node_type,
                shape: entry.shape(),
                color: entry.color(),
                label: entry.label().to_string(),
            })
        })
        .collect()
}

/// Lay the entries out top-down starting with the first swatch at `top_left`.
pub fn render(entries: &[LegendEntry], top_left: Point) -> DrawList {
    entries
        .iter()
        .enumerate()
        .map(|(row, entry)| DrawCommand::LegendSwatch {
            node_type: entry.node_type,
            kind: entry.shape,
            color: entry.color,
            label: entry.label.clone(),
            position: Point::new(top_left.x(), top_left.y() - row as f32 * ROW_SPACING),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_build_follows_canonical_order() {
        let used = BTreeSet::from([NodeType::End, NodeType::Decision, NodeType::Start]);
        let types: Vec<NodeType> = build(&Palette::default(), &used)
            .into_iter()
            .map(|entry| entry.node_type)
            .collect();
        assert_eq!(types, [NodeType::Start, NodeType::Decision, NodeType::End]);
    }

    #[test]
    fn test_build_empty_when_nothing_used() {
        assert!(build(&Palette::default(), &BTreeSet::new()).is_empty());
    }

    #[test]
    fn test_render_stacks_rows_downwards() {
        let used = BTreeSet::from(NodeType::ALL);
        let list = render(&build(&Palette::default(), &used), Point::new(3.0, 10.0));
        assert_eq!(list.len(), 5);

        let ys: Vec<f32> = list
            .commands()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::LegendSwatch { position, .. } => Some(position.y()),
                _ => None,
            })
            .collect();
        assert_approx_eq!(f32, ys[0], 10.0);
        assert_approx_eq!(f32, ys[4], 10.0 - 4.0 * ROW_SPACING);
    }
}
