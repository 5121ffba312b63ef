//! Z-ordered grouping of SVG output.
//!
//! Each draw command renders into one or more [`RenderLayer`]s. Collecting
//! the nodes into a [`LayeredOutput`] and rendering it emits one `<g>` per
//! layer, bottom to top, so connectors never hide behind shapes and labels
//! always sit on top regardless of the order commands were emitted in.

use svg::node::element as svg_element;

/// Boxed SVG node.
pub type SvgNode = Box<dyn svg::Node>;

/// Rendering layers, bottom first. Ordering follows declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    Background,
    /// Connector curves and arrowheads.
    Connector,
    /// Node shapes.
    Shape,
    /// Node labels and their backgrounds.
    Label,
    /// Annotations and the title.
    Annotation,
    /// Legend swatches and entries.
    Legend,
}

impl RenderLayer {
    /// Value of the `data-layer` attribute on the layer group.
    pub fn name(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Connector => "connector",
            Self::Shape => "shape",
            Self::Label => "label",
            Self::Annotation => "annotation",
            Self::Legend => "legend",
        }
    }
}

/// SVG nodes tagged with the layer they belong to.
///
/// ```
/// # use flowdoc_core::draw::{LayeredOutput, RenderLayer};
/// # use svg::node::element::Rectangle;
/// let mut output = LayeredOutput::new();
/// output.add_to_layer(RenderLayer::Label, Box::new(Rectangle::new()));
/// output.add_to_layer(RenderLayer::Shape, Box::new(Rectangle::new()));
/// assert_eq!(output.render().len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Append every node of `other`, keeping its layer assignments.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consume the output and return one group per non-empty layer.
    ///
    /// Within a layer nodes keep their insertion order.
    pub fn render(mut self) -> Vec<SvgNode> {
        // Stable sort keeps insertion order inside a layer
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut groups: Vec<SvgNode> = Vec::new();
        let mut current: Option<(RenderLayer, svg_element::Group)> = None;

        for (layer, node) in self.items {
            current = match current {
                Some((current_layer, group)) if current_layer == layer => {
                    Some((current_layer, group.add(node)))
                }
                previous => {
                    if let Some((_, group)) = previous {
                        groups.push(Box::new(group));
                    }
                    let group = svg_element::Group::new().set("data-layer", layer.name());
                    Some((layer, group.add(node)))
                }
            };
        }

        if let Some((_, group)) = current {
            groups.push(Box::new(group));
        }
        groups
    }
}
