//! Node type to shape, color and legend label mapping.

use std::str::FromStr;

use indexmap::IndexMap;
use serde::Deserialize;

use flowdoc_core::{color::Color, draw::ShapeKind, node_type::NodeType};

use crate::error::PaletteError;

/// How nodes of one type are drawn and named in the legend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaletteEntry {
    shape: ShapeKind,
    color: Color,
    label: String,
}

impl PaletteEntry {
    pub fn new(shape: ShapeKind, color: Color, label: &str) -> Self {
        Self {
            shape,
            color,
            label: label.to_string(),
        }
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Injected mapping from [`NodeType`] to [`PaletteEntry`].
///
/// A palette need not cover every type; missing types are only an error
/// when a node of that type is rendered.
///
/// Deserializes from a table keyed by lowercase type name:
///
/// ```
/// # use flowdoc::render::Palette;
/// # use flowdoc::node_type::NodeType;
/// let palette: Palette = toml::from_str(
///     r##"
///     [decision]
///     shape = "diamond"
///     color = "#FF9800"
///     label = "Decision"
///     "##,
/// )
/// .unwrap();
/// assert!(palette.get(NodeType::Decision).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "IndexMap<String, PaletteEntry>")]
pub struct Palette {
    entries: IndexMap<NodeType, PaletteEntry>,
}

impl Palette {
    /// A palette without any entries.
    pub fn empty() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    pub fn with_entry(mut self, node_type: NodeType, entry: PaletteEntry) -> Self {
        self.entries.insert(node_type, entry);
        self
    }

    /// # Errors
    ///
    /// Returns [`PaletteError::TypeNotInPalette`] if `node_type` has no entry.
    pub fn get(&self, node_type: NodeType) -> Result<&PaletteEntry, PaletteError> {
        self.entries
            .get(&node_type)
            .ok_or(PaletteError::TypeNotInPalette(node_type))
    }

    pub fn contains(&self, node_type: NodeType) -> bool {
        self.entries.contains_key(&node_type)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        let entry = |shape, color: &str, label| {
            PaletteEntry::new(
                shape,
                Color::new(color).unwrap_or_default(),
                label,
            )
        };
        Self::empty()
            .with_entry(NodeType::Start, entry(ShapeKind::Circle, "#4CAF50", "Start"))
            .with_entry(
                NodeType::Process,
                entry(ShapeKind::RoundedRectangle, "#2196F3", "Process"),
            )
            .with_entry(NodeType::Decision, entry(ShapeKind::Diamond, "#FF9800", "Decision"))
            .with_entry(
                NodeType::Action,
                entry(ShapeKind::RoundedRectangle, "#9C27B0", "Action"),
            )
            .with_entry(NodeType::End, entry(ShapeKind::Circle, "#F44336", "End"))
    }
}

impl TryFrom<IndexMap<String, PaletteEntry>> for Palette {
    type Error = String;

    fn try_from(raw: IndexMap<String, PaletteEntry>) -> Result<Self, Self::Error> {
        raw.into_iter()
            .try_fold(Self::empty(), |palette, (name, entry)| {
                let node_type = NodeType::from_str(&name).map_err(|err| err.to_string())?;
                Ok(palette.with_entry(node_type, entry))
            })
    }
}
