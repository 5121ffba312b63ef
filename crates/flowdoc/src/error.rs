//! Error types for Flowdoc operations.
//!
//! [`FlowError`] is the single error returned by the public API. Each
//! pipeline stage has its own narrower error type that converts into it:
//! structural problems surface as [`DefinitionError`] or [`LayoutError`]
//! before any drawing starts, while [`PaletteError`] and [`RenderError`]
//! abort a render that is already under way.

use std::io;

use thiserror::Error;

use flowdoc_core::{identifier::Id, node_type::NodeType};

/// The main error type for Flowdoc operations.
///
/// The `Parse` variant keeps the source text so callers can render the
/// offending span.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error(transparent)]
    Definition(#[from] DefinitionError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Palette(#[from] PaletteError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("{err}")]
    Parse { err: toml::de::Error, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for FlowError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl FlowError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: toml::de::Error, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}

/// Violations of the graph invariants, raised while building a graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("duplicate node id `{0}`")]
    DuplicateNodeId(Id),

    #[error("edge #{edge_index} references undeclared node `{id}`")]
    UnknownEndpoint { edge_index: usize, id: Id },

    #[error("edge from `{0}` to itself is not allowed")]
    SelfLoop(Id),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("node `{0}` has no coordinate in the manual position table")]
    NodeWithoutCoordinate(Id),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    #[error("node type `{0}` has no palette entry")]
    TypeNotInPalette(NodeType),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("edge endpoint `{0}` has no coordinate")]
    MissingEndpointCoordinate(Id),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_error_messages() {
        let err = DefinitionError::UnknownEndpoint {
            edge_index: 3,
            id: Id::new("ghost"),
        };
        assert_eq!(err.to_string(), "edge #3 references undeclared node `ghost`");
        assert_eq!(
            DefinitionError::SelfLoop(Id::new("loop")).to_string(),
            "edge from `loop` to itself is not allowed"
        );
    }

    #[test]
    fn test_stage_errors_convert_transparently() {
        let err: FlowError = PaletteError::TypeNotInPalette(NodeType::Decision).into();
        assert!(matches!(err, FlowError::Palette(_)));
        assert_eq!(err.to_string(), "node type `decision` has no palette entry");
    }
}
