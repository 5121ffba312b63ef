//! Declarative flow definitions.
//!
//! A [`FlowDefinition`] is the input of the whole pipeline: nodes, edges,
//! an optional manual position table, free-floating annotations and an
//! optional explicit step list. It deserializes from TOML:
//!
//! ```toml
//! title = "Deploy"
//!
//! [[nodes]]
//! id = "start"
//! label = "Start"
//! type = "start"
//!
//! [[nodes]]
//! id = "build"
//! label = "Build"
//! type = "process"
//! summary = { title = "Build", description = "Compile the release artifacts" }
//!
//! [[edges]]
//! from = "start"
//! to = "build"
//!
//! [positions]
//! start = [0.0, 1.0]
//! build = [0.0, 0.0]
//! ```

use indexmap::IndexMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use flowdoc_core::{geometry::Point, identifier::Id, node_type::NodeType};

use crate::{error::FlowError, graph::Graph};

/// Title and description of the step a node stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSummary {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// A node as written in a definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub id: Id,
    pub label: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<NodeSummary>,
}

impl NodeSpec {
    pub fn new(id: &str, label: &str, node_type: NodeType) -> Self {
        Self {
            id: Id::new(id),
            label: label.to_string(),
            node_type,
            summary: None,
        }
    }

    pub fn with_summary(mut self, title: &str, description: &str) -> Self {
        self.summary = Some(NodeSummary {
            title: title.to_string(),
            description: description.to_string(),
        });
        self
    }
}

/// A directed edge as written in a definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub from: Id,
    pub to: Id,
}

impl EdgeSpec {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: Id::new(from),
            to: Id::new(to),
        }
    }
}

/// Free-floating text at a fixed coordinate, unattached to any node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationSpec {
    pub text: String,
    pub position: Point,
}

impl AnnotationSpec {
    pub fn new(text: &str, position: Point) -> Self {
        Self {
            text: text.to_string(),
            position,
        }
    }
}

/// One entry of the textual summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub index: usize,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl Step {
    pub fn new(index: usize, title: &str, description: &str) -> Self {
        Self {
            index,
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

/// Complete declarative input of a flow diagram.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default)]
    pub nodes: Vec<NodeSpec>,

    #[serde(default)]
    pub edges: Vec<EdgeSpec>,

    /// Manual coordinates. `None` means no table at all, which is not the
    /// same as an empty table under the strict gap policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positions: Option<IndexMap<Id, Point>>,

    #[serde(default)]
    pub annotations: Vec<AnnotationSpec>,

    /// Explicit step list. When absent, steps are derived from the graph.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<Step>>,
}

impl FlowDefinition {
    /// Parse a definition from TOML source.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Parse`] carrying the source text when the input
    /// is not valid TOML or does not match the definition schema.
    pub fn from_toml_str(source: &str) -> Result<Self, FlowError> {
        let definition: Self =
            toml::from_str(source).map_err(|err| FlowError::new_parse_error(err, source))?;
        debug!(
            nodes = definition.nodes.len(),
            edges = definition.edges.len(),
            annotations = definition.annotations.len();
            "Flow definition parsed"
        );
        Ok(definition)
    }

    /// Build and validate the graph described by this definition.
    pub fn graph(&self) -> Result<Graph, FlowError> {
        Ok(Graph::build(self.nodes.iter().cloned(), self.edges.iter().copied())?)
    }

    /// Steps of the textual summary.
    ///
    /// Explicit steps are returned verbatim. Otherwise nodes that carry a
    /// summary are listed in topological order and numbered from 1. If the
    /// graph is cyclic, declaration order is used instead.
    pub fn steps(&self) -> Result<Vec<Step>, FlowError> {
        if let Some(steps) = &self.steps {
            return Ok(steps.clone());
        }
        let graph = self.graph()?;
        Ok(derive_steps(&graph))
    }
}

/// Project the graph onto a numbered step list.
pub fn derive_steps(graph: &Graph) -> Vec<Step> {
    let order: Vec<Id> = match graph.topological_order() {
        Some(order) => order,
        None => {
            warn!("Graph is cyclic, deriving steps in declaration order");
            graph.nodes().map(|node| node.id()).collect()
        }
    };

    order
        .into_iter()
        .filter_map(|id| graph.node(id))
        .filter_map(|node| node.summary())
        .enumerate()
        .map(|(idx, summary)| Step::new(idx + 1, &summary.title, &summary.description))
        .collect()
}
