//! Built-in flow definitions.

use crate::{definition::FlowDefinition, error::FlowError};

/// TOML source of the project initialization flow.
pub const DOCUMENTED_SOURCE: &str = include_str!("flows/documented.toml");

/// The project initialization flow of the Electron foundation CLI: 18 nodes,
/// 20 edges, a complete manual layout, three branch-guard annotations and
/// 14 summarized steps.
pub fn documented() -> Result<FlowDefinition, FlowError> {
    FlowDefinition::from_toml_str(DOCUMENTED_SOURCE)
}
