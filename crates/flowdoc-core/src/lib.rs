//! Flowdoc Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Flowdoc
//! process-flow renderer. It includes:
//!
//! - **Identifiers**: String-interned node identifiers ([`identifier::Id`])
//! - **Node types**: The closed set of step kinds ([`node_type::NodeType`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: Backend-agnostic draw commands and SVG primitives ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod identifier;
pub mod node_type;
