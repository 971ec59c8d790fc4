//! Errors raised by a [`crate::VisualNodeBuilder`].

use crate::builder::NodeId;
use thiserror::Error;

pub type BuildResult<T> = Result<T, BuildError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The requested font face is not loaded.
    #[error("font {family} {style} is not available")]
    FontUnavailable { family: String, style: String },

    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    #[error("node {0} is not a container")]
    NotAContainer(NodeId),

    /// The property does not exist on this kind of node.
    #[error("{property} cannot be set on {kind} node {node}")]
    Unsupported {
        node: NodeId,
        kind: &'static str,
        property: &'static str,
    },

    /// Appending would make a node its own ancestor.
    #[error("cannot append node {child} under its descendant {parent}")]
    InvalidHierarchy { parent: NodeId, child: NodeId },
}

impl BuildError {
    pub fn font_unavailable(family: &str, style: &str) -> Self {
        BuildError::FontUnavailable {
            family: family.to_string(),
            style: style.to_string(),
        }
    }
}
