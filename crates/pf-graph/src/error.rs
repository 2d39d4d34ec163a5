//! Graph-specific error types.

use pf_core::{CompId, EdgeId};

pub type GraphResult<T> = Result<T, GraphError>;

/// Graph construction and validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// An edge refers to a node that doesn't exist.
    InvalidNodeRef { edge: EdgeId, node: CompId },

    /// An edge connects a node to itself.
    SelfLoop { edge: EdgeId, node: CompId },

    /// The same (from, to) pair was connected twice.
    DuplicateEdge { from: CompId, to: CompId },

    /// Two nodes share a name.
    DuplicateName { name: String },

    /// An edge feeds a node that can only act as a source (e.g. a tank).
    IntoSource { edge: EdgeId, node: CompId },

    /// The wiring contains a cycle through the named node.
    Cycle { node: CompId },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::InvalidNodeRef { edge, node } => {
                write!(f, "Edge {} refers to non-existent node {}", edge, node)
            }
            GraphError::SelfLoop { edge, node } => {
                write!(f, "Edge {} connects node {} to itself", edge, node)
            }
            GraphError::DuplicateEdge { from, to } => {
                write!(f, "Nodes {} and {} are connected more than once", from, to)
            }
            GraphError::DuplicateName { name } => {
                write!(f, "Node name '{}' is used more than once", name)
            }
            GraphError::IntoSource { edge, node } => {
                write!(f, "Edge {} feeds source-only node {}", edge, node)
            }
            GraphError::Cycle { node } => {
                write!(f, "Wiring contains a cycle through node {}", node)
            }
        }
    }
}

impl std::error::Error for GraphError {}
