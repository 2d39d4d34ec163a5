//! Error types for network operations.

use pf_components::ComponentError;
use pf_core::{CompId, ErrorClass};
use pf_graph::GraphError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    #[error(transparent)]
    Component(#[from] ComponentError),

    #[error("Topology error: {0}")]
    Graph(#[from] GraphError),

    #[error("Unknown component {id}")]
    UnknownComponent { id: CompId },

    #[error("Unknown component name '{name}'")]
    UnknownName { name: String },

    #[error("Component '{name}' is a {actual}, expected a {expected}")]
    WrongKind {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Component '{name}' is fed from upstream; its inlet cannot be set directly")]
    NotBoundary { name: String },
}

pub type NetworkResult<T> = Result<T, NetworkError>;

impl NetworkError {
    pub fn class(&self) -> ErrorClass {
        match self {
            NetworkError::Component(e) => e.class(),
            NetworkError::UnknownName { .. } => ErrorClass::Validation,
            NetworkError::Graph(_)
            | NetworkError::UnknownComponent { .. }
            | NetworkError::WrongKind { .. }
            | NetworkError::NotBoundary { .. } => ErrorClass::Topology,
        }
    }
}
