//! Error types for the pf-app service layer.

use pf_core::ErrorClass;
use std::path::PathBuf;

/// Application error shared by every front end.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Failed to read project file: {path}")]
    ProjectFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write project file: {path}")]
    ProjectFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Project validation failed: {0}")]
    Validation(String),

    #[error("System not found: {0}")]
    SystemNotFound(String),

    #[error("Scenario not found: {0}")]
    ScenarioNotFound(String),

    #[error("Unknown component: {0}")]
    UnknownComponent(String),

    #[error("Runtime compilation failed: {0}")]
    Compile(String),

    #[error("Bad command '{line}': {reason}")]
    Command { line: String, reason: String },

    #[error(transparent)]
    Network(#[from] pf_network::NetworkError),

    #[error("Results error: {0}")]
    Results(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for pf-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Network failures keep their own class; everything else here is a
    /// problem with the input.
    pub fn class(&self) -> ErrorClass {
        match self {
            AppError::Network(err) => err.class(),
            _ => ErrorClass::Validation,
        }
    }
}

impl From<pf_project::ProjectError> for AppError {
    fn from(err: pf_project::ProjectError) -> Self {
        match err {
            pf_project::ProjectError::Validation(v) => AppError::Validation(v.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<pf_results::ResultsError> for AppError {
    fn from(err: pf_results::ResultsError) -> Self {
        AppError::Results(err.to_string())
    }
}

impl From<pf_components::ComponentError> for AppError {
    fn from(err: pf_components::ComponentError) -> Self {
        AppError::Compile(err.to_string())
    }
}

impl From<pf_core::VpError> for AppError {
    fn from(err: pf_core::VpError) -> Self {
        AppError::Compile(err.to_string())
    }
}
