//! pf-project: topology file format and validation.
//!
//! A project holds one or more piping systems. Each system lists its
//! components, the connections between them and optional scripted
//! scenarios. Files are YAML or JSON and are migrated to the latest version
//! on load.

pub mod migrate;
pub mod schema;
pub mod validate;

pub use migrate::{LATEST_VERSION, migrate_to_latest};
pub use schema::*;
pub use validate::{ValidationError, validate_project};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Migration error: {what}")]
    Migration { what: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse, migrate and validate a project from YAML text.
pub fn from_yaml_str(content: &str) -> ProjectResult<Project> {
    let project: Project = serde_yaml::from_str(content)?;
    finish_load(project)
}

/// Parse, migrate and validate a project from JSON text.
pub fn from_json_str(content: &str) -> ProjectResult<Project> {
    let project: Project = serde_json::from_str(content)?;
    finish_load(project)
}

fn finish_load(project: Project) -> ProjectResult<Project> {
    let project = migrate_to_latest(project)?;
    validate_project(&project)?;
    Ok(project)
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<Project> {
    let content = std::fs::read_to_string(path)?;
    from_yaml_str(&content)
}

/// Validate and serialize a project as YAML text.
pub fn to_yaml_string(project: &Project) -> ProjectResult<String> {
    validate_project(project)?;
    Ok(serde_yaml::to_string(project)?)
}

/// Validate and serialize a project as pretty-printed JSON text.
pub fn to_json_string(project: &Project) -> ProjectResult<String> {
    validate_project(project)?;
    Ok(serde_json::to_string_pretty(project)?)
}

pub fn save_yaml(path: &std::path::Path, project: &Project) -> ProjectResult<()> {
    std::fs::write(path, to_yaml_string(project)?)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ProjectResult<Project> {
    let content = std::fs::read_to_string(path)?;
    from_json_str(&content)
}

pub fn save_json(path: &std::path::Path, project: &Project) -> ProjectResult<()> {
    std::fs::write(path, to_json_string(project)?)?;
    Ok(())
}

/// Load by extension: `.json` as JSON, anything else as YAML.
pub fn load(path: &std::path::Path) -> ProjectResult<Project> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => load_json(path),
        _ => load_yaml(path),
    }
}
