//! Project loading, saving, validation, and introspection.

use pf_project::schema::{Project, SystemDef};
use std::path::Path;

use crate::error::{AppError, AppResult};

/// Summary of a system for listing.
#[derive(Debug, Clone)]
pub struct SystemSummary {
    pub id: String,
    pub name: String,
    pub component_count: usize,
    pub connection_count: usize,
    pub scenario_ids: Vec<String>,
}

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("json")
}

/// Load a project from YAML or JSON (by extension), migrated and validated.
pub fn load_project(path: &Path) -> AppResult<Project> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::ProjectFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let project = if is_json(path) {
        pf_project::from_json_str(&content)?
    } else {
        pf_project::from_yaml_str(&content)?
    };
    Ok(project)
}

/// Save a project, in the format the extension names.
pub fn save_project(path: &Path, project: &Project) -> AppResult<()> {
    validate_project(project)?;
    let content = if is_json(path) {
        pf_project::to_json_string(project)?
    } else {
        pf_project::to_yaml_string(project)?
    };

    std::fs::write(path, content).map_err(|e| AppError::ProjectFileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Validate a project and require at least one system.
pub fn validate_project(project: &Project) -> AppResult<()> {
    if project.systems.is_empty() {
        return Err(AppError::Validation(
            "Project must have at least one system".to_string(),
        ));
    }
    pf_project::validate_project(project).map_err(|e| AppError::Validation(e.to_string()))?;
    Ok(())
}

/// List all systems in the project with summaries.
pub fn list_systems(project: &Project) -> Vec<SystemSummary> {
    project
        .systems
        .iter()
        .map(|system| SystemSummary {
            id: system.id.clone(),
            name: system.name.clone(),
            component_count: system.components.len(),
            connection_count: system.connections.len(),
            scenario_ids: system.scenarios.iter().map(|s| s.id.clone()).collect(),
        })
        .collect()
}

/// Get a specific system by ID.
pub fn get_system<'a>(project: &'a Project, system_id: &str) -> AppResult<&'a SystemDef> {
    project
        .systems
        .iter()
        .find(|s| s.id == system_id)
        .ok_or_else(|| AppError::SystemNotFound(system_id.to_string()))
}
