//! Schema migration framework.

use crate::ProjectError;
use crate::schema::{FluidDef, Project};

pub const LATEST_VERSION: u32 = 1;

pub fn migrate_to_latest(mut project: Project) -> Result<Project, ProjectError> {
    while project.version < LATEST_VERSION {
        project = migrate_one_version(project)?;
    }
    Ok(project)
}

fn migrate_one_version(project: Project) -> Result<Project, ProjectError> {
    match project.version {
        0 => migrate_v0_to_v1(project),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

/// Version 0 files assumed water everywhere and had no fluid block.
fn migrate_v0_to_v1(mut project: Project) -> Result<Project, ProjectError> {
    for system in &mut project.systems {
        if system.fluid.is_none() {
            system.fluid = Some(FluidDef::default());
        }
    }
    project.version = 1;
    Ok(project)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SystemDef;

    #[test]
    fn migrate_latest_is_noop() {
        let project = Project {
            version: LATEST_VERSION,
            name: "test".to_string(),
            systems: vec![],
        };

        let migrated = migrate_to_latest(project.clone()).unwrap();
        assert_eq!(migrated, project);
    }

    #[test]
    fn migrate_v0_fills_water() {
        let project = Project {
            version: 0,
            name: "Legacy".to_string(),
            systems: vec![SystemDef {
                id: "s1".to_string(),
                name: "Line".to_string(),
                fluid: None,
                components: vec![],
                connections: vec![],
                scenarios: vec![],
            }],
        };

        let migrated = migrate_to_latest(project).unwrap();
        assert_eq!(migrated.version, LATEST_VERSION);
        assert_eq!(migrated.systems[0].fluid, Some(FluidDef::default()));
    }
}
