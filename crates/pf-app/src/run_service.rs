//! Run execution and snapshot persistence.

use std::path::{Path, PathBuf};

use pf_results::{SnapshotRecord, SnapshotStore, compute_record_id};
use tracing::info;

use crate::command::parse_script;
use crate::error::{AppError, AppResult};
use crate::project_service;
use crate::runtime_compile::compile_system;
use crate::scenario::{StepOutcome, apply_all, run_scenario};

/// Request to execute a run.
pub struct RunRequest<'a> {
    pub project_path: &'a Path,
    pub system_id: &'a str,
    /// Scenario applied first, if any.
    pub scenario_id: Option<&'a str>,
    /// Command lines applied after the scenario.
    pub commands: &'a [String],
    /// Directory to store the resulting record in.
    pub store_dir: Option<PathBuf>,
}

/// Response from a run execution.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub record: SnapshotRecord,
    pub steps: Vec<StepOutcome>,
    pub saved_to: Option<PathBuf>,
}

/// Compile the system, apply the scenario and commands, snapshot the result.
pub fn run_system(request: &RunRequest) -> AppResult<RunResponse> {
    let project = project_service::load_project(request.project_path)?;
    let system = project_service::get_system(&project, request.system_id)?;

    let scenario = match request.scenario_id {
        Some(id) => Some(
            system
                .scenario(id)
                .ok_or_else(|| AppError::ScenarioNotFound(id.to_string()))?,
        ),
        None => None,
    };
    let actions = parse_script(request.commands.iter().map(String::as_str))?;

    let mut runtime = compile_system(system)?;
    let mut steps = Vec::new();
    if let Some(scenario) = scenario {
        steps.extend(run_scenario(&mut runtime, scenario)?);
    }
    steps.extend(apply_all(&mut runtime, &actions)?);

    let record = SnapshotRecord {
        record_id: compute_record_id(system, scenario, request.commands)?,
        system_id: system.id.clone(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        scenario: scenario.map(|s| s.id.clone()),
        commands: request.commands.to_vec(),
        snapshot: runtime.network.snapshot(),
    };

    let saved_to = match &request.store_dir {
        Some(dir) => {
            let store = SnapshotStore::new(dir.clone())?;
            let path = store.save(&record)?;
            info!(record_id = %record.record_id, path = %path.display(), "snapshot saved");
            Some(path)
        }
        None => None,
    };

    Ok(RunResponse {
        record,
        steps,
        saved_to,
    })
}

/// Stored records for a system, oldest first.
pub fn list_records(store_dir: &Path, system_id: &str) -> AppResult<Vec<SnapshotRecord>> {
    let store = SnapshotStore::new(store_dir.to_path_buf())?;
    Ok(store.list(system_id)?)
}
