//! Runs that store their final snapshot.

use std::path::PathBuf;

use pf_app::{AppError, RunRequest, list_records, run_system};
use pf_network::ComponentSnapshot;

fn project_path() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop();
    path.pop();
    path.push("topologies");
    path.push("simple_piping.yaml");
    path
}

#[test]
fn scenario_then_commands_saved_and_listed() {
    let temp_dir = std::env::temp_dir().join("pf_app_run_persistence");
    let _ = std::fs::remove_dir_all(&temp_dir);

    let project = project_path();
    let commands = vec!["turn throttle1 50".to_string()];
    let request = RunRequest {
        project_path: &project,
        system_id: "simple_piping",
        scenario_id: Some("startup"),
        commands: &commands,
        store_dir: Some(temp_dir.clone()),
    };
    let response = run_system(&request).unwrap();
    assert_eq!(response.steps.len(), 4);
    assert!(response.saved_to.as_ref().unwrap().exists());

    match response.record.snapshot.get("throttle1").unwrap() {
        ComponentSnapshot::Valve {
            position,
            outlet_flow_gpm,
            ..
        } => {
            assert_eq!(*position, 50);
            assert_eq!(*outlet_flow_gpm, 25.0);
        }
        other => panic!("unexpected snapshot {other:?}"),
    }

    // same inputs, same record id
    let again = run_system(&request).unwrap();
    assert_eq!(again.record.record_id, response.record.record_id);

    let records = list_records(&temp_dir, "simple_piping").unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].scenario.as_deref(), Some("startup"));
    assert_eq!(records[0].commands, commands);
}

#[test]
fn unknown_scenario_and_bad_command() {
    let project = project_path();
    let none: Vec<String> = vec![];
    let request = RunRequest {
        project_path: &project,
        system_id: "simple_piping",
        scenario_id: Some("meltdown"),
        commands: &none,
        store_dir: None,
    };
    assert!(matches!(
        run_system(&request),
        Err(AppError::ScenarioNotFound(_))
    ));

    let bad = vec!["turn throttle1 half".to_string()];
    let request = RunRequest {
        scenario_id: None,
        commands: &bad,
        ..request
    };
    assert!(matches!(
        run_system(&request),
        Err(AppError::Command { .. })
    ));
}
