//! Service layer against the bundled topologies.

use std::path::PathBuf;

use pf_app::{
    AppError, apply_action, compile_system, get_system, list_systems, load_project,
    parse_command, run_scenario, validate_project,
};
use pf_components::ValveState;
use pf_core::numeric::{Tolerances, nearly_equal};

fn topology(file: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop(); // go to crates
    path.pop(); // go to repo root
    path.push("topologies");
    path.push(file);
    path
}

fn tol() -> Tolerances {
    Tolerances::default()
}

fn loose() -> Tolerances {
    Tolerances::LOOSE
}

#[test]
fn load_and_list_systems() {
    let project = load_project(&topology("simple_piping.yaml")).unwrap();
    validate_project(&project).unwrap();

    let systems = list_systems(&project);
    assert_eq!(systems.len(), 1);
    assert_eq!(systems[0].id, "simple_piping");
    assert_eq!(systems[0].component_count, 9);
    assert_eq!(systems[0].connection_count, 8);
    assert_eq!(
        systems[0].scenario_ids,
        vec!["startup", "throttle", "relief_test"]
    );

    assert!(matches!(
        get_system(&project, "nope"),
        Err(AppError::SystemNotFound(_))
    ));
}

#[test]
fn missing_file_reports_path() {
    let err = load_project(&topology("does_not_exist.yaml")).unwrap_err();
    assert!(matches!(err, AppError::ProjectFileRead { .. }));
}

#[test]
fn simple_piping_startup_scenario() {
    let project = load_project(&topology("simple_piping.yaml")).unwrap();
    let system = get_system(&project, "simple_piping").unwrap();
    let mut rt = compile_system(system).unwrap();

    let steps = run_scenario(&mut rt, system.scenario("startup").unwrap()).unwrap();
    assert_eq!(steps.len(), 3);
    assert_eq!(steps[0].action, "Open");
    assert_eq!(steps[0].updated.len(), 8);
    assert_eq!(steps[0].updated[0], "pump1");

    let net = &rt.network;
    let v1 = net.valve(rt.resolve("valve1").unwrap()).unwrap();
    assert!(nearly_equal(v1.press_out(), 3.512111811131609, tol()));

    let p1 = net.pump(rt.resolve("pump1").unwrap()).unwrap();
    assert!(nearly_equal(p1.head_in(), 8.101304720057573, tol()));
    assert!(nearly_equal(p1.power(), 0.11777800491229948, tol()));

    let p2 = net.pump(rt.resolve("pump2").unwrap()).unwrap();
    assert!(nearly_equal(p2.head_in(), 23.542088964737797, tol()));
    assert!(nearly_equal(p2.flow(), 28.8, tol()));
    assert!(nearly_equal(p2.power(), 0.10753003776038036, tol()));

    let v4 = net.valve(rt.resolve("valve4").unwrap()).unwrap();
    assert!(nearly_equal(v4.press_out(), 28.098447673469387, tol()));
    assert_eq!(
        net.valve_state(rt.resolve("relief1").unwrap()).unwrap(),
        ValveState::Closed
    );
}

#[test]
fn simple_piping_throttle_scenario() {
    let project = load_project(&topology("simple_piping.yaml")).unwrap();
    let system = get_system(&project, "simple_piping").unwrap();
    let mut rt = compile_system(system).unwrap();
    run_scenario(&mut rt, system.scenario("throttle").unwrap()).unwrap();

    let t1 = rt.network.valve(rt.resolve("throttle1").unwrap()).unwrap();
    assert_eq!(t1.flow_out(), 25.0);
    assert!(nearly_equal(t1.delta_p(), 1.417233560090703, tol()));
    assert!(nearly_equal(t1.press_out(), 14.582766439909298, tol()));
    let p2 = rt.network.pump(rt.resolve("pump2").unwrap()).unwrap();
    assert!(nearly_equal(p2.head_in(), 33.5656366192537, tol()));
}

#[test]
fn relief_test_scenario_lifts_valve() {
    let project = load_project(&topology("simple_piping.yaml")).unwrap();
    let system = get_system(&project, "simple_piping").unwrap();
    let mut rt = compile_system(system).unwrap();
    run_scenario(&mut rt, system.scenario("relief_test").unwrap()).unwrap();

    let relief = rt.network.valve(rt.resolve("relief1").unwrap()).unwrap();
    assert_eq!(relief.state(), ValveState::Open);
    assert!(nearly_equal(relief.flow_out(), 28.8, tol()));
}

#[test]
fn fuel_farm_scenarios() {
    let project = load_project(&topology("fuel_farm.yaml")).unwrap();
    let system = get_system(&project, "fuel_farm").unwrap();

    let mut rt = compile_system(system).unwrap();
    let gate6 = rt.resolve("gate6").unwrap();
    assert!(nearly_equal(
        rt.network.valve(gate6).unwrap().flow_in(),
        2.0 * 19542.86939891452,
        loose()
    ));

    run_scenario(&mut rt, system.scenario("isolate_tank1").unwrap()).unwrap();
    let g6 = rt.network.valve(gate6).unwrap();
    assert!(nearly_equal(g6.flow_in(), 19542.86939891452, loose()));
    // gate3 is open but dry; the pressure comes from tank2 through gate4
    assert!(nearly_equal(g6.press_in(), 11.505771575259276, loose()));
    assert!(nearly_equal(g6.press_out(), 10.703731712138914, loose()));
    let pump1 = rt.network.pump(rt.resolve("pump1").unwrap()).unwrap();
    assert!(pump1.head_in() > 0.0);

    let mut rt = compile_system(system).unwrap();
    run_scenario(&mut rt, system.scenario("drain_tank2").unwrap()).unwrap();
    let tank2 = rt.network.tank(rt.resolve("tank2").unwrap()).unwrap();
    assert!(nearly_equal(tank2.static_pressure(), 6.5549256507499996, tol()));

    let mut rt = compile_system(system).unwrap();
    run_scenario(&mut rt, system.scenario("transfer").unwrap()).unwrap();
    let pump1 = rt.network.pump(rt.resolve("pump1").unwrap()).unwrap();
    assert_eq!(pump1.flow(), 150.0);
}

#[test]
fn failed_command_leaves_state_alone() {
    let project = load_project(&topology("simple_piping.yaml")).unwrap();
    let system = get_system(&project, "simple_piping").unwrap();
    let mut rt = compile_system(system).unwrap();
    let before = rt.network.snapshot();

    let partial_gate = parse_command("turn valve2 50").unwrap().unwrap();
    let err = apply_action(&mut rt, &partial_gate).unwrap_err();
    assert_eq!(err.class(), pf_core::ErrorClass::Validation);

    let wrong_kind = parse_command("speed valve2 100").unwrap().unwrap();
    let err = apply_action(&mut rt, &wrong_kind).unwrap_err();
    assert_eq!(err.class(), pf_core::ErrorClass::Topology);

    let unknown = parse_command("open valve9").unwrap().unwrap();
    assert!(matches!(
        apply_action(&mut rt, &unknown),
        Err(AppError::UnknownComponent(_))
    ));

    assert_eq!(before, rt.network.snapshot());
}
