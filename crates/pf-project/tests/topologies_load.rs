use std::path::Path;

#[test]
fn bundled_topologies_load_and_validate() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../topologies");
    let files = ["simple_piping.yaml", "fuel_farm.yaml"];

    for name in files {
        let path = root.join(name);
        let project = pf_project::load_yaml(&path)
            .unwrap_or_else(|e| panic!("Failed to load {}: {}", name, e));
        pf_project::validate_project(&project)
            .unwrap_or_else(|e| panic!("Failed to validate {}: {}", name, e));
        assert_eq!(project.systems.len(), 1);
    }
}

#[test]
fn fuel_farm_shape() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../topologies");
    let project = pf_project::load_yaml(&root.join("fuel_farm.yaml")).unwrap();
    let system = &project.systems[0];
    assert_eq!(system.components.len(), 10);
    assert_eq!(system.connections.len(), 9);
    assert!(system.component("tank1").unwrap().kind.is_tank());
    assert_eq!(system.fluid_or_water().spec_grav, 0.84);
    assert!(system.scenario("isolate_tank1").is_some());
}
