//! Runtime compilation of SystemDef into a live network.

use std::collections::HashMap;

use pf_components::common::{check_position, check_speed};
use pf_components::{PumpConfig, TankConfig, ValveConfig};
use pf_core::CompId;
use pf_core::formulas::valve_coefficient;
use pf_network::{Network, NetworkBuilder};
use pf_project::schema::{ComponentDef, ComponentKind, FluidDef, SystemDef, ValveFields};
use tracing::debug;

use crate::error::{AppError, AppResult};

/// Runtime representation of a compiled system.
pub struct SystemRuntime {
    pub system_id: String,
    pub network: Network,
    /// Definition id to network handle.
    pub comp_id_map: HashMap<String, CompId>,
}

impl SystemRuntime {
    pub fn resolve(&self, component_id: &str) -> AppResult<CompId> {
        self.comp_id_map
            .get(component_id)
            .copied()
            .ok_or_else(|| AppError::UnknownComponent(component_id.to_string()))
    }
}

/// Compile a system definition into a settled network.
pub fn compile_system(system: &SystemDef) -> AppResult<SystemRuntime> {
    let fluid = system.fluid_or_water();
    let mut builder = NetworkBuilder::new();
    let mut comp_id_map = HashMap::new();

    for component in &system.components {
        let id = add_component(&mut builder, component, &fluid)?;
        comp_id_map.insert(component.id.clone(), id);
    }

    for connection in &system.connections {
        let from = *comp_id_map.get(&connection.from).ok_or_else(|| {
            AppError::Compile(format!("Component not found: {}", connection.from))
        })?;
        let to = *comp_id_map.get(&connection.to).ok_or_else(|| {
            AppError::Compile(format!("Component not found: {}", connection.to))
        })?;
        builder.connect(from, to);
    }

    let network = builder.build()?;
    debug!(system = %system.id, components = comp_id_map.len(), "system compiled");

    Ok(SystemRuntime {
        system_id: system.id.clone(),
        network,
        comp_id_map,
    })
}

fn add_component(
    builder: &mut NetworkBuilder,
    component: &ComponentDef,
    fluid: &FluidDef,
) -> AppResult<CompId> {
    let name = component.name.clone();
    let id = match &component.kind {
        ComponentKind::Tank {
            level_ft,
            outlet_diameter_in,
            outlet_slope,
            roughness,
        } => builder.add_tank(TankConfig {
            level: *level_ft,
            density: fluid.density_slug_ft3,
            spec_grav: fluid.spec_grav,
            outlet_diameter: *outlet_diameter_in,
            outlet_slope: *outlet_slope,
            roughness: *roughness,
            ..TankConfig::new(name)
        }),
        ComponentKind::Gate { .. } => {
            builder.add_gate(valve_config(ValveConfig::gate(name), &component.kind, fluid)?)
        }
        ComponentKind::Globe { .. } => {
            builder.add_globe(valve_config(ValveConfig::globe(name), &component.kind, fluid)?)
        }
        ComponentKind::Relief {
            setpoint_open_psi,
            setpoint_close_psi,
            ..
        } => {
            let base = ValveConfig::relief(name, *setpoint_open_psi, *setpoint_close_psi);
            builder.add_valve(valve_config(base, &component.kind, fluid)?)
        }
        ComponentKind::CentrifugalPump {
            speed_rpm,
            flow_gpm,
            head_in_ft,
            outlet_pressure_psi,
        } => builder.add_centrifugal(PumpConfig {
            speed: check_speed(*speed_rpm)?,
            flow: *flow_gpm,
            head_in: *head_in_ft,
            press_out: *outlet_pressure_psi,
            spec_grav: fluid.spec_grav,
            ..PumpConfig::centrifugal(name)
        }),
        ComponentKind::PositiveDisplacementPump {
            displacement_gal_per_rev,
            speed_rpm,
            flow_gpm,
            head_in_ft,
            outlet_pressure_psi,
        } => builder.add_positive_displacement(
            PumpConfig {
                speed: check_speed(*speed_rpm)?,
                flow: *flow_gpm,
                head_in: *head_in_ft,
                press_out: *outlet_pressure_psi,
                spec_grav: fluid.spec_grav,
                ..PumpConfig::centrifugal(name)
            },
            *displacement_gal_per_rev,
        ),
    };
    Ok(id)
}

/// Fill the shared valve fields; Cv comes from `cv`, else the pipe bore,
/// else the 2 in default the config already carries.
fn valve_config(
    base: ValveConfig,
    kind: &ComponentKind,
    fluid: &FluidDef,
) -> AppResult<ValveConfig> {
    let Some(ValveFields {
        position,
        cv,
        pipe_diameter_in,
        inlet,
    }) = kind.valve_fields()
    else {
        return Err(AppError::Compile(format!("{} is not a valve", kind.label())));
    };

    let mut config = base
        .with_position(check_position(position)?)
        .with_spec_grav(fluid.spec_grav);
    match (cv, pipe_diameter_in) {
        (Some(cv), _) => config = config.with_cv(cv),
        (None, Some(diameter)) => config = config.with_cv(valve_coefficient(diameter)?),
        (None, None) => {}
    }
    if let Some(inlet) = inlet {
        config = config.with_inlet(inlet.pressure_psi, inlet.flow_gpm);
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_project::schema::{ComponentDef, ConnectionDef};

    fn def(id: &str, kind: ComponentKind) -> ComponentDef {
        ComponentDef {
            id: id.to_string(),
            name: id.to_string(),
            kind,
        }
    }

    fn gate(cv: Option<f64>, pipe_diameter_in: Option<f64>) -> ComponentKind {
        ComponentKind::Gate {
            position: 100,
            cv,
            pipe_diameter_in,
            inlet: None,
        }
    }

    fn system(components: Vec<ComponentDef>, connections: Vec<ConnectionDef>) -> SystemDef {
        SystemDef {
            id: "sys".to_string(),
            name: "sys".to_string(),
            fluid: None,
            components,
            connections,
            scenarios: vec![],
        }
    }

    #[test]
    fn cv_from_bore_or_default() {
        let sys = system(
            vec![
                def("a", gate(Some(42.0), None)),
                def("b", gate(None, Some(3.0))),
                def("c", gate(None, None)),
            ],
            vec![],
        );
        let rt = compile_system(&sys).unwrap();
        let cv = |id: &str| rt.network.valve(rt.resolve(id).unwrap()).unwrap().cv();
        assert_eq!(cv("a"), 42.0);
        assert_eq!(cv("b"), 135.0);
        assert_eq!(cv("c"), 60.0);
    }

    #[test]
    fn dangling_connection_is_compile_error() {
        let sys = system(
            vec![def("a", gate(None, None))],
            vec![ConnectionDef {
                from: "a".to_string(),
                to: "ghost".to_string(),
            }],
        );
        assert!(matches!(compile_system(&sys), Err(AppError::Compile(_))));
    }

    #[test]
    fn cycle_surfaces_as_network_error() {
        let sys = system(
            vec![def("a", gate(None, None)), def("b", gate(None, None))],
            vec![
                ConnectionDef {
                    from: "a".to_string(),
                    to: "b".to_string(),
                },
                ConnectionDef {
                    from: "b".to_string(),
                    to: "a".to_string(),
                },
            ],
        );
        let err = compile_system(&sys).err().unwrap();
        assert_eq!(err.class(), pf_core::ErrorClass::Topology);
    }
}
