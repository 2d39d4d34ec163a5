//! Project validation logic.

use crate::schema::{ActionDef, ComponentDef, ComponentKind, FluidDef, Project, SystemDef};
use std::collections::{HashMap, HashSet};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported feature: {feature} - {reason}")]
    Unsupported { feature: String, reason: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    let mut system_ids = HashSet::new();
    for system in &project.systems {
        if !system_ids.insert(&system.id) {
            return Err(ValidationError::DuplicateId {
                id: system.id.clone(),
                context: "systems".to_string(),
            });
        }
        validate_system(system, project.version)?;
    }

    Ok(())
}

fn validate_system(system: &SystemDef, version: u32) -> Result<(), ValidationError> {
    match &system.fluid {
        Some(fluid) => validate_fluid(fluid, &system.name)?,
        None if version >= 1 => {
            return Err(ValidationError::MissingReference {
                id: "fluid".to_string(),
                context: format!("system '{}'", system.name),
            });
        }
        None => {}
    }

    let mut kinds: HashMap<&str, &ComponentKind> = HashMap::new();
    for component in &system.components {
        if kinds.insert(component.id.as_str(), &component.kind).is_some() {
            return Err(ValidationError::DuplicateId {
                id: component.id.clone(),
                context: format!("system '{}' components", system.name),
            });
        }
        validate_component(component)?;
    }

    for conn in &system.connections {
        for id in [&conn.from, &conn.to] {
            if !kinds.contains_key(id.as_str()) {
                return Err(ValidationError::MissingReference {
                    id: id.clone(),
                    context: format!("system '{}' connections", system.name),
                });
            }
        }
    }

    let mut scenario_ids = HashSet::new();
    for scenario in &system.scenarios {
        if !scenario_ids.insert(&scenario.id) {
            return Err(ValidationError::DuplicateId {
                id: scenario.id.clone(),
                context: format!("system '{}' scenarios", system.name),
            });
        }
        for (i, step) in scenario.steps.iter().enumerate() {
            let context = format!("scenario '{}' step {}", scenario.id, i + 1);
            let kind = kinds.get(step.component()).ok_or_else(|| {
                ValidationError::MissingReference {
                    id: step.component().to_string(),
                    context: context.clone(),
                }
            })?;
            validate_action(step, kind, &context)?;
        }
    }

    Ok(())
}

fn validate_fluid(fluid: &FluidDef, system: &str) -> Result<(), ValidationError> {
    for (field, value) in [
        ("density_slug_ft3", fluid.density_slug_ft3),
        ("spec_grav", fluid.spec_grav),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(invalid(
                format!("system '{}' fluid.{}", system, field),
                value,
                "must be finite and > 0",
            ));
        }
    }
    Ok(())
}

fn invalid(field: String, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn check_finite(id: &str, field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(format!("{}.{}", id, field), value, "must be finite"))
    }
}

fn check_speed(id: &str, speed: i64) -> Result<(), ValidationError> {
    if speed < 0 || speed > i64::from(u32::MAX) {
        return Err(invalid(format!("{}.speed_rpm", id), speed, "must be >= 0"));
    }
    Ok(())
}

fn check_position(id: &str, kind: &ComponentKind, position: i64) -> Result<(), ValidationError> {
    if !(0..=100).contains(&position) {
        return Err(invalid(
            format!("{}.position", id),
            position,
            "must be within 0..=100",
        ));
    }
    if matches!(kind, ComponentKind::Gate { .. }) && position != 0 && position != 100 {
        return Err(invalid(
            format!("{}.position", id),
            position,
            "gate valves are either 0 or 100",
        ));
    }
    Ok(())
}

fn validate_component(component: &ComponentDef) -> Result<(), ValidationError> {
    let id = component.id.as_str();
    match &component.kind {
        ComponentKind::Tank {
            level_ft,
            outlet_diameter_in,
            outlet_slope,
            roughness,
        } => {
            check_finite(id, "level_ft", *level_ft)?;
            if *level_ft < 0.0 {
                return Err(invalid(
                    format!("{}.level_ft", id),
                    level_ft,
                    "must be >= 0",
                ));
            }
            check_finite(id, "outlet_diameter_in", *outlet_diameter_in)?;
            check_finite(id, "outlet_slope", *outlet_slope)?;
            check_finite(id, "roughness", *roughness)?;
        }
        ComponentKind::Gate { .. } | ComponentKind::Globe { .. } | ComponentKind::Relief { .. } => {
            if let ComponentKind::Relief {
                setpoint_open_psi,
                setpoint_close_psi,
                ..
            } = &component.kind
            {
                check_finite(id, "setpoint_open_psi", *setpoint_open_psi)?;
                check_finite(id, "setpoint_close_psi", *setpoint_close_psi)?;
            }
            if let Some(v) = component.kind.valve_fields() {
                check_position(id, &component.kind, v.position)?;
                match (v.cv, v.pipe_diameter_in) {
                    (Some(_), Some(_)) => {
                        return Err(invalid(
                            format!("{}.cv", id),
                            "cv and pipe_diameter_in",
                            "give one or the other",
                        ));
                    }
                    (Some(cv), None) => {
                        check_finite(id, "cv", cv)?;
                        if cv <= 0.0 {
                            return Err(invalid(format!("{}.cv", id), cv, "must be > 0"));
                        }
                    }
                    (None, Some(d)) => {
                        check_finite(id, "pipe_diameter_in", d)?;
                        if d == 0.0 {
                            return Err(invalid(
                                format!("{}.pipe_diameter_in", id),
                                d,
                                "gives a zero valve coefficient",
                            ));
                        }
                    }
                    (None, None) => {}
                }
                if let Some(inlet) = v.inlet {
                    check_finite(id, "inlet.pressure_psi", inlet.pressure_psi)?;
                    check_finite(id, "inlet.flow_gpm", inlet.flow_gpm)?;
                }
            }
        }
        ComponentKind::CentrifugalPump {
            speed_rpm,
            flow_gpm,
            head_in_ft,
            outlet_pressure_psi,
        } => {
            check_speed(id, *speed_rpm)?;
            check_finite(id, "flow_gpm", *flow_gpm)?;
            check_finite(id, "head_in_ft", *head_in_ft)?;
            check_finite(id, "outlet_pressure_psi", *outlet_pressure_psi)?;
        }
        ComponentKind::PositiveDisplacementPump {
            displacement_gal_per_rev,
            speed_rpm,
            flow_gpm,
            head_in_ft,
            outlet_pressure_psi,
        } => {
            check_finite(id, "displacement_gal_per_rev", *displacement_gal_per_rev)?;
            if *displacement_gal_per_rev < 0.0 {
                return Err(invalid(
                    format!("{}.displacement_gal_per_rev", id),
                    displacement_gal_per_rev,
                    "must be >= 0",
                ));
            }
            check_speed(id, *speed_rpm)?;
            check_finite(id, "flow_gpm", *flow_gpm)?;
            check_finite(id, "head_in_ft", *head_in_ft)?;
            check_finite(id, "outlet_pressure_psi", *outlet_pressure_psi)?;
        }
    }
    Ok(())
}

fn wrong_target(action: &ActionDef, kind: &ComponentKind, context: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: format!("{} action", context),
        value: action.label().to_string(),
        reason: format!("cannot be applied to a {}", kind.label()),
    }
}

fn validate_action(
    action: &ActionDef,
    kind: &ComponentKind,
    context: &str,
) -> Result<(), ValidationError> {
    let is_valve = kind.valve_fields().is_some();
    let is_relief = matches!(kind, ComponentKind::Relief { .. });
    let ok = match action {
        ActionDef::Open { .. } | ActionDef::Close { .. } => is_valve,
        ActionDef::TurnHandle { position, .. } => {
            if is_valve && !is_relief {
                check_position(context, kind, *position)?;
                true
            } else {
                false
            }
        }
        ActionDef::AdjustSpeed { speed_rpm, .. } | ActionDef::SetSpeed { speed_rpm, .. } => {
            check_speed(context, *speed_rpm)?;
            kind.is_pump()
        }
        ActionDef::StartPump {
            speed_rpm,
            flow_gpm,
            outlet_pressure_psi,
            outlet_head_ft,
            ..
        } => {
            check_speed(context, *speed_rpm)?;
            check_finite(context, "flow_gpm", *flow_gpm)?;
            match (outlet_pressure_psi, outlet_head_ft) {
                (Some(p), None) => check_finite(context, "outlet_pressure_psi", *p)?,
                (None, Some(h)) => check_finite(context, "outlet_head_ft", *h)?,
                _ => {
                    return Err(invalid(
                        format!("{} outlet", context),
                        "outlet_pressure_psi/outlet_head_ft",
                        "give exactly one",
                    ));
                }
            }
            matches!(kind, ComponentKind::CentrifugalPump { .. })
        }
        ActionDef::SetLevel { level_ft, .. } => {
            check_finite(context, "level_ft", *level_ft)?;
            kind.is_tank()
        }
        ActionDef::Evaluate { pressure_psi, .. } => {
            check_finite(context, "pressure_psi", *pressure_psi)?;
            is_relief
        }
        ActionDef::SetReliefSetpoints {
            setpoint_open_psi,
            setpoint_close_psi,
            ..
        } => {
            check_finite(context, "setpoint_open_psi", *setpoint_open_psi)?;
            check_finite(context, "setpoint_close_psi", *setpoint_close_psi)?;
            is_relief
        }
        ActionDef::SetInlet {
            pressure_psi,
            flow_gpm,
            ..
        } => {
            check_finite(context, "pressure_psi", *pressure_psi)?;
            check_finite(context, "flow_gpm", *flow_gpm)?;
            !kind.is_tank()
        }
    };
    if ok {
        Ok(())
    } else {
        Err(wrong_target(action, kind, context))
    }
}
