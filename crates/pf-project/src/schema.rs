//! Project schema definitions.

use pf_core::formulas::{DEFAULT_ROUGHNESS, WATER_DENSITY, WATER_SPEC_GRAV};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub systems: Vec<SystemDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SystemDef {
    pub id: String,
    pub name: String,
    /// Required from version 1 on; version 0 files get water.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fluid: Option<FluidDef>,
    #[serde(default)]
    pub components: Vec<ComponentDef>,
    #[serde(default)]
    pub connections: Vec<ConnectionDef>,
    #[serde(default)]
    pub scenarios: Vec<ScenarioDef>,
}

impl SystemDef {
    pub fn component(&self, id: &str) -> Option<&ComponentDef> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn scenario(&self, id: &str) -> Option<&ScenarioDef> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    pub fn fluid_or_water(&self) -> FluidDef {
        self.fluid.clone().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FluidDef {
    #[serde(default = "default_density")]
    pub density_slug_ft3: f64,
    #[serde(default = "default_spec_grav")]
    pub spec_grav: f64,
}

impl Default for FluidDef {
    fn default() -> Self {
        Self {
            density_slug_ft3: WATER_DENSITY,
            spec_grav: WATER_SPEC_GRAV,
        }
    }
}

fn default_density() -> f64 {
    WATER_DENSITY
}

fn default_spec_grav() -> f64 {
    WATER_SPEC_GRAV
}

fn default_outlet_diameter() -> f64 {
    2.0
}

fn default_roughness() -> f64 {
    DEFAULT_ROUGHNESS
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComponentDef {
    pub id: String,
    pub name: String,
    pub kind: ComponentKind,
}

/// Boundary inlet for a valve nothing is wired into.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct InletDef {
    pub pressure_psi: f64,
    pub flow_gpm: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ComponentKind {
    Tank {
        #[serde(default)]
        level_ft: f64,
        #[serde(default = "default_outlet_diameter")]
        outlet_diameter_in: f64,
        #[serde(default)]
        outlet_slope: f64,
        #[serde(default = "default_roughness")]
        roughness: f64,
    },
    Gate {
        #[serde(default)]
        position: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cv: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pipe_diameter_in: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        inlet: Option<InletDef>,
    },
    Globe {
        #[serde(default)]
        position: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cv: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pipe_diameter_in: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        inlet: Option<InletDef>,
    },
    Relief {
        setpoint_open_psi: f64,
        setpoint_close_psi: f64,
        #[serde(default)]
        position: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cv: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pipe_diameter_in: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        inlet: Option<InletDef>,
    },
    CentrifugalPump {
        #[serde(default)]
        speed_rpm: i64,
        #[serde(default)]
        flow_gpm: f64,
        #[serde(default)]
        head_in_ft: f64,
        #[serde(default)]
        outlet_pressure_psi: f64,
    },
    PositiveDisplacementPump {
        displacement_gal_per_rev: f64,
        #[serde(default)]
        speed_rpm: i64,
        #[serde(default)]
        flow_gpm: f64,
        #[serde(default)]
        head_in_ft: f64,
        #[serde(default)]
        outlet_pressure_psi: f64,
    },
}

/// Valve fields shared by the three valve kinds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValveFields {
    pub position: i64,
    pub cv: Option<f64>,
    pub pipe_diameter_in: Option<f64>,
    pub inlet: Option<InletDef>,
}

impl ComponentKind {
    pub fn label(&self) -> &'static str {
        match self {
            ComponentKind::Tank { .. } => "Tank",
            ComponentKind::Gate { .. } => "Gate",
            ComponentKind::Globe { .. } => "Globe",
            ComponentKind::Relief { .. } => "Relief",
            ComponentKind::CentrifugalPump { .. } => "CentrifugalPump",
            ComponentKind::PositiveDisplacementPump { .. } => "PositiveDisplacementPump",
        }
    }

    pub fn is_tank(&self) -> bool {
        matches!(self, ComponentKind::Tank { .. })
    }

    pub fn is_pump(&self) -> bool {
        matches!(
            self,
            ComponentKind::CentrifugalPump { .. } | ComponentKind::PositiveDisplacementPump { .. }
        )
    }

    pub fn valve_fields(&self) -> Option<ValveFields> {
        match *self {
            ComponentKind::Gate {
                position,
                cv,
                pipe_diameter_in,
                inlet,
            }
            | ComponentKind::Globe {
                position,
                cv,
                pipe_diameter_in,
                inlet,
            }
            | ComponentKind::Relief {
                position,
                cv,
                pipe_diameter_in,
                inlet,
                ..
            } => Some(ValveFields {
                position,
                cv,
                pipe_diameter_in,
                inlet,
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConnectionDef {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub steps: Vec<ActionDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action")]
pub enum ActionDef {
    Open {
        component: String,
    },
    Close {
        component: String,
    },
    TurnHandle {
        component: String,
        position: i64,
    },
    AdjustSpeed {
        component: String,
        speed_rpm: i64,
    },
    SetSpeed {
        component: String,
        speed_rpm: i64,
    },
    StartPump {
        component: String,
        speed_rpm: i64,
        flow_gpm: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        outlet_pressure_psi: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        outlet_head_ft: Option<f64>,
    },
    SetLevel {
        component: String,
        level_ft: f64,
    },
    Evaluate {
        component: String,
        pressure_psi: f64,
    },
    SetReliefSetpoints {
        component: String,
        setpoint_open_psi: f64,
        setpoint_close_psi: f64,
    },
    SetInlet {
        component: String,
        pressure_psi: f64,
        flow_gpm: f64,
    },
}

impl ActionDef {
    pub fn component(&self) -> &str {
        match self {
            ActionDef::Open { component }
            | ActionDef::Close { component }
            | ActionDef::TurnHandle { component, .. }
            | ActionDef::AdjustSpeed { component, .. }
            | ActionDef::SetSpeed { component, .. }
            | ActionDef::StartPump { component, .. }
            | ActionDef::SetLevel { component, .. }
            | ActionDef::Evaluate { component, .. }
            | ActionDef::SetReliefSetpoints { component, .. }
            | ActionDef::SetInlet { component, .. } => component,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActionDef::Open { .. } => "Open",
            ActionDef::Close { .. } => "Close",
            ActionDef::TurnHandle { .. } => "TurnHandle",
            ActionDef::AdjustSpeed { .. } => "AdjustSpeed",
            ActionDef::SetSpeed { .. } => "SetSpeed",
            ActionDef::StartPump { .. } => "StartPump",
            ActionDef::SetLevel { .. } => "SetLevel",
            ActionDef::Evaluate { .. } => "Evaluate",
            ActionDef::SetReliefSetpoints { .. } => "SetReliefSetpoints",
            ActionDef::SetInlet { .. } => "SetInlet",
        }
    }
}
