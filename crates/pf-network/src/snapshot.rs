//! Point-in-time component state for external readers (HMI, historian).

use std::collections::BTreeMap;

use pf_components::{FlowElement, PumpKind, ValveKind};
use pf_core::units::{ft, gpm, kw, psi, to_m, to_m3ps, to_pa, to_w};
use serde::{Deserialize, Serialize};

use crate::component::Component;
use crate::network::Network;

/// Every component keyed by name, in imperial plant units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub components: BTreeMap<String, ComponentSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ComponentSnapshot {
    Tank {
        level_ft: f64,
        pressure_psi: f64,
        outlet_flow_gpm: f64,
    },
    Valve {
        valve_type: String,
        position: u8,
        cv: f64,
        inlet_pressure_psi: f64,
        inlet_flow_gpm: f64,
        delta_p_psi: f64,
        outlet_pressure_psi: f64,
        outlet_flow_gpm: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        setpoint_open_psi: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        setpoint_close_psi: Option<f64>,
    },
    Pump {
        pump_type: String,
        speed_rpm: u32,
        inlet_head_ft: f64,
        outlet_pressure_psi: f64,
        flow_gpm: f64,
        power_kw: f64,
    },
}

impl ComponentSnapshot {
    fn of(component: &Component) -> Self {
        match component {
            Component::Tank(t) => ComponentSnapshot::Tank {
                level_ft: t.level(),
                pressure_psi: t.static_pressure(),
                outlet_flow_gpm: t.outlet_flow(),
            },
            Component::Valve(v) => {
                let (open, close) = match v.kind() {
                    ValveKind::Relief {
                        setpoint_open,
                        setpoint_close,
                    } => (Some(setpoint_open), Some(setpoint_close)),
                    _ => (None, None),
                };
                ComponentSnapshot::Valve {
                    valve_type: v.kind().label().to_string(),
                    position: v.position(),
                    cv: v.cv(),
                    inlet_pressure_psi: v.press_in(),
                    inlet_flow_gpm: v.flow_in(),
                    delta_p_psi: v.delta_p(),
                    outlet_pressure_psi: v.press_out(),
                    outlet_flow_gpm: v.flow_out(),
                    setpoint_open_psi: open,
                    setpoint_close_psi: close,
                }
            }
            Component::Pump(p) => ComponentSnapshot::Pump {
                pump_type: match p.kind() {
                    PumpKind::Centrifugal => "centrifugal",
                    PumpKind::PositiveDisplacement { .. } => "positive_displacement",
                }
                .to_string(),
                speed_rpm: p.speed(),
                inlet_head_ft: p.head_in(),
                outlet_pressure_psi: p.press_out(),
                flow_gpm: p.flow(),
                power_kw: p.power(),
            },
        }
    }
}

impl Snapshot {
    pub(crate) fn capture(network: &Network) -> Self {
        let components = network
            .components()
            .map(|(_, c)| (c.name().to_string(), ComponentSnapshot::of(c)))
            .collect();
        Self { components }
    }

    pub fn get(&self, name: &str) -> Option<&ComponentSnapshot> {
        self.components.get(name)
    }

    /// Same snapshot in SI units (Pa, m, m³/s, W).
    pub fn to_si(&self) -> SiSnapshot {
        let components = self
            .components
            .iter()
            .map(|(name, c)| (name.clone(), SiComponentSnapshot::from(c)))
            .collect();
        SiSnapshot { components }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiSnapshot {
    pub components: BTreeMap<String, SiComponentSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SiComponentSnapshot {
    Tank {
        level_m: f64,
        pressure_pa: f64,
        outlet_flow_m3ps: f64,
    },
    Valve {
        valve_type: String,
        position: u8,
        inlet_pressure_pa: f64,
        inlet_flow_m3ps: f64,
        delta_p_pa: f64,
        outlet_pressure_pa: f64,
        outlet_flow_m3ps: f64,
    },
    Pump {
        pump_type: String,
        speed_rpm: u32,
        inlet_head_m: f64,
        outlet_pressure_pa: f64,
        flow_m3ps: f64,
        power_w: f64,
    },
}

impl From<&ComponentSnapshot> for SiComponentSnapshot {
    fn from(c: &ComponentSnapshot) -> Self {
        match c {
            ComponentSnapshot::Tank {
                level_ft,
                pressure_psi,
                outlet_flow_gpm,
            } => SiComponentSnapshot::Tank {
                level_m: to_m(ft(*level_ft)),
                pressure_pa: to_pa(psi(*pressure_psi)),
                outlet_flow_m3ps: to_m3ps(gpm(*outlet_flow_gpm)),
            },
            ComponentSnapshot::Valve {
                valve_type,
                position,
                inlet_pressure_psi,
                inlet_flow_gpm,
                delta_p_psi,
                outlet_pressure_psi,
                outlet_flow_gpm,
                ..
            } => SiComponentSnapshot::Valve {
                valve_type: valve_type.clone(),
                position: *position,
                inlet_pressure_pa: to_pa(psi(*inlet_pressure_psi)),
                inlet_flow_m3ps: to_m3ps(gpm(*inlet_flow_gpm)),
                delta_p_pa: to_pa(psi(*delta_p_psi)),
                outlet_pressure_pa: to_pa(psi(*outlet_pressure_psi)),
                outlet_flow_m3ps: to_m3ps(gpm(*outlet_flow_gpm)),
            },
            ComponentSnapshot::Pump {
                pump_type,
                speed_rpm,
                inlet_head_ft,
                outlet_pressure_psi,
                flow_gpm,
                power_kw,
            } => SiComponentSnapshot::Pump {
                pump_type: pump_type.clone(),
                speed_rpm: *speed_rpm,
                inlet_head_m: to_m(ft(*inlet_head_ft)),
                outlet_pressure_pa: to_pa(psi(*outlet_pressure_psi)),
                flow_m3ps: to_m3ps(gpm(*flow_gpm)),
                power_w: to_w(kw(*power_kw)),
            },
        }
    }
}
