//! Closed set of components a network can own.

use pf_components::{ComponentResult, FlowElement, Pump, Tank, Valve};
use pf_graph::NodeRole;

#[derive(Debug, Clone)]
pub enum Component {
    Tank(Tank),
    Valve(Valve),
    Pump(Pump),
}

impl Component {
    pub fn kind_label(&self) -> &'static str {
        match self {
            Component::Tank(_) => "tank",
            Component::Valve(_) => "valve",
            Component::Pump(_) => "pump",
        }
    }

    pub(crate) fn role(&self) -> NodeRole {
        match self {
            Component::Tank(_) => NodeRole::Source,
            _ => NodeRole::Inline,
        }
    }

    pub fn as_tank(&self) -> Option<&Tank> {
        match self {
            Component::Tank(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_valve(&self) -> Option<&Valve> {
        match self {
            Component::Valve(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_pump(&self) -> Option<&Pump> {
        match self {
            Component::Pump(p) => Some(p),
            _ => None,
        }
    }

    fn element(&self) -> &dyn FlowElement {
        match self {
            Component::Tank(t) => t,
            Component::Valve(v) => v,
            Component::Pump(p) => p,
        }
    }

    fn element_mut(&mut self) -> &mut dyn FlowElement {
        match self {
            Component::Tank(t) => t,
            Component::Valve(v) => v,
            Component::Pump(p) => p,
        }
    }
}

impl FlowElement for Component {
    fn name(&self) -> &str {
        self.element().name()
    }

    fn outlet_pressure(&self) -> f64 {
        self.element().outlet_pressure()
    }

    fn outlet_flow(&self) -> f64 {
        self.element().outlet_flow()
    }

    fn is_passing(&self) -> bool {
        self.element().is_passing()
    }

    fn is_delivering(&self) -> bool {
        self.element().is_delivering()
    }

    fn update_inlet(&mut self, pressure: f64, flow: f64) -> ComponentResult<()> {
        self.element_mut().update_inlet(pressure, flow)
    }
}
