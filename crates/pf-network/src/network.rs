//! The network: a validated graph that owns its components.

use pf_components::{FlowElement, OutletPressure, Pump, Tank, Valve, ValveState};
use pf_core::CompId;
use pf_graph::Graph;

use crate::component::Component;
use crate::error::{NetworkError, NetworkResult};
use crate::propagate::Propagation;
use crate::snapshot::Snapshot;

/// A wired set of tanks, valves and pumps.
///
/// Every mutator changes one component, then pushes the new outlet values
/// downstream. If anything along the way fails the whole network is restored
/// to its state before the call.
#[derive(Debug, Clone)]
pub struct Network {
    pub(crate) graph: Graph,
    pub(crate) components: Vec<Component>,
}

impl Network {
    pub(crate) fn new(graph: Graph, components: Vec<Component>) -> Self {
        Self { graph, components }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// All components in insertion order, paired with their IDs.
    pub fn components(&self) -> impl Iterator<Item = (CompId, &Component)> + '_ {
        self.components
            .iter()
            .enumerate()
            .map(|(i, c)| (CompId::from_index(i as u32), c))
    }

    pub fn component(&self, id: CompId) -> NetworkResult<&Component> {
        self.components
            .get(id.index() as usize)
            .ok_or(NetworkError::UnknownComponent { id })
    }

    pub(crate) fn component_mut(&mut self, id: CompId) -> NetworkResult<&mut Component> {
        self.components
            .get_mut(id.index() as usize)
            .ok_or(NetworkError::UnknownComponent { id })
    }

    pub fn id_of(&self, name: &str) -> Option<CompId> {
        self.graph.find(name)
    }

    /// Like [`Network::id_of`] but an unknown name is an error.
    pub fn resolve(&self, name: &str) -> NetworkResult<CompId> {
        self.id_of(name).ok_or_else(|| NetworkError::UnknownName {
            name: name.to_string(),
        })
    }

    pub fn name_of(&self, id: CompId) -> NetworkResult<&str> {
        Ok(self.component(id)?.name())
    }

    pub fn tank(&self, id: CompId) -> NetworkResult<&Tank> {
        let c = self.component(id)?;
        c.as_tank().ok_or_else(|| wrong_kind(c, "tank"))
    }

    pub fn valve(&self, id: CompId) -> NetworkResult<&Valve> {
        let c = self.component(id)?;
        c.as_valve().ok_or_else(|| wrong_kind(c, "valve"))
    }

    pub fn pump(&self, id: CompId) -> NetworkResult<&Pump> {
        let c = self.component(id)?;
        c.as_pump().ok_or_else(|| wrong_kind(c, "pump"))
    }

    fn tank_mut(&mut self, id: CompId) -> NetworkResult<&mut Tank> {
        match self.component_mut(id)? {
            Component::Tank(t) => Ok(t),
            other => Err(wrong_kind(other, "tank")),
        }
    }

    fn valve_mut(&mut self, id: CompId) -> NetworkResult<&mut Valve> {
        match self.component_mut(id)? {
            Component::Valve(v) => Ok(v),
            other => Err(wrong_kind(other, "valve")),
        }
    }

    fn pump_mut(&mut self, id: CompId) -> NetworkResult<&mut Pump> {
        match self.component_mut(id)? {
            Component::Pump(p) => Ok(p),
            other => Err(wrong_kind(other, "pump")),
        }
    }

    /// Point-in-time copy of every component's state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }

    /// Apply `change`, then propagate from `origin`; roll back on any error.
    fn transact(
        &mut self,
        origin: CompId,
        change: impl FnOnce(&mut Self) -> NetworkResult<()>,
    ) -> NetworkResult<Propagation> {
        self.component(origin)?;
        let saved = self.components.clone();
        let result = change(self).and_then(|()| self.propagate_from(origin));
        if result.is_err() {
            self.components = saved;
        }
        result
    }

    /// Re-push a component's current outlet values downstream.
    pub fn propagate(&mut self, id: CompId) -> NetworkResult<Propagation> {
        self.transact(id, |_| Ok(()))
    }

    pub fn open(&mut self, id: CompId) -> NetworkResult<Propagation> {
        self.transact(id, |net| Ok(net.valve_mut(id)?.open()?))
    }

    pub fn close(&mut self, id: CompId) -> NetworkResult<Propagation> {
        self.transact(id, |net| {
            net.valve_mut(id)?.close();
            Ok(())
        })
    }

    pub fn turn_handle(&mut self, id: CompId, position: i64) -> NetworkResult<Propagation> {
        self.transact(id, |net| Ok(net.valve_mut(id)?.turn_handle(position)?))
    }

    /// Feed a relief valve a pressure reading and let it actuate.
    pub fn evaluate(&mut self, id: CompId, pressure: f64) -> NetworkResult<Propagation> {
        self.transact(id, |net| {
            net.valve_mut(id)?.evaluate(pressure)?;
            Ok(())
        })
    }

    /// Replace both relief setpoints, then re-check the valve against its
    /// current inlet pressure.
    pub fn set_relief_setpoints(
        &mut self,
        id: CompId,
        setpoint_open: f64,
        setpoint_close: f64,
    ) -> NetworkResult<Propagation> {
        self.transact(id, |net| {
            let valve = net.valve_mut(id)?;
            valve.set_open_pressure(setpoint_open)?;
            valve.set_blowdown(setpoint_close)?;
            let (p, q) = (valve.press_in(), valve.flow_in());
            valve.update_inlet(p, q)?;
            Ok(())
        })
    }

    pub fn adjust_speed(&mut self, id: CompId, speed: i64) -> NetworkResult<Propagation> {
        self.transact(id, |net| Ok(net.pump_mut(id)?.adjust_speed(speed)?))
    }

    pub fn set_speed(&mut self, id: CompId, speed: i64) -> NetworkResult<Propagation> {
        self.transact(id, |net| Ok(net.pump_mut(id)?.set_speed(speed)?))
    }

    pub fn start_pump(
        &mut self,
        id: CompId,
        speed: i64,
        flow: f64,
        outlet: OutletPressure,
    ) -> NetworkResult<Propagation> {
        self.transact(id, |net| {
            Ok(net.pump_mut(id)?.start_pump(speed, flow, outlet)?)
        })
    }

    pub fn set_level(&mut self, id: CompId, level: f64) -> NetworkResult<Propagation> {
        self.transact(id, |net| Ok(net.tank_mut(id)?.set_level(level)?))
    }

    /// Set the inlet of a component nothing is wired into.
    pub fn set_inlet(
        &mut self,
        id: CompId,
        pressure: f64,
        flow: f64,
    ) -> NetworkResult<Propagation> {
        if !self.graph.is_root(id) {
            return Err(NetworkError::NotBoundary {
                name: self.name_of(id)?.to_string(),
            });
        }
        self.transact(id, |net| {
            Ok(net.component_mut(id)?.update_inlet(pressure, flow)?)
        })
    }

    /// Reported position of a valve.
    pub fn valve_state(&self, id: CompId) -> NetworkResult<ValveState> {
        Ok(self.valve(id)?.state())
    }
}

fn wrong_kind(c: &Component, expected: &'static str) -> NetworkError {
    NetworkError::WrongKind {
        name: c.name().to_string(),
        expected,
        actual: c.kind_label(),
    }
}
