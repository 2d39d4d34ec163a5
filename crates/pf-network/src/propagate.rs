//! Downstream propagation.
//!
//! After a component changes, each component wired to its outlet is visited
//! depth first, in the order the connections were made. A visited component
//! re-reads its inlet from *every* component feeding it, so a manifold fed by
//! two branches always sees both.

use pf_components::FlowElement;
use pf_core::numeric::{Tolerances, nearly_equal};
use pf_core::CompId;
use tracing::{debug, warn};

use crate::error::NetworkResult;
use crate::network::Network;

/// Merged inlet conditions for one component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inlet {
    /// psi
    pub pressure: f64,
    /// gpm
    pub flow: f64,
}

impl Inlet {
    pub const ZERO: Inlet = Inlet {
        pressure: 0.0,
        flow: 0.0,
    };
}

/// Record of one propagation: where it started and every component updated,
/// in call order. A component fed by several updated branches appears once
/// per visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Propagation {
    pub origin: CompId,
    pub updated: Vec<CompId>,
}

impl Propagation {
    /// Names of the updated components, in call order.
    pub fn names<'a>(&self, network: &'a Network) -> Vec<&'a str> {
        self.updated
            .iter()
            .filter_map(|id| network.name_of(*id).ok())
            .collect()
    }
}

impl Network {
    /// Merge the outlets of everything feeding `id`.
    ///
    /// Flow is the sum over passing upstream components. Pressure is taken
    /// from the first *delivering* upstream in connection order, so an open
    /// branch on a dry line cannot pull the manifold down to zero. When no
    /// branch delivers, the first passing one sets the pressure. With nothing
    /// passing the inlet is zero.
    pub fn gather_inlet(&self, id: CompId) -> Inlet {
        let mut flow = 0.0;
        let mut pressure: Option<f64> = None;
        let mut idle_pressure: Option<f64> = None;

        for up in self.graph.upstream(id) {
            let Some(src) = self.components.get(up.index() as usize) else {
                continue;
            };
            if !src.is_passing() {
                continue;
            }
            flow += src.outlet_flow();
            if !src.is_delivering() {
                if idle_pressure.is_none() {
                    idle_pressure = Some(src.outlet_pressure());
                }
                continue;
            }
            match pressure {
                None => pressure = Some(src.outlet_pressure()),
                Some(p) if !nearly_equal(p, src.outlet_pressure(), Tolerances::MERGE_PRESSURE) => {
                    warn!(
                        manifold = self.name_of(id).unwrap_or("?"),
                        branch = src.name(),
                        kept = p,
                        ignored = src.outlet_pressure(),
                        "branch pressures disagree at merge; keeping first"
                    );
                }
                Some(_) => {}
            }
        }

        match pressure.or(idle_pressure) {
            Some(pressure) => Inlet { pressure, flow },
            None => Inlet::ZERO,
        }
    }

    pub(crate) fn propagate_from(&mut self, origin: CompId) -> NetworkResult<Propagation> {
        let mut updated = Vec::new();
        self.push_downstream(origin, &mut updated)?;
        debug!(
            origin = self.name_of(origin).unwrap_or("?"),
            updated = updated.len(),
            "propagation finished"
        );
        Ok(Propagation { origin, updated })
    }

    fn push_downstream(&mut self, id: CompId, updated: &mut Vec<CompId>) -> NetworkResult<()> {
        let targets: Vec<CompId> = self.graph.downstream(id).collect();
        for target in targets {
            self.update_from_upstream(target)?;
            updated.push(target);
            self.push_downstream(target, updated)?;
        }
        Ok(())
    }

    fn update_from_upstream(&mut self, id: CompId) -> NetworkResult<()> {
        let inlet = self.gather_inlet(id);
        let comp = self.component_mut(id)?;
        debug!(
            component = comp.name(),
            pressure = inlet.pressure,
            flow = inlet.flow,
            "update inlet"
        );
        comp.update_inlet(inlet.pressure, inlet.flow)?;
        Ok(())
    }

    /// Visit every non-root component once in topological order.
    pub(crate) fn settle(&mut self) -> NetworkResult<()> {
        let order = self.graph.topo_order().to_vec();
        for id in order {
            if !self.graph.is_root(id) {
                self.update_from_upstream(id)?;
            }
        }
        Ok(())
    }
}
