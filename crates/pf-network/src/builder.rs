//! Incremental network builder.

use pf_components::{
    Pump, PumpConfig, PumpKind, Tank, TankConfig, Valve, ValveConfig, ValveKind,
};
use pf_core::CompId;
use pf_graph::{GraphBuilder, NodeRole};
use tracing::debug;

use crate::component::Component;
use crate::error::NetworkResult;
use crate::network::Network;

#[derive(Debug, Clone)]
enum Pending {
    Tank(TankConfig),
    Valve(ValveConfig),
    Pump(PumpConfig),
}

/// Builder for a [`Network`].
///
/// Components and connections are recorded as given; configuration and
/// wiring are checked together by `build()`.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    graph: GraphBuilder,
    pending: Vec<Pending>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, name: String, role: NodeRole, pending: Pending) -> CompId {
        self.pending.push(pending);
        self.graph.add_node(name, role)
    }

    pub fn add_tank(&mut self, config: TankConfig) -> CompId {
        self.push(config.name.clone(), NodeRole::Source, Pending::Tank(config))
    }

    /// Add a valve of whatever kind the config names.
    pub fn add_valve(&mut self, config: ValveConfig) -> CompId {
        self.push(config.name.clone(), NodeRole::Inline, Pending::Valve(config))
    }

    pub fn add_gate(&mut self, config: ValveConfig) -> CompId {
        self.add_valve(ValveConfig {
            kind: ValveKind::Gate,
            ..config
        })
    }

    pub fn add_globe(&mut self, config: ValveConfig) -> CompId {
        self.add_valve(ValveConfig {
            kind: ValveKind::Globe,
            ..config
        })
    }

    pub fn add_relief(
        &mut self,
        config: ValveConfig,
        setpoint_open: f64,
        setpoint_close: f64,
    ) -> CompId {
        self.add_valve(ValveConfig {
            kind: ValveKind::Relief {
                setpoint_open,
                setpoint_close,
            },
            ..config
        })
    }

    /// Add a pump of whatever kind the config names.
    pub fn add_pump(&mut self, config: PumpConfig) -> CompId {
        self.push(config.name.clone(), NodeRole::Inline, Pending::Pump(config))
    }

    pub fn add_centrifugal(&mut self, config: PumpConfig) -> CompId {
        self.add_pump(PumpConfig {
            kind: PumpKind::Centrifugal,
            ..config
        })
    }

    pub fn add_positive_displacement(&mut self, config: PumpConfig, displacement: f64) -> CompId {
        self.add_pump(PumpConfig {
            kind: PumpKind::PositiveDisplacement { displacement },
            ..config
        })
    }

    /// Wire the outlet of `from` to the inlet of `to`.
    pub fn connect(&mut self, from: CompId, to: CompId) {
        self.graph.connect(from, to);
    }

    /// Validate wiring and configuration, then settle the network once.
    pub fn build(self) -> NetworkResult<Network> {
        let graph = self.graph.build()?;
        let components = self
            .pending
            .into_iter()
            .map(|p| -> NetworkResult<Component> {
                Ok(match p {
                    Pending::Tank(c) => Component::Tank(Tank::new(c)?),
                    Pending::Valve(c) => Component::Valve(Valve::new(c)?),
                    Pending::Pump(c) => Component::Pump(Pump::new(c)?),
                })
            })
            .collect::<NetworkResult<Vec<_>>>()?;

        debug!(
            components = components.len(),
            connections = graph.edges().len(),
            "network built"
        );

        let mut network = Network::new(graph, components);
        network.settle()?;
        Ok(network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetworkError;
    use pf_components::ComponentError;
    use pf_graph::GraphError;

    #[test]
    fn role_check_rejects_feeding_tank() {
        let mut b = NetworkBuilder::new();
        let v = b.add_gate(ValveConfig::gate("v"));
        let t = b.add_tank(TankConfig::new("t"));
        b.connect(v, t);
        assert!(matches!(
            b.build(),
            Err(NetworkError::Graph(GraphError::IntoSource { .. }))
        ));
    }

    #[test]
    fn zero_cv_rejected_at_build() {
        let mut b = NetworkBuilder::new();
        b.add_globe(ValveConfig::globe("g").with_cv(0.0));
        assert!(matches!(
            b.build(),
            Err(NetworkError::Component(ComponentError::Domain { .. }))
        ));
    }

    #[test]
    fn kind_helpers_override_config_kind() {
        let mut b = NetworkBuilder::new();
        let r = b.add_relief(ValveConfig::gate("r"), 60.0, 55.0);
        let p = b.add_positive_displacement(PumpConfig::centrifugal("p"), 0.1);
        let net = b.build().unwrap();
        assert!(matches!(
            net.valve(r).unwrap().kind(),
            ValveKind::Relief { .. }
        ));
        assert!(matches!(
            net.pump(p).unwrap().kind(),
            PumpKind::PositiveDisplacement { .. }
        ));
    }
}
