//! pf-network: wired piping networks with downstream propagation.
//!
//! A [`Network`] owns its components and a validated [`pf_graph::Graph`].
//! Mutating one component (opening a valve, changing a pump speed, changing
//! a tank level) recomputes it and pushes the new outlet pressure and flow
//! to everything downstream, depth first in connection order.
//!
//! # Example
//!
//! ```
//! use pf_components::{TankConfig, ValveConfig};
//! use pf_network::NetworkBuilder;
//!
//! let mut b = NetworkBuilder::new();
//! let tank = b.add_tank(TankConfig { level: 20.0, outlet_slope: 0.5, ..TankConfig::new("tank") });
//! let gate = b.add_gate(ValveConfig::gate("gate").with_cv(500.0));
//! b.connect(tank, gate);
//! let mut net = b.build().unwrap();
//!
//! net.open(gate).unwrap();
//! assert!(net.valve(gate).unwrap().flow_out() > 0.0);
//! ```

pub mod builder;
pub mod component;
pub mod error;
pub mod network;
pub mod propagate;
pub mod snapshot;

pub use builder::NetworkBuilder;
pub use component::Component;
pub use error::{NetworkError, NetworkResult};
pub use network::Network;
pub use propagate::{Inlet, Propagation};
pub use snapshot::{ComponentSnapshot, SiComponentSnapshot, SiSnapshot, Snapshot};
