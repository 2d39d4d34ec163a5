//! pf-components: component library for liquid piping networks.
//!
//! Provides models for the elements of a hand-wired plant:
//! - Tanks with hydrostatic pressure and a gravity-drain outlet
//! - Gate, globe and relief valves sharing one valve contract
//! - Centrifugal (affinity laws) and positive displacement pumps
//!
//! All components implement the `FlowElement` trait. They hold their own
//! derived state; the network layer decides when to push new inlet values.
//!
//! # Example
//!
//! ```
//! use pf_components::{FlowElement, Valve, ValveConfig};
//!
//! let mut gate = Valve::new(ValveConfig::gate("gate1").with_inlet(20.0, 120.0)).unwrap();
//! gate.open().unwrap();
//! assert_eq!(gate.outlet_flow(), 120.0);
//! assert!(gate.outlet_pressure() < 20.0);
//! ```

pub mod common;
pub mod error;
pub mod pump;
pub mod tank;
pub mod traits;
pub mod valve;

// Re-exports
pub use error::{ComponentError, ComponentResult};
pub use pump::{OutletPressure, Pump, PumpConfig, PumpKind};
pub use tank::{Tank, TankConfig};
pub use traits::FlowElement;
pub use valve::{Valve, ValveConfig, ValveKind, ValveState};
