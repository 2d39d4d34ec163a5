//! Core trait shared by tanks, valves and pumps.

use crate::error::{ComponentError, ComponentResult};

/// A component whose outlet feeds the inlets of components wired downstream.
///
/// The network reads `outlet_pressure`/`outlet_flow` of every upstream
/// component, merges them, and hands the result to `update_inlet`.
pub trait FlowElement: Send + Sync {
    /// Component name for debugging and identification.
    fn name(&self) -> &str;

    /// Current outlet pressure (psi).
    fn outlet_pressure(&self) -> f64;

    /// Current outlet flow (gpm).
    fn outlet_flow(&self) -> f64;

    /// True if the component can currently deliver flow downstream.
    fn is_passing(&self) -> bool;

    /// True if the component is passing and something is actually coming
    /// out of it. An open valve on a dry line passes but does not deliver.
    fn is_delivering(&self) -> bool {
        self.is_passing() && self.outlet_flow() > 0.0
    }

    /// Receive new inlet conditions and recompute outlet values.
    ///
    /// Default implementation returns NotSupported (sources have no inlet).
    fn update_inlet(&mut self, _pressure: f64, _flow: f64) -> ComponentResult<()> {
        Err(ComponentError::NotSupported {
            what: "component has no inlet",
        })
    }
}
