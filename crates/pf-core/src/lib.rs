//! pf-core: stable foundation for pipeflow.
//!
//! Contains:
//! - formulas (hydrostatic, Hazen-Williams, head/pressure, valve and pump helpers)
//! - units (uom SI types + imperial constructors for the snapshot boundary)
//! - numeric (Real + tolerances + float helpers)
//! - ids (stable compact IDs for graph/network objects)
//! - error (shared error types)

pub mod error;
pub mod formulas;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{ErrorClass, VpError, VpResult};
pub use ids::*;
pub use numeric::*;
