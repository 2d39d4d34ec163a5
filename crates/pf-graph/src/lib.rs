//! pf-graph: directed component graph for pipeflow.
//!
//! Provides:
//! - Core graph data structures (Node, Edge, Graph)
//! - Incremental graph builder with validation
//! - Deterministic topological order for settling a network
//!
//! An edge means "the outlet of `from` feeds the inlet of `to`". Outgoing
//! edges keep insertion order, which is the order siblings are visited when a
//! change propagates.
//!
//! # Example
//!
//! ```
//! use pf_graph::{GraphBuilder, NodeRole};
//!
//! let mut builder = GraphBuilder::new();
//! let tank = builder.add_node("Tank 1", NodeRole::Source);
//! let gate = builder.add_node("Gate 1", NodeRole::Inline);
//! builder.connect(tank, gate);
//! let graph = builder.build().unwrap();
//!
//! assert_eq!(graph.nodes().len(), 2);
//! assert_eq!(graph.downstream(tank).collect::<Vec<_>>(), vec![gate]);
//! ```

pub mod builder;
pub mod error;
pub mod graph;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::GraphBuilder;
pub use error::{GraphError, GraphResult};
pub use graph::{Edge, Graph, Node, NodeRole};
