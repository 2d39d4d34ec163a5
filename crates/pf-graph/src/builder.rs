//! Incremental graph builder.

use pf_core::{CompId, EdgeId};

use crate::error::GraphResult;
use crate::graph::{Edge, Graph, Node, NodeRole};
use crate::validate;

/// Builder for constructing a graph incrementally.
///
/// Use `add_node` and `connect` to build up the graph,
/// then call `build()` to validate and freeze it into an immutable `Graph`.
/// Nothing is checked until `build()`, so edges may name nodes added later.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl GraphBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and return its ID.
    pub fn add_node(&mut self, name: impl Into<String>, role: NodeRole) -> CompId {
        let id = CompId::from_index(self.nodes.len() as u32);
        self.nodes.push(Node {
            id,
            name: name.into(),
            role,
        });
        id
    }

    /// Connect the outlet of `from` to the inlet of `to`.
    pub fn connect(&mut self, from: CompId, to: CompId) -> EdgeId {
        let id = EdgeId::from_index(self.edges.len() as u32);
        self.edges.push(Edge { id, from, to });
        id
    }

    /// Number of nodes added so far.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Build and validate the graph, returning an immutable `Graph`.
    pub fn build(self) -> GraphResult<Graph> {
        validate::validate_structure(&self.nodes, &self.edges)?;

        let (out_offsets, out_edges) = Self::build_adjacency(&self.nodes, &self.edges, |e| e.from);
        let (in_offsets, in_edges) = Self::build_adjacency(&self.nodes, &self.edges, |e| e.to);

        let topo_order =
            validate::topological_order(&self.nodes, &self.edges, &out_offsets, &out_edges)?;

        Ok(Graph {
            nodes: self.nodes,
            edges: self.edges,
            out_offsets,
            out_edges,
            in_offsets,
            in_edges,
            topo_order,
        })
    }

    /// Build compact adjacency lists keyed by `endpoint`, preserving edge order.
    fn build_adjacency(
        nodes: &[Node],
        edges: &[Edge],
        endpoint: impl Fn(&Edge) -> CompId,
    ) -> (Vec<usize>, Vec<EdgeId>) {
        let mut per_node: Vec<Vec<EdgeId>> = vec![Vec::new(); nodes.len()];
        for edge in edges {
            if let Some(list) = per_node.get_mut(endpoint(edge).index() as usize) {
                list.push(edge.id);
            }
        }

        let mut offsets = Vec::with_capacity(nodes.len() + 1);
        let mut flat = Vec::with_capacity(edges.len());
        offsets.push(0);
        for list in per_node {
            flat.extend(list);
            offsets.push(flat.len());
        }

        (offsets, flat)
    }
}
