//! Core graph data structures.

use pf_core::{CompId, EdgeId};

/// How a node may be wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRole {
    /// Outlet only. Nothing may feed it (tanks).
    Source,
    /// Inlet and outlet (valves, pumps).
    Inline,
}

/// A component in the piping network.
///
/// Nodes hold no hydraulic data, just an ID, a name for human reference and
/// the role that decides which edges are legal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: CompId,
    pub name: String,
    pub role: NodeRole,
}

/// A directed connection: the outlet of `from` feeds the inlet of `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub id: EdgeId,
    pub from: CompId,
    pub to: CompId,
}

/// The graph: a validated, immutable, acyclic set of nodes and edges.
///
/// The graph stores:
/// - All nodes and edges in vectors (indexed by their IDs).
/// - Compact adjacency in both directions, each list in edge insertion order.
/// - A topological order computed once at build time.
#[derive(Debug, Clone)]
pub struct Graph {
    pub(crate) nodes: Vec<Node>,
    pub(crate) edges: Vec<Edge>,

    /// node i's outgoing edges are in out_edges[out_offsets[i]..out_offsets[i+1]].
    pub(crate) out_offsets: Vec<usize>,
    pub(crate) out_edges: Vec<EdgeId>,

    /// Same layout for incoming edges.
    pub(crate) in_offsets: Vec<usize>,
    pub(crate) in_edges: Vec<EdgeId>,

    pub(crate) topo_order: Vec<CompId>,
}

impl Graph {
    /// Return all nodes.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Return all edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Get a node by ID (returns None if ID out of bounds).
    pub fn node(&self, id: CompId) -> Option<&Node> {
        self.nodes.get(id.index() as usize)
    }

    /// Get an edge by ID (returns None if ID out of bounds).
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index() as usize)
    }

    /// Look up a node by name.
    pub fn find(&self, name: &str) -> Option<CompId> {
        self.nodes.iter().find(|n| n.name == name).map(|n| n.id)
    }

    /// Outgoing edge IDs of a node, in insertion order.
    pub fn outgoing(&self, id: CompId) -> &[EdgeId] {
        Self::slice(&self.out_offsets, &self.out_edges, id)
    }

    /// Incoming edge IDs of a node, in insertion order.
    pub fn incoming(&self, id: CompId) -> &[EdgeId] {
        Self::slice(&self.in_offsets, &self.in_edges, id)
    }

    /// Nodes fed directly by `id`, in insertion order.
    pub fn downstream(&self, id: CompId) -> impl Iterator<Item = CompId> + '_ {
        self.outgoing(id)
            .iter()
            .filter_map(|e| self.edge(*e))
            .map(|e| e.to)
    }

    /// Nodes feeding `id` directly, in insertion order.
    pub fn upstream(&self, id: CompId) -> impl Iterator<Item = CompId> + '_ {
        self.incoming(id)
            .iter()
            .filter_map(|e| self.edge(*e))
            .map(|e| e.from)
    }

    /// True if nothing feeds the node.
    pub fn is_root(&self, id: CompId) -> bool {
        self.incoming(id).is_empty()
    }

    /// Every node ordered so that each appears after all of its upstream nodes.
    ///
    /// Ties are broken by node ID, so the order is deterministic.
    pub fn topo_order(&self) -> &[CompId] {
        &self.topo_order
    }

    fn slice<'a>(offsets: &[usize], flat: &'a [EdgeId], id: CompId) -> &'a [EdgeId] {
        let idx = id.index() as usize;
        match (offsets.get(idx), offsets.get(idx + 1)) {
            (Some(&start), Some(&end)) => &flat[start..end],
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_core::Id;

    #[test]
    fn role_equality() {
        assert_eq!(NodeRole::Source, NodeRole::Source);
        assert_ne!(NodeRole::Source, NodeRole::Inline);
    }

    #[test]
    fn out_of_range_lookups_are_empty() {
        let graph = Graph {
            nodes: vec![],
            edges: vec![],
            out_offsets: vec![0],
            out_edges: vec![],
            in_offsets: vec![0],
            in_edges: vec![],
            topo_order: vec![],
        };
        assert!(graph.node(Id::from_index(3)).is_none());
        assert!(graph.outgoing(Id::from_index(3)).is_empty());
        assert!(graph.incoming(Id::from_index(3)).is_empty());
    }
}
