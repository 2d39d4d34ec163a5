//! Graph validation logic.

use std::collections::HashSet;

use pf_core::{CompId, EdgeId};

use crate::error::{GraphError, GraphResult};
use crate::graph::{Edge, Node, NodeRole};

/// Validate references, names and per-edge wiring rules.
pub(crate) fn validate_structure(nodes: &[Node], edges: &[Edge]) -> GraphResult<()> {
    let mut names: HashSet<&str> = HashSet::new();
    for node in nodes {
        if !names.insert(node.name.as_str()) {
            return Err(GraphError::DuplicateName {
                name: node.name.clone(),
            });
        }
    }

    let mut pairs: HashSet<(CompId, CompId)> = HashSet::new();
    for edge in edges {
        for endpoint in [edge.from, edge.to] {
            if endpoint.index() as usize >= nodes.len() {
                return Err(GraphError::InvalidNodeRef {
                    edge: edge.id,
                    node: endpoint,
                });
            }
        }

        if edge.from == edge.to {
            return Err(GraphError::SelfLoop {
                edge: edge.id,
                node: edge.from,
            });
        }

        if nodes[edge.to.index() as usize].role == NodeRole::Source {
            return Err(GraphError::IntoSource {
                edge: edge.id,
                node: edge.to,
            });
        }

        if !pairs.insert((edge.from, edge.to)) {
            return Err(GraphError::DuplicateEdge {
                from: edge.from,
                to: edge.to,
            });
        }
    }

    Ok(())
}

/// Kahn's algorithm over the outgoing adjacency.
///
/// Ready nodes are taken lowest-ID first. Any node left unvisited sits on a
/// cycle (or downstream of one) and is reported.
pub(crate) fn topological_order(
    nodes: &[Node],
    edges: &[Edge],
    out_offsets: &[usize],
    out_edges: &[EdgeId],
) -> GraphResult<Vec<CompId>> {
    let mut indegree = vec![0_usize; nodes.len()];
    for edge in edges {
        indegree[edge.to.index() as usize] += 1;
    }

    let mut ready: std::collections::BTreeSet<CompId> = nodes
        .iter()
        .filter(|n| indegree[n.id.index() as usize] == 0)
        .map(|n| n.id)
        .collect();

    let mut order = Vec::with_capacity(nodes.len());
    while let Some(id) = ready.pop_first() {
        order.push(id);
        let idx = id.index() as usize;
        for edge_id in &out_edges[out_offsets[idx]..out_offsets[idx + 1]] {
            let to = edges[edge_id.index() as usize].to;
            let slot = &mut indegree[to.index() as usize];
            *slot -= 1;
            if *slot == 0 {
                ready.insert(to);
            }
        }
    }

    if order.len() != nodes.len() {
        let stuck = indegree
            .iter()
            .position(|d| *d > 0)
            .map_or(CompId::from_index(0), |i| CompId::from_index(i as u32));
        return Err(GraphError::Cycle { node: stuck });
    }

    Ok(order)
}
