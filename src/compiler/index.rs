use crate::canvas::{CanvasEdge, CanvasGraph, CanvasNode};
use ahash::AHashMap;
use itertools::Itertools;
use std::cmp::Ordering;

/// Ephemeral index over a borrowed canvas graph: node lookup plus sorted
/// adjacency in both directions.
///
/// Every adjacency bucket is deterministically ordered (by the far node's
/// vertical position, then horizontal position, then node id, then edge id)
/// so that compiling an unchanged graph twice yields identical output.
pub(crate) struct GraphIndex<'a> {
    nodes: AHashMap<&'a str, &'a CanvasNode>,
    outgoing: AHashMap<&'a str, Vec<&'a CanvasEdge>>,
    incoming: AHashMap<&'a str, Vec<&'a CanvasEdge>>,
    /// Executable nodes in deterministic order; drives root discovery and
    /// the leftover-island sweep.
    executable: Vec<&'a CanvasNode>,
}

fn position_order(a: &CanvasNode, b: &CanvasNode) -> Ordering {
    a.position
        .y
        .total_cmp(&b.position.y)
        .then(a.position.x.total_cmp(&b.position.x))
        .then_with(|| a.id.cmp(&b.id))
}

impl<'a> GraphIndex<'a> {
    pub(crate) fn new(graph: &'a CanvasGraph) -> Self {
        let nodes: AHashMap<&str, &CanvasNode> =
            graph.nodes.iter().map(|node| (node.id.as_str(), node)).collect();

        let mut outgoing: AHashMap<&str, Vec<&CanvasEdge>> = AHashMap::new();
        let mut incoming: AHashMap<&str, Vec<&CanvasEdge>> = AHashMap::new();
        for edge in &graph.edges {
            // The canvas collaborator owns referential integrity; an edge
            // naming a node that no longer exists is dropped here.
            if !nodes.contains_key(edge.source.as_str())
                || !nodes.contains_key(edge.target.as_str())
            {
                continue;
            }
            outgoing.entry(edge.source.as_str()).or_default().push(edge);
            incoming.entry(edge.target.as_str()).or_default().push(edge);
        }

        for bucket in outgoing.values_mut() {
            bucket.sort_by(|a, b| {
                position_order(nodes[a.target.as_str()], nodes[b.target.as_str()])
                    .then_with(|| a.id.cmp(&b.id))
            });
        }
        for bucket in incoming.values_mut() {
            bucket.sort_by(|a, b| {
                position_order(nodes[a.source.as_str()], nodes[b.source.as_str()])
                    .then_with(|| a.id.cmp(&b.id))
            });
        }

        let executable = graph
            .nodes
            .iter()
            .filter(|node| node.kind.is_executable())
            .sorted_by(|a, b| position_order(a, b))
            .collect();

        Self {
            nodes,
            outgoing,
            incoming,
            executable,
        }
    }

    pub(crate) fn node(&self, id: &str) -> Option<&'a CanvasNode> {
        self.nodes.get(id).copied()
    }

    pub(crate) fn outgoing(&self, id: &str) -> &[&'a CanvasEdge] {
        self.outgoing.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Executable nodes in deterministic (y, x, id) order.
    pub(crate) fn executable_nodes(&self) -> &[&'a CanvasNode] {
        &self.executable
    }

    /// Chain roots: executable nodes with no incoming edge from another
    /// executable node, in deterministic order.
    pub(crate) fn roots(&self) -> Vec<&'a CanvasNode> {
        self.executable
            .iter()
            .copied()
            .filter(|node| !self.has_executable_predecessor(&node.id))
            .collect()
    }

    fn has_executable_predecessor(&self, id: &str) -> bool {
        self.incoming
            .get(id)
            .is_some_and(|edges| {
                edges.iter().any(|edge| {
                    self.nodes
                        .get(edge.source.as_str())
                        .is_some_and(|source| source.kind.is_executable())
                })
            })
    }
}
