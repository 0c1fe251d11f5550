//! Linearizes the flat, branch-tagged canvas graph into the nested
//! specification node sequence.
//!
//! This is a topological linearization with explicit branch semantics rather
//! than generic traversal: a loop body must stay scoped to its owning node,
//! so branch sequences are built by recursive descent over the immutable
//! index, with one visited set shared across the whole invocation so every
//! executable node appears exactly once.

use crate::canvas::{BranchTag, CanvasNode, NodeKind};
use crate::compiler::convert;
use crate::compiler::index::GraphIndex;
use crate::error::CompileError;
use crate::spec::SpecNode;
use ahash::AHashSet;
use tracing::trace;

pub(crate) struct ChainWalker<'a> {
    index: &'a GraphIndex<'a>,
    visited: AHashSet<&'a str>,
}

impl<'a> ChainWalker<'a> {
    pub(crate) fn new(index: &'a GraphIndex<'a>) -> Self {
        Self {
            index,
            visited: AHashSet::new(),
        }
    }

    /// Converts the whole executable subgraph: each root's chain in order,
    /// then any node unreachable from a root as its own appended chain, so
    /// that nothing is silently dropped.
    pub(crate) fn walk(&mut self) -> Result<Vec<SpecNode>, CompileError> {
        let mut nodes = Vec::new();
        for root in self.index.roots() {
            trace!(root = %root.id, "walking chain");
            self.walk_chain(root, &mut nodes)?;
        }
        let islands: Vec<&CanvasNode> = self
            .index
            .executable_nodes()
            .iter()
            .copied()
            .filter(|node| !self.visited.contains(node.id.as_str()))
            .collect();
        for island in islands {
            if !self.visited.contains(island.id.as_str()) {
                trace!(node = %island.id, "walking disconnected chain");
                self.walk_chain(island, &mut nodes)?;
            }
        }
        Ok(nodes)
    }

    /// Builds one linear chain starting at `start`: convert, mark visited,
    /// follow the default continuation until none is eligible.
    fn walk_chain(
        &mut self,
        start: &'a CanvasNode,
        out: &mut Vec<SpecNode>,
    ) -> Result<(), CompileError> {
        let mut current = Some(start);
        while let Some(node) = current {
            if !self.visited.insert(node.id.as_str()) {
                break;
            }
            out.push(self.convert(node)?);
            current = self.next_in_chain(node);
        }
        Ok(())
    }

    /// Picks the next node of a chain. A loop node prefers its `exit` edge
    /// (continuation after the loop) over an untagged edge; everything else
    /// follows the first untagged edge whose target is executable and
    /// unvisited, in sorted order. Edges into input or trigger nodes are
    /// skipped: those kinds never take part in the executable sequence.
    fn next_in_chain(&self, node: &'a CanvasNode) -> Option<&'a CanvasNode> {
        let edges = self.index.outgoing(&node.id);
        if node.kind == NodeKind::ForLoop {
            let exit = edges
                .iter()
                .filter(|edge| edge.branch() == Some(BranchTag::Exit))
                .filter_map(|edge| self.index.node(&edge.target))
                .filter(|target| target.kind.is_executable())
                .find(|target| !self.visited.contains(target.id.as_str()));
            if exit.is_some() {
                return exit;
            }
        }
        edges
            .iter()
            .filter(|edge| edge.branch().is_none())
            .filter_map(|edge| self.index.node(&edge.target))
            .filter(|target| target.kind.is_executable())
            .find(|target| !self.visited.contains(target.id.as_str()))
    }

    /// Builds a branch sequence (`then`, `else` or `body`): a linear chain
    /// seeded from each outgoing edge carrying the matching tag.
    fn walk_branch(
        &mut self,
        node: &CanvasNode,
        tag: BranchTag,
    ) -> Result<Vec<SpecNode>, CompileError> {
        let seeds: Vec<&'a CanvasNode> = self
            .index
            .outgoing(&node.id)
            .iter()
            .filter(|edge| edge.branch() == Some(tag))
            .filter_map(|edge| self.index.node(&edge.target))
            .filter(|target| target.kind.is_executable())
            .collect();
        let mut sequence = Vec::new();
        for seed in seeds {
            if !self.visited.contains(seed.id.as_str()) {
                self.walk_chain(seed, &mut sequence)?;
            }
        }
        Ok(sequence)
    }

    fn convert(&mut self, node: &'a CanvasNode) -> Result<SpecNode, CompileError> {
        match &node.kind {
            NodeKind::Tool => convert::convert_tool(node),
            NodeKind::Llm => convert::convert_llm(node),
            NodeKind::IfElse => {
                let parts = convert::convert_condition(node)?;
                let then = self.walk_branch(node, BranchTag::True)?;
                let otherwise = self.walk_branch(node, BranchTag::False)?;
                Ok(SpecNode::If {
                    id: node.id.clone(),
                    condition: parts.condition,
                    then,
                    otherwise,
                    out: parts.out,
                })
            }
            NodeKind::ForLoop => {
                let parts = convert::convert_loop(node)?;
                let body = self.walk_branch(node, BranchTag::Loop)?;
                Ok(SpecNode::ForEach {
                    id: node.id.clone(),
                    items: parts.items,
                    item: parts.item,
                    index: parts.index,
                    body,
                    out: parts.out,
                })
            }
            // Input and trigger nodes never enter the walk; reaching one
            // here is the same integration defect as an unknown kind.
            kind @ (NodeKind::Input | NodeKind::Trigger | NodeKind::Other(_)) => {
                Err(CompileError::UnsupportedNodeType {
                    node_id: node.id.clone(),
                    type_name: kind.as_str().to_string(),
                })
            }
        }
    }
}
