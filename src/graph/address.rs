//! Fragment addresses used by token alignments.
//!
//! An address is a dotted path from the root: `1` is the root, `1.2` is the
//! target of the root's second outgoing edge, `1.2.1` the first child of
//! that. A trailing `.r` names the edge entering the addressed node instead
//! of the node itself (`1.2.r` is the root's second outgoing edge).

use super::error::GraphError;
use super::graph::SemanticGraph;
use crate::base::{EdgeIdx, NodeIdx};

/// What an alignment record points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FragmentRef {
    /// A concept (node) fragment.
    Node(NodeIdx),
    /// A relation (edge) fragment.
    Edge(EdgeIdx),
}

impl SemanticGraph {
    /// Resolve a dotted fragment address against this graph.
    pub fn resolve_fragment(&self, address: &str) -> Result<FragmentRef, GraphError> {
        let mut parts = address.split('.');
        match parts.next() {
            Some("1") => {}
            Some("") | None => return Err(GraphError::invalid_address(address, "empty address")),
            Some(_) => {
                return Err(GraphError::invalid_address(address, "address must start at root `1`"));
            }
        }

        let mut node = self.root();
        let mut via: Option<EdgeIdx> = None;
        while let Some(part) = parts.next() {
            if part == "r" {
                if parts.next().is_some() {
                    return Err(GraphError::invalid_address(address, "`r` must be the last step"));
                }
                return match via {
                    Some(edge) => Ok(FragmentRef::Edge(edge)),
                    None => Err(GraphError::invalid_address(address, "the root has no incoming edge")),
                };
            }
            let position: usize = part
                .parse()
                .map_err(|_| GraphError::invalid_address(address, "path step is not a number"))?;
            let edge = position
                .checked_sub(1)
                .and_then(|i| self.get_node(node)?.v_edges.get(i).copied())
                .ok_or_else(|| GraphError::invalid_address(address, "no such child"))?;
            via = Some(edge);
            node = self
                .get_edge(edge)
                .map(|e| e.tail)
                .ok_or_else(|| GraphError::invalid_address(address, "no such child"))?;
        }
        Ok(FragmentRef::Node(node))
    }
}
