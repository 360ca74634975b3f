//! Graph fragments: the part of a graph realized by one token.
//!
//! Two fragments are equal when they cover the same root, nodes and edges;
//! the span they were aligned to does not take part in identity, so the same
//! concept aligned from two tokens yields two equal fragments.

use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use smol_str::SmolStr;

use super::graph::SemanticGraph;
use crate::base::{EdgeIdx, NodeIdx, TokenSpan};

#[derive(Clone, Debug)]
pub struct Fragment {
    root: NodeIdx,
    edge: Option<EdgeIdx>,
    nodes: BTreeSet<NodeIdx>,
    edges: BTreeSet<EdgeIdx>,
    /// Neighbours of the fragment that it does not own.
    ext_nodes: BTreeSet<NodeIdx>,
    span: Option<TokenSpan>,
}

impl Fragment {
    /// A concept fragment anchored at `node`; its edge is the node's parent edge.
    pub fn for_node(graph: &SemanticGraph, node: NodeIdx) -> Self {
        let mut frag = Self::empty(node, graph.parent_edge(node));
        frag.nodes.insert(node);
        frag.build_ext_set(graph);
        frag
    }

    /// A relation fragment: the edge together with its head and tail.
    pub fn for_edge(graph: &SemanticGraph, edge: EdgeIdx) -> Self {
        let e = graph.edge(edge);
        let mut frag = Self::empty(e.head, Some(edge));
        frag.nodes.insert(e.head);
        frag.nodes.insert(e.tail);
        frag.edges.insert(edge);
        frag.build_ext_set(graph);
        frag
    }

    /// A named-entity fragment: the entity root, its name node and the name's operators.
    pub fn for_entity(graph: &SemanticGraph, root: NodeIdx) -> Self {
        let mut frag = Self::empty(root, graph.parent_edge(root));
        frag.nodes.insert(root);
        if let Some(name) = graph.name_node(root) {
            for (e, edge) in graph.children(root) {
                if edge.tail == name {
                    frag.edges.insert(e);
                }
            }
            frag.nodes.insert(name);
            for (e, edge) in graph.children(name) {
                if edge.is_op() {
                    frag.edges.insert(e);
                    frag.nodes.insert(edge.tail);
                }
            }
        }
        frag.build_ext_set(graph);
        frag
    }

    fn empty(root: NodeIdx, edge: Option<EdgeIdx>) -> Self {
        Self {
            root,
            edge,
            nodes: BTreeSet::new(),
            edges: BTreeSet::new(),
            ext_nodes: BTreeSet::new(),
            span: None,
        }
    }

    pub fn root(&self) -> NodeIdx {
        self.root
    }

    /// The edge this fragment most directly realizes.
    pub fn edge(&self) -> Option<EdgeIdx> {
        self.edge
    }

    pub fn nodes(&self) -> &BTreeSet<NodeIdx> {
        &self.nodes
    }

    pub fn edges(&self) -> &BTreeSet<EdgeIdx> {
        &self.edges
    }

    pub fn ext_nodes(&self) -> &BTreeSet<NodeIdx> {
        &self.ext_nodes
    }

    pub fn span(&self) -> Option<TokenSpan> {
        self.span
    }

    pub fn set_span(&mut self, span: TokenSpan) {
        self.span = Some(span);
    }

    pub fn contains_node(&self, node: NodeIdx) -> bool {
        self.nodes.contains(&node)
    }

    fn build_ext_set(&mut self, graph: &SemanticGraph) {
        self.ext_nodes.clear();
        for &n in &self.nodes {
            let node = graph.node(n);
            for &e in node.v_edges.iter().chain(node.p_edges.iter()) {
                if self.edges.contains(&e) {
                    continue;
                }
                let edge = graph.edge(e);
                let other = if edge.head == n { edge.tail } else { edge.head };
                if !self.nodes.contains(&other) {
                    self.ext_nodes.insert(other);
                }
            }
        }
    }

    /// Fragments are adjacent when they share a node or one touches the other's boundary.
    pub fn is_adjacent(&self, other: &Fragment) -> bool {
        !self.nodes.is_disjoint(&other.nodes)
            || !self.ext_nodes.is_disjoint(&other.nodes)
            || !other.ext_nodes.is_disjoint(&self.nodes)
    }

    fn is_top(&self, graph: &SemanticGraph, node: NodeIdx) -> bool {
        graph
            .node(node)
            .p_edges
            .iter()
            .all(|e| !self.edges.contains(e))
    }

    /// Merge `other` into this fragment, including the edges connecting them.
    pub fn absorb(&mut self, other: Fragment, graph: &SemanticGraph) {
        self.nodes.extend(other.nodes);
        self.edges.extend(other.edges);
        for (e, edge) in graph.edges() {
            if self.nodes.contains(&edge.head) && self.nodes.contains(&edge.tail) {
                self.edges.insert(e);
            }
        }

        // The merged root is a node with no incoming edge from inside the fragment.
        if !self.is_top(graph, self.root) {
            let top = self.nodes.iter().copied().find(|&n| self.is_top(graph, n));
            if let Some(top) = top {
                self.root = top;
                self.edge = graph.parent_edge(top);
            }
        }
        self.build_ext_set(graph);
    }
}

impl PartialEq for Fragment {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root && self.nodes == other.nodes && self.edges == other.edges
    }
}

impl Eq for Fragment {}

impl Hash for Fragment {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.root.hash(state);
        self.nodes.hash(state);
        self.edges.hash(state);
    }
}

impl SemanticGraph {
    /// Every named entity of the graph as a fragment, labeled by its type, in node order.
    pub fn extract_entities(&self) -> Vec<(Fragment, SmolStr)> {
        self.nodes()
            .filter(|(idx, _)| self.is_named_entity(*idx))
            .map(|(idx, node)| (Fragment::for_entity(self, idx), node.concept.clone()))
            .collect()
    }
}

/// Merge the fragments aligned to one token wherever they are adjacent.
///
/// A merged fragment takes the position of the earliest fragment it absorbed.
pub fn connect_adjacent(frags: Vec<Fragment>, graph: &SemanticGraph) -> Vec<Fragment> {
    let mut merged: Vec<Fragment> = Vec::with_capacity(frags.len());
    for frag in frags {
        let mut current = frag;
        let mut slot = merged.len();
        while let Some(pos) = merged.iter().position(|m| m.is_adjacent(&current)) {
            let mut earlier = merged.remove(pos);
            earlier.absorb(current, graph);
            current = earlier;
            slot = slot.min(pos).min(merged.len());
        }
        merged.insert(slot.min(merged.len()), current);
    }
    merged
}
