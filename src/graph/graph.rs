//! The semantic graph model.
//!
//! A [`SemanticGraph`] owns two arenas, nodes and edges, addressed by
//! [`NodeIdx`] and [`EdgeIdx`]. Graphs are assembled through a
//! [`GraphBuilder`] and are immutable once built.

use smol_str::SmolStr;

use super::error::GraphError;
use crate::base::constants::{DATE_ENTITY, NAME_CONCEPT, NAME_REL, OP_PREFIX};
use crate::base::{EdgeIdx, NodeIdx};

// ============================================================================
// NODES AND EDGES
// ============================================================================

/// A graph node: either a variable carrying a concept, or a constant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    /// Concept for variables (`want-01`), literal value for constants (`"Obama"`, `100`).
    pub concept: SmolStr,
    /// Variable name; `None` for constants.
    pub var: Option<SmolStr>,
    /// Outgoing edges, in source order.
    pub v_edges: Vec<EdgeIdx>,
    /// Incoming edges.
    pub p_edges: Vec<EdgeIdx>,
}

impl Node {
    pub fn is_const(&self) -> bool {
        self.var.is_none()
    }

    /// Display string of the node: its concept or literal value.
    pub fn node_str(&self) -> &str {
        &self.concept
    }

    /// A constant that parses as a number.
    pub fn is_number(&self) -> bool {
        self.is_const() && self.concept.parse::<f64>().is_ok()
    }

    /// Concepts with a PropBank-style sense suffix, e.g. `want-01`.
    pub fn is_predicate(&self) -> bool {
        if self.is_const() {
            return false;
        }
        match self.concept.rsplit_once('-') {
            Some((lemma, sense)) => {
                !lemma.is_empty()
                    && !sense.is_empty()
                    && sense.bytes().all(|b| b.is_ascii_digit())
            }
            None => false,
        }
    }

    /// Entity-like concepts (`date-entity`, `monetary-quantity`, ...).
    pub fn is_entity_concept(&self) -> bool {
        !self.is_const()
            && (self.concept.ends_with("-entity") || self.concept.ends_with("-quantity"))
    }

    pub fn is_date_entity(&self) -> bool {
        !self.is_const() && self.concept == DATE_ENTITY
    }
}

/// A labeled, directed edge from `head` to `tail`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    pub label: SmolStr,
    pub head: NodeIdx,
    pub tail: NodeIdx,
}

impl Edge {
    /// Operator relations: `op1`, `op2`, ...
    pub fn is_op(&self) -> bool {
        self.label.starts_with(OP_PREFIX)
    }

    /// Position of an operator relation (`op3` → 3).
    pub fn op_position(&self) -> Option<u32> {
        self.label.strip_prefix(OP_PREFIX)?.parse().ok()
    }
}

// ============================================================================
// GRAPH
// ============================================================================

/// A rooted, labeled, directed graph representing the meaning of one sentence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SemanticGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    root: NodeIdx,
}

impl SemanticGraph {
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    pub fn root(&self) -> NodeIdx {
        self.root
    }

    pub fn node(&self, idx: NodeIdx) -> &Node {
        &self.nodes[idx.index()]
    }

    pub fn edge(&self, idx: EdgeIdx) -> &Edge {
        &self.edges[idx.index()]
    }

    pub fn get_node(&self, idx: NodeIdx) -> Option<&Node> {
        self.nodes.get(idx.index())
    }

    pub fn get_edge(&self, idx: EdgeIdx) -> Option<&Edge> {
        self.edges.get(idx.index())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeIdx, &Node)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeIdx::from(i), n))
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeIdx, &Edge)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, e)| (EdgeIdx::from(i), e))
    }

    /// Outgoing edges of `idx` with their targets, in source order.
    pub fn children(&self, idx: NodeIdx) -> impl Iterator<Item = (EdgeIdx, &Edge)> + '_ {
        self.node(idx)
            .v_edges
            .iter()
            .map(move |&e| (e, self.edge(e)))
    }

    /// The first incoming edge of a node, if any.
    pub fn parent_edge(&self, idx: NodeIdx) -> Option<EdgeIdx> {
        self.node(idx).p_edges.first().copied()
    }

    /// The name node of a named-entity root.
    pub fn name_node(&self, idx: NodeIdx) -> Option<NodeIdx> {
        self.children(idx)
            .find(|(_, e)| e.label == NAME_REL && self.node(e.tail).concept == NAME_CONCEPT)
            .map(|(_, e)| e.tail)
    }

    /// A node is a named-entity root when it has a `name` edge to a `name` node.
    pub fn is_named_entity(&self, idx: NodeIdx) -> bool {
        self.name_node(idx).is_some()
    }

    /// Surface tokens of a named entity: the `opN` values of its name node, by N.
    pub fn named_entity_mention(&self, idx: NodeIdx) -> Vec<String> {
        let Some(name) = self.name_node(idx) else {
            return Vec::new();
        };
        let mut ops: Vec<(u32, &str)> = self
            .children(name)
            .filter_map(|(_, e)| e.op_position().map(|pos| (pos, self.node(e.tail).node_str())))
            .collect();
        ops.sort_by_key(|(pos, _)| *pos);
        ops.into_iter()
            .map(|(_, s)| s.trim_matches('"').to_string())
            .collect()
    }

    /// True when some edge points from a node back to itself.
    pub fn has_self_cycle(&self) -> bool {
        self.edges.iter().any(|e| e.head == e.tail)
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Incremental constructor for [`SemanticGraph`].
///
/// Edges must reference nodes added to the same builder; [`GraphBuilder::build`]
/// checks that invariant along with the root.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl GraphBuilder {
    /// Add a variable node carrying a concept.
    pub fn node(&mut self, var: impl Into<SmolStr>, concept: impl Into<SmolStr>) -> NodeIdx {
        self.push(Node {
            concept: concept.into(),
            var: Some(var.into()),
            v_edges: Vec::new(),
            p_edges: Vec::new(),
        })
    }

    /// Add a constant node.
    pub fn constant(&mut self, value: impl Into<SmolStr>) -> NodeIdx {
        self.push(Node {
            concept: value.into(),
            var: None,
            v_edges: Vec::new(),
            p_edges: Vec::new(),
        })
    }

    /// Add an edge `head --label--> tail`. A leading `:` on the label is dropped.
    pub fn edge(&mut self, head: NodeIdx, label: &str, tail: NodeIdx) -> EdgeIdx {
        let idx = EdgeIdx::from(self.edges.len());
        self.edges.push(Edge {
            label: SmolStr::new(label.strip_prefix(':').unwrap_or(label)),
            head,
            tail,
        });
        if let Some(n) = self.nodes.get_mut(head.index()) {
            n.v_edges.push(idx);
        }
        if let Some(n) = self.nodes.get_mut(tail.index()) {
            n.p_edges.push(idx);
        }
        idx
    }

    pub(super) fn set_concept(&mut self, idx: NodeIdx, concept: SmolStr) {
        if let Some(n) = self.nodes.get_mut(idx.index()) {
            n.concept = concept;
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn push(&mut self, node: Node) -> NodeIdx {
        let idx = NodeIdx::from(self.nodes.len());
        self.nodes.push(node);
        idx
    }

    /// Finish the graph with the given root.
    pub fn build(self, root: NodeIdx) -> Result<SemanticGraph, GraphError> {
        if root.index() >= self.nodes.len() {
            return Err(GraphError::MissingRoot(root));
        }
        for (i, e) in self.edges.iter().enumerate() {
            for node in [e.head, e.tail] {
                if node.index() >= self.nodes.len() {
                    return Err(GraphError::DanglingEdge {
                        edge: EdgeIdx::from(i),
                        node,
                    });
                }
            }
        }
        Ok(SemanticGraph {
            nodes: self.nodes,
            edges: self.edges,
            root,
        })
    }
}
