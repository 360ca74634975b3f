//! Explicit-stack depth-first traversal.
//!
//! Frames are popped from a work stack; a second stack holds the closing
//! brackets of the nodes still open. Before a frame at depth `d` is handled,
//! the previous frame's depth `d0` decides how many brackets to close:
//!
//! ```text
//! d0 < d   descending, nothing to close
//! d0 == d  sibling, close 1
//! d0 > d   climbing back up, close d0 - d + 1
//! ```
//!
//! Whatever is still open when the work stack runs dry is closed last.

use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::{SmolStr, format_smolstr};
use tracing::trace;

use super::error::TraversalError;
use crate::base::NodeIdx;
use crate::base::constants::{LBR, RBR, RET, TOP};
use crate::categorize::{Categorizer, Thresholds};
use crate::graph::SemanticGraph;

/// One symbol of the linearized graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SeqEntry {
    /// `<rel>(`
    Open(SmolStr),
    /// `)<rel>`
    Close(SmolStr),
    /// `RET-<k>`
    Reentrancy(usize),
    /// The oracle's display symbol for `node`.
    Symbol { symbol: SmolStr, node: NodeIdx },
}

impl SeqEntry {
    /// Render the entry, substituting span labels for nodes that won a span.
    pub fn render(&self, node_labels: &FxHashMap<NodeIdx, SmolStr>) -> SmolStr {
        match self {
            SeqEntry::Symbol { symbol, node } => {
                node_labels.get(node).unwrap_or(symbol).clone()
            }
            other => format_smolstr!("{other}"),
        }
    }
}

impl fmt::Display for SeqEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeqEntry::Open(rel) => write!(f, "{rel}{LBR}"),
            SeqEntry::Close(rel) => write!(f, "{RBR}{rel}"),
            SeqEntry::Reentrancy(k) => write!(f, "{RET}-{k}"),
            SeqEntry::Symbol { symbol, .. } => f.write_str(symbol),
        }
    }
}

/// Closing brackets of the currently open nodes, innermost last.
#[derive(Clone, Debug, Default)]
pub struct ClosingStack {
    open: Vec<SmolStr>,
}

impl ClosingStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rel: SmolStr) {
        self.open.push(rel);
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    /// Close `count` brackets, innermost first.
    ///
    /// On underflow, returns how many closures could not be made.
    pub fn close(&mut self, count: usize, out: &mut Vec<SeqEntry>) -> Result<(), usize> {
        for closed in 0..count {
            let Some(rel) = self.open.pop() else {
                return Err(count - closed);
            };
            out.push(SeqEntry::Close(rel));
        }
        Ok(())
    }

    /// Close everything still open.
    pub fn drain_into(mut self, out: &mut Vec<SeqEntry>) {
        while let Some(rel) = self.open.pop() {
            out.push(SeqEntry::Close(rel));
        }
    }
}

/// Result of one traversal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Linearization {
    pub entries: Vec<SeqEntry>,
    /// Category label of every node the oracle categorized.
    pub node_to_label: FxHashMap<NodeIdx, SmolStr>,
    /// Number of `RET-k` references emitted.
    pub reentrancies: usize,
}

#[derive(Debug)]
struct Frame {
    node: NodeIdx,
    rel: SmolStr,
    parent: Option<SmolStr>,
    depth: usize,
}

/// Walk `graph` from its root, consulting `oracle` for every node.
pub fn traverse<C>(
    graph: &SemanticGraph,
    oracle: &C,
    thresholds: Thresholds,
) -> Result<Linearization, TraversalError>
where
    C: Categorizer + ?Sized,
{
    let mut stack = vec![Frame {
        node: graph.root(),
        rel: SmolStr::new_static(TOP),
        parent: None,
        depth: 0,
    }];
    let mut closing = ClosingStack::new();
    let mut visited = FxHashSet::default();
    let mut lin = Linearization::default();
    let mut prev_depth: Option<usize> = None;

    while let Some(frame) = stack.pop() {
        let closures = match prev_depth {
            Some(d0) if d0 >= frame.depth => d0 - frame.depth + 1,
            _ => 0,
        };
        prev_depth = Some(frame.depth);
        closing
            .close(closures, &mut lin.entries)
            .map_err(|missing| TraversalError::UnbalancedClose {
                node: frame.node,
                depth: frame.depth,
                missing,
            })?;

        if !visited.insert(frame.node) {
            trace!(
                node = %frame.node,
                rel = %frame.rel,
                parent = ?frame.parent,
                index = lin.reentrancies,
                "reentrancy"
            );
            lin.entries.push(SeqEntry::Open(frame.rel.clone()));
            lin.entries.push(SeqEntry::Reentrancy(lin.reentrancies));
            lin.reentrancies += 1;
            closing.push(frame.rel);
            continue;
        }

        let node = graph.node(frame.node);
        let decision = oracle.categorize(graph, frame.node, thresholds);
        if decision.categorized {
            lin.node_to_label
                .insert(frame.node, decision.symbol.clone());
        }

        lin.entries.push(SeqEntry::Open(frame.rel.clone()));
        lin.entries.push(SeqEntry::Symbol {
            symbol: decision.symbol.clone(),
            node: frame.node,
        });
        closing.push(frame.rel);

        // Reversed so that children pop in source order.
        for &edge_idx in node.v_edges.iter().rev() {
            let edge = graph.edge(edge_idx);
            if decision.excludes(&edge.label) {
                continue;
            }
            stack.push(Frame {
                node: edge.tail,
                rel: edge.label.clone(),
                parent: Some(node.concept.clone()),
                depth: frame.depth + 1,
            });
        }
    }

    closing.drain_into(&mut lin.entries);
    Ok(lin)
}
