//! Fragment/alignment reconciliation.
//!
//! Raw alignments are many-to-many: a token may claim several fragments and a
//! fragment may be claimed by several tokens. This module turns them into
//! - a token → fragment map where each token keeps its unambiguous fragments
//!   (or, failing that, its least contested one), and
//! - a node → spans map (plus edge → spans) with adjacent tokens merged.
//!
//! Records are walked in reverse input order, so among equal candidates the
//! later record is seen first.

use std::collections::{BTreeMap, BTreeSet};
use std::hash::Hash;

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use super::error::AlignmentError;
use super::merge::merge_span_map;
use super::record::AlignmentRecord;
use crate::base::{EdgeIdx, NodeIdx, TokenSpan};
use crate::graph::{Fragment, FragmentRef, SemanticGraph, connect_adjacent};

/// A token aligned to a node that anchors an entity: an operator value or a
/// named-entity root.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnchoredToken {
    pub token: usize,
    pub node: NodeIdx,
    /// The node's parent edge, the relation that places it in the entity.
    pub edge: Option<EdgeIdx>,
}

/// Node and edge span maps extracted from one sentence's alignment.
#[derive(Clone, Debug, Default)]
pub struct NodeMapping {
    pub op_toks: Vec<AnchoredToken>,
    pub role_toks: Vec<AnchoredToken>,
    pub node_spans: IndexMap<NodeIdx, Vec<TokenSpan>>,
    pub edge_spans: IndexMap<EdgeIdx, Vec<TokenSpan>>,
    /// Every token index that appears in some record.
    pub aligned: BTreeSet<usize>,
}

/// Token → fragments after reconciliation.
#[derive(Clone, Debug, Default)]
pub struct FragmentMapping {
    pub op_toks: Vec<AnchoredToken>,
    pub role_toks: Vec<AnchoredToken>,
    pub token_fragments: BTreeMap<usize, Vec<Fragment>>,
}

/// Everything the reconciler learns from one sentence.
#[derive(Clone, Debug, Default)]
pub struct Reconciliation {
    pub token_fragments: BTreeMap<usize, Vec<Fragment>>,
    pub mapping: NodeMapping,
}

impl Reconciliation {
    /// The fragment a token resolved to.
    pub fn token_fragment(&self, token: usize) -> Option<&Fragment> {
        self.token_fragments.get(&token).and_then(|frags| frags.first())
    }
}

/// Run both reconciliation passes over one sentence.
pub fn reconcile(
    records: &[AlignmentRecord],
    graph: &SemanticGraph,
) -> Result<Reconciliation, AlignmentError> {
    let fragments = extract_fragments(records, graph)?;
    let mapping = extract_node_mapping(records, graph)?;
    debug!(
        records = records.len(),
        tokens = fragments.token_fragments.len(),
        nodes = mapping.node_spans.len(),
        "reconciled alignment"
    );
    Ok(Reconciliation {
        token_fragments: fragments.token_fragments,
        mapping,
    })
}

/// Record operator and named-entity tokens for `node`.
fn anchor(
    graph: &SemanticGraph,
    token: usize,
    node: NodeIdx,
    op_toks: &mut Vec<AnchoredToken>,
    role_toks: &mut Vec<AnchoredToken>,
) {
    let anchored = AnchoredToken {
        token,
        node,
        edge: graph.parent_edge(node),
    };
    let parents = &graph.node(node).p_edges;
    if parents.len() == 1 && graph.edge(parents[0]).is_op() {
        op_toks.push(anchored);
    }
    if graph.is_named_entity(node) {
        role_toks.push(anchored);
    }
}

/// Collect raw spans per node and per edge, then merge them.
pub fn extract_node_mapping(
    records: &[AlignmentRecord],
    graph: &SemanticGraph,
) -> Result<NodeMapping, AlignmentError> {
    let mut mapping = NodeMapping::default();
    let mut node_spans: IndexMap<NodeIdx, Vec<TokenSpan>> = IndexMap::new();
    let mut edge_spans: IndexMap<EdgeIdx, Vec<TokenSpan>> = IndexMap::new();

    for record in records.iter().rev() {
        let span = TokenSpan::unit(record.token);
        mapping.aligned.insert(record.token);

        match record.resolve(graph)? {
            FragmentRef::Node(node) => {
                node_spans.entry(node).or_default().push(span);
                anchor(
                    graph,
                    record.token,
                    node,
                    &mut mapping.op_toks,
                    &mut mapping.role_toks,
                );
            }
            FragmentRef::Edge(edge) => edge_spans.entry(edge).or_default().push(span),
        }
    }

    mapping.node_spans = merge_span_map(node_spans);
    mapping.edge_spans = merge_span_map(edge_spans);
    Ok(mapping)
}

/// Build per-token fragments, connect adjacent ones and make the map unambiguous.
pub fn extract_fragments(
    records: &[AlignmentRecord],
    graph: &SemanticGraph,
) -> Result<FragmentMapping, AlignmentError> {
    let mut out = FragmentMapping::default();
    let mut tok2frags: BTreeMap<usize, Vec<Fragment>> = BTreeMap::new();

    for record in records.iter().rev() {
        let frag = match record.resolve(graph)? {
            FragmentRef::Node(node) => {
                anchor(graph, record.token, node, &mut out.op_toks, &mut out.role_toks);
                Fragment::for_node(graph, node)
            }
            FragmentRef::Edge(edge) => Fragment::for_edge(graph, edge),
        };
        tok2frags.entry(record.token).or_default().push(frag);
    }

    for frags in tok2frags.values_mut() {
        if frags.len() > 1 {
            *frags = connect_adjacent(std::mem::take(frags), graph);
        }
    }

    let mut tok2frags = rebuild_fragment_map(tok2frags);
    for (&token, frags) in tok2frags.iter_mut() {
        for frag in frags {
            frag.set_span(TokenSpan::unit(token));
        }
    }
    out.token_fragments = tok2frags;
    Ok(out)
}

/// Index both directions of a token ↔ fragment relation.
pub fn build_bimap<F>(
    tok2frags: &BTreeMap<usize, Vec<F>>,
) -> (BTreeMap<usize, FxHashSet<F>>, FxHashMap<F, BTreeSet<usize>>)
where
    F: Clone + Eq + Hash,
{
    let mut index2frags: BTreeMap<usize, FxHashSet<F>> = BTreeMap::new();
    let mut frag2map: FxHashMap<F, BTreeSet<usize>> = FxHashMap::default();
    for (&index, frags) in tok2frags {
        for frag in frags {
            index2frags.entry(index).or_default().insert(frag.clone());
            frag2map.entry(frag.clone()).or_default().insert(index);
        }
    }
    (index2frags, frag2map)
}

/// Make the token → fragment map unambiguous.
///
/// Tokens are visited in ascending order. For a token with several
/// candidates, fragments no other token claims are kept. Every contested
/// fragment gives up this token's claim, so later tokens may still win it;
/// the least contested one (first seen on ties) is the fallback when no
/// uncontested candidate exists.
pub fn rebuild_fragment_map<F>(mut tok2frags: BTreeMap<usize, Vec<F>>) -> BTreeMap<usize, Vec<F>>
where
    F: Clone + Eq + Hash,
{
    for frags in tok2frags.values_mut() {
        let mut seen = FxHashSet::default();
        frags.retain(|f| seen.insert(f.clone()));
    }

    let (_, mut frag2map) = build_bimap(&tok2frags);
    for (&index, frags) in tok2frags.iter_mut() {
        if frags.len() <= 1 {
            continue;
        }
        let mut kept = Vec::new();
        let mut fallback: Option<(usize, F)> = None;
        for frag in frags.drain(..) {
            let Some(claimants) = frag2map.get_mut(&frag) else {
                continue;
            };
            if claimants.len() > 1 {
                if fallback.as_ref().is_none_or(|(len, _)| claimants.len() < *len) {
                    fallback = Some((claimants.len(), frag.clone()));
                }
                claimants.remove(&index);
            } else {
                kept.push(frag);
            }
        }
        if kept.is_empty() {
            kept.extend(fallback.map(|(_, frag)| frag));
        }
        *frags = kept;
    }
    tok2frags
}
