//! Assembly of candidate spans per node.
//!
//! Entity fragments contribute first, so an entity root keeps the spans
//! derived from its operator tokens rather than its own direct alignment.
//! Every other aligned node follows with its merged spans.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use tracing::{debug, trace};

use super::entity::{all_aligned_spans, remove_redundant};
use super::reconcile::NodeMapping;
use crate::base::{NodeIdx, TokenSpan};
use crate::graph::SemanticGraph;

/// How entity fragments found their spans.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EntityAlignmentCounts {
    pub total: usize,
    /// Entities realized by exactly one span.
    pub single: usize,
    /// Entities realized by several spans.
    pub multiple: usize,
    /// Entities with no aligned token.
    pub empty: usize,
}

impl EntityAlignmentCounts {
    pub fn add(&mut self, other: &EntityAlignmentCounts) {
        self.total += other.total;
        self.single += other.single;
        self.multiple += other.multiple;
        self.empty += other.empty;
    }
}

#[derive(Clone, Debug, Default)]
pub struct CandidateSpans {
    pub spans: IndexMap<NodeIdx, Vec<TokenSpan>>,
    pub entities: EntityAlignmentCounts,
}

/// Gather candidate spans for every node of the sentence.
pub fn collect_candidates<S: AsRef<str>>(
    graph: &SemanticGraph,
    tokens: &[S],
    mapping: &NodeMapping,
) -> CandidateSpans {
    let unaligned: BTreeSet<usize> = (0..tokens.len())
        .filter(|t| !mapping.aligned.contains(t))
        .collect();

    let mut out = CandidateSpans::default();
    for (frag, label) in graph.extract_entities() {
        if mapping.op_toks.is_empty() {
            debug!(entity = %label, "no operator alignment for entity");
        }
        out.entities.total += 1;

        let found = all_aligned_spans(&frag, &mapping.op_toks, &mapping.role_toks, &unaligned);
        let entry = out.spans.entry(frag.root()).or_default();
        if found.spans.is_empty() {
            out.entities.empty += 1;
            continue;
        }

        let mention = graph.named_entity_mention(frag.root());
        let spans = remove_redundant(tokens, found.spans, &mention);
        if spans.len() == 1 {
            out.entities.single += 1;
        } else {
            out.entities.multiple += 1;
            trace!(entity = %label, aligned = ?found.aligned, "entity spread over several spans");
        }
        entry.extend(spans);
    }

    for (&node, spans) in &mapping.node_spans {
        if out.spans.contains_key(&node) {
            continue;
        }
        if spans.len() > 1 {
            trace!(%node, concept = graph.node(node).node_str(), ?spans, "node aligned to several spans");
        }
        out.spans.insert(node, spans.clone());
    }
    out
}
