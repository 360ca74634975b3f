//! Global span conflict resolution.
//!
//! Nodes with fewer candidate spans decide first; a span loses as soon as
//! one of its tokens was already claimed. Ties keep candidate insertion
//! order. This is a greedy approximation of an assignment problem and is
//! kept greedy so outputs are reproducible.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::trace;

use crate::base::{NodeIdx, TokenSpan};

/// Winning spans of one sentence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedSpans {
    /// Winning span → (node, category label), in decision order.
    pub span_map: IndexMap<TokenSpan, (NodeIdx, SmolStr)>,
    /// Span start → span end for every winning span.
    pub end_index_map: FxHashMap<usize, usize>,
    /// Tokens covered by some winning span.
    pub covered: BTreeSet<usize>,
}

impl ResolvedSpans {
    /// The winning span starting at `token`, with its node and label.
    pub fn span_at(&self, token: usize) -> Option<(TokenSpan, NodeIdx, &SmolStr)> {
        let end = *self.end_index_map.get(&token)?;
        let span = TokenSpan::new(token, end);
        let (node, label) = self.span_map.get(&span)?;
        Some((span, *node, label))
    }
}

/// Pick a non-overlapping set of spans among categorized nodes.
///
/// Only nodes present in `node_to_label` compete.
pub fn categorized_spans(
    candidates: &IndexMap<NodeIdx, Vec<TokenSpan>>,
    node_to_label: &FxHashMap<NodeIdx, SmolStr>,
) -> ResolvedSpans {
    let mut ordered: Vec<(&NodeIdx, &Vec<TokenSpan>)> = candidates.iter().collect();
    ordered.sort_by_key(|(_, spans)| spans.len());

    let mut resolved = ResolvedSpans::default();
    for (&node, spans) in ordered {
        let Some(label) = node_to_label.get(&node) else {
            continue;
        };
        for &span in spans {
            if span.is_empty() {
                continue;
            }
            if span.tokens().any(|t| resolved.covered.contains(&t)) {
                trace!(%node, %span, "span lost to an earlier claim");
                continue;
            }
            resolved.covered.extend(span.tokens());
            resolved.span_map.insert(span, (node, label.clone()));
            resolved.end_index_map.insert(span.start, span.end);
        }
    }
    resolved
}
