//! Token sequence collapse over the winning spans.

use rustc_hash::FxHashMap;
use smol_str::{SmolStr, format_smolstr};

use super::output::SpanAudit;
use crate::align::ResolvedSpans;
use crate::base::NodeIdx;
use crate::graph::SemanticGraph;

/// The token side of a sentence after categorization.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Collapsed {
    pub tok_seq: Vec<SmolStr>,
    pub audits: Vec<SpanAudit>,
    /// Indexed label (`NE_person-0`) per node that won a span. A node with
    /// several spans keeps the label of its last one.
    pub node_labels: FxHashMap<NodeIdx, SmolStr>,
}

/// Replace every winning span by its indexed label.
///
/// Labels are numbered per category in token order. Tokens inside a span
/// other than its first are dropped; uncovered tokens pass through.
pub fn collapse<S: AsRef<str>>(
    graph: &SemanticGraph,
    tokens: &[S],
    resolved: &ResolvedSpans,
) -> Collapsed {
    let mut counters: FxHashMap<SmolStr, usize> = FxHashMap::default();
    let mut out = Collapsed::default();

    for (index, token) in tokens.iter().enumerate() {
        if !resolved.covered.contains(&index) {
            out.tok_seq.push(SmolStr::new(token.as_ref()));
            continue;
        }
        let Some((span, node, label)) = resolved.span_at(index) else {
            continue;
        };

        let counter = counters.entry(label.clone()).or_default();
        let indexed = format_smolstr!("{label}-{counter}");
        *counter += 1;

        let surface = span
            .slice(tokens)
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>()
            .join(" ");
        out.audits.push(SpanAudit {
            span,
            surface,
            node,
            node_str: SmolStr::new(graph.node(node).node_str()),
            label: indexed.clone(),
        });
        out.node_labels.insert(node, indexed.clone());
        out.tok_seq.push(indexed);
    }
    out
}
