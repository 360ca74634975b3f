//! Depth-first linearization of a sentence graph.
//!
//! ```text
//! SemanticGraph ──► traverse (oracle) ──► Vec<SeqEntry> + node→category
//!                                                │
//! candidate spans ──► categorized_spans ──► collapse(tokens)
//!                                                │
//!                                                ▼
//!                        SentenceOutput { amr_seq, tok_seq, map_seq }
//! ```
//!
//! The graph sequence brackets every node between `<rel>(` and `)<rel>`;
//! the root is entered through `TOP`. A node reached a second time is
//! written as `RET-<k>` and not expanded again.

mod collapse;
mod error;
mod output;
mod traversal;

pub use collapse::{Collapsed, collapse};
pub use error::TraversalError;
pub use output::{SentenceOutput, SpanAudit};
pub use traversal::{ClosingStack, Linearization, SeqEntry, traverse};

use indexmap::IndexMap;
use tracing::debug;

use crate::align::categorized_spans;
use crate::base::{NodeIdx, TokenSpan};
use crate::categorize::{Categorizer, Thresholds};
use crate::graph::SemanticGraph;

/// Linearize one sentence.
///
/// `candidates` holds the candidate spans per node; only nodes the oracle
/// places in a category compete for them.
pub fn linearize<S, C>(
    graph: &SemanticGraph,
    tokens: &[S],
    candidates: &IndexMap<NodeIdx, Vec<TokenSpan>>,
    oracle: &C,
    thresholds: Thresholds,
) -> Result<SentenceOutput, TraversalError>
where
    S: AsRef<str>,
    C: Categorizer + ?Sized,
{
    let lin = traverse(graph, oracle, thresholds)?;
    let resolved = categorized_spans(candidates, &lin.node_to_label);
    let collapsed = collapse(graph, tokens, &resolved);

    debug!(
        symbols = lin.entries.len(),
        categorized = lin.node_to_label.len(),
        spans = resolved.span_map.len(),
        reentrancies = lin.reentrancies,
        "linearized sentence"
    );

    let amr_seq = lin
        .entries
        .iter()
        .map(|entry| entry.render(&collapsed.node_labels))
        .collect();

    Ok(SentenceOutput {
        amr_seq,
        tok_seq: collapsed.tok_seq,
        map_seq: collapsed.audits,
        reentrancies: lin.reentrancies,
    })
}

#[cfg(test)]
mod tests;
