//! The per-sentence core, usable without any files.

use tracing::debug;

use super::corpus::Sentence;
use super::error::SentenceError;
use crate::align::{EntityAlignmentCounts, collect_candidates, parse_records, reconcile};
use crate::categorize::{Categorizer, Thresholds};
use crate::linearize::{SentenceOutput, linearize};

/// Output of one sentence plus what it contributes to the run report.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProcessedSentence {
    pub output: SentenceOutput,
    pub entities: EntityAlignmentCounts,
    pub self_cycle: bool,
}

/// Reconcile, resolve and linearize one sentence.
pub fn process_sentence<C>(
    sentence: &Sentence<'_>,
    oracle: &C,
    thresholds: Thresholds,
) -> Result<ProcessedSentence, SentenceError>
where
    C: Categorizer + ?Sized,
{
    debug!(
        sentence = sentence.index,
        tokens = sentence.tokens.len(),
        "processing sentence"
    );
    if sentence.tokens.len() != sentence.pos.len() {
        return Err(SentenceError::PosMismatch {
            tokens: sentence.tokens.len(),
            pos: sentence.pos.len(),
        });
    }

    let graph = sentence.graph;
    let records = parse_records(sentence.alignment)?;
    let reconciled = reconcile(&records, graph)?;
    let candidates = collect_candidates(graph, sentence.tokens, &reconciled.mapping);
    debug!(
        sentence = sentence.index,
        single = candidates.entities.single,
        multiple = candidates.entities.multiple,
        empty = candidates.entities.empty,
        "entity alignments"
    );

    let output = linearize(graph, sentence.tokens, &candidates.spans, oracle, thresholds)?;
    Ok(ProcessedSentence {
        output,
        entities: candidates.entities,
        self_cycle: graph.has_self_cycle(),
    })
}
