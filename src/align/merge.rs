//! Merging of per-token spans into maximal contiguous spans.

use std::hash::Hash;

use indexmap::IndexMap;
use tracing::trace;

use crate::base::TokenSpan;

/// Merge a list of spans into maximal contiguous windows.
///
/// Spans are stably sorted by end. A span starting at or before the open
/// window's end extends it; a gap closes the window. The last window is
/// always flushed. Starts are never moved backwards, so with equal ends the
/// result depends on input order.
pub fn merge_spans(spans: &[TokenSpan]) -> Vec<TokenSpan> {
    let mut sorted = spans.to_vec();
    sorted.sort_by_key(|span| span.end);

    let mut merged = Vec::new();
    let mut window: Option<TokenSpan> = None;
    for span in sorted {
        window = match window {
            None => Some(span),
            Some(open) if span.start > open.end => {
                merged.push(open);
                Some(span)
            }
            Some(open) => Some(TokenSpan::new(open.start, open.end.max(span.end))),
        };
    }
    if let Some(open) = window {
        merged.push(open);
    }
    merged
}

/// Apply [`merge_spans`] to every entry of a span map, keeping key order.
pub fn merge_span_map<K>(map: IndexMap<K, Vec<TokenSpan>>) -> IndexMap<K, Vec<TokenSpan>>
where
    K: Hash + Eq + std::fmt::Debug,
{
    map.into_iter()
        .map(|(key, spans)| {
            let merged = merge_spans(&spans);
            if merged.len() != spans.len() {
                trace!(?key, raw = spans.len(), merged = merged.len(), "merged spans");
            }
            (key, merged)
        })
        .collect()
}
