//! Span extraction for named-entity fragments.

use std::collections::BTreeSet;

use rustc_hash::FxHashSet;

use super::reconcile::AnchoredToken;
use crate::base::TokenSpan;
use crate::graph::Fragment;

/// Tokens anchoring an entity and the spans they form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntitySpans {
    /// Sorted, deduplicated token indices whose node lies in the fragment.
    pub aligned: Vec<usize>,
    pub spans: Vec<TokenSpan>,
}

/// Compute the spans realizing an entity fragment.
///
/// Operator and role tokens whose node belongs to the fragment are grouped
/// into contiguous spans. Two consecutive anchor tokens stay in one span only
/// when every token between them is unaligned; a token claimed by anything
/// else ends the span.
pub fn all_aligned_spans(
    frag: &Fragment,
    op_toks: &[AnchoredToken],
    role_toks: &[AnchoredToken],
    unaligned: &BTreeSet<usize>,
) -> EntitySpans {
    let aligned: Vec<usize> = op_toks
        .iter()
        .chain(role_toks)
        .filter(|anchored| frag.contains_node(anchored.node))
        .map(|anchored| anchored.token)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut spans = Vec::new();
    let mut iter = aligned.iter().copied();
    if let Some(first) = iter.next() {
        let mut start = first;
        let mut prev = first;
        for next in iter {
            let bridged = (prev + 1..next).all(|t| unaligned.contains(&t));
            if !bridged {
                spans.push(TokenSpan::new(start, prev + 1));
                start = next;
            }
            prev = next;
        }
        spans.push(TokenSpan::new(start, prev + 1));
    }

    EntitySpans { aligned, spans }
}

fn surface<S: AsRef<str>>(tokens: &[S], span: &TokenSpan) -> Vec<String> {
    span.slice(tokens)
        .iter()
        .map(|t| t.as_ref().to_lowercase())
        .collect()
}

fn is_strict_part(part: &[String], whole: &[String]) -> bool {
    !part.is_empty() && part.len() < whole.len() && whole.windows(part.len()).any(|w| w == part)
}

/// Drop spans that repeat the entity's surface form.
///
/// Repeated surface strings keep only their first span. When some span spells
/// the whole mention, spans covering only a strict part of it are dropped too.
/// Comparison is case-insensitive.
pub fn remove_redundant<S: AsRef<str>>(
    tokens: &[S],
    spans: Vec<TokenSpan>,
    mention: &[String],
) -> Vec<TokenSpan> {
    let mention: Vec<String> = mention.iter().map(|m| m.to_lowercase()).collect();

    let mut seen = FxHashSet::default();
    let mut kept: Vec<(TokenSpan, Vec<String>)> = spans
        .into_iter()
        .map(|span| (span, surface(tokens, &span)))
        .filter(|(_, words)| seen.insert(words.clone()))
        .collect();

    if kept.iter().any(|(_, words)| *words == mention) {
        kept.retain(|(_, words)| !is_strict_part(words, &mention));
    }
    kept.into_iter().map(|(span, _)| span).collect()
}
