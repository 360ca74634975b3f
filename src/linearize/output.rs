//! Per-sentence output streams.

use std::fmt;

use smol_str::SmolStr;

use crate::base::{NodeIdx, TokenSpan};

/// Audit record of one winning span: `start-end:surface:node:node_str:label`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpanAudit {
    pub span: TokenSpan,
    /// Covered tokens joined by single spaces.
    pub surface: String,
    pub node: NodeIdx,
    pub node_str: SmolStr,
    /// Indexed label the span collapsed to.
    pub label: SmolStr,
}

impl fmt::Display for SpanAudit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}:{}:{}:{}:{}",
            self.span.start, self.span.end, self.surface, self.node, self.node_str, self.label
        )
    }
}

/// The three output lines of one sentence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SentenceOutput {
    pub amr_seq: Vec<SmolStr>,
    pub tok_seq: Vec<SmolStr>,
    pub map_seq: Vec<SpanAudit>,
    pub reentrancies: usize,
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    let mut line = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        line.push_str(&item.to_string());
    }
    line
}

impl SentenceOutput {
    /// Placeholder for a sentence that failed, keeping line correspondence.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn amr_line(&self) -> String {
        join(&self.amr_seq)
    }

    pub fn tok_line(&self) -> String {
        join(&self.tok_seq)
    }

    pub fn map_line(&self) -> String {
        join(&self.map_seq)
    }
}
