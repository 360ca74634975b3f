//! Token spans over a sentence.

use std::fmt;
use std::ops::Range;

/// A half-open interval `[start, end)` over token indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenSpan {
    pub start: usize,
    pub end: usize,
}

impl TokenSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The width-1 span covering a single token.
    pub fn unit(token: usize) -> Self {
        Self::new(token, token + 1)
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Token indices covered by this span.
    pub fn tokens(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn contains(&self, token: usize) -> bool {
        self.start <= token && token < self.end
    }

    pub fn overlaps(&self, other: &TokenSpan) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The tokens of `tokens` covered by this span, clamped to the sentence.
    pub fn slice<'a, S: AsRef<str>>(&self, tokens: &'a [S]) -> &'a [S] {
        let end = self.end.min(tokens.len());
        let start = self.start.min(end);
        &tokens[start..end]
    }
}

impl fmt::Display for TokenSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
