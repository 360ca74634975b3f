//! Raw `tokenIndex-fragmentId` alignment records.

use std::fmt;
use std::str::FromStr;

use smol_str::SmolStr;

use super::error::AlignmentError;
use crate::graph::{FragmentRef, SemanticGraph};

/// One token aligned to one fragment address.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AlignmentRecord {
    pub token: usize,
    pub fragment: SmolStr,
}

impl AlignmentRecord {
    pub fn new(token: usize, fragment: impl Into<SmolStr>) -> Self {
        Self {
            token,
            fragment: fragment.into(),
        }
    }

    /// Resolve the fragment address against the sentence graph.
    pub fn resolve(&self, graph: &SemanticGraph) -> Result<FragmentRef, AlignmentError> {
        graph
            .resolve_fragment(&self.fragment)
            .map_err(|source| AlignmentError::Unresolved {
                record: self.to_string(),
                source,
            })
    }
}

impl FromStr for AlignmentRecord {
    type Err = AlignmentError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (token, fragment) = raw
            .split_once('-')
            .ok_or_else(|| AlignmentError::malformed(raw, "missing `-` separator"))?;
        let token: usize = token
            .parse()
            .map_err(|_| AlignmentError::malformed(raw, "token index is not a number"))?;
        // A token must be able to end a width-1 span.
        if token.checked_add(1).is_none() {
            return Err(AlignmentError::malformed(raw, "token index out of range"));
        }
        if fragment.is_empty() {
            return Err(AlignmentError::malformed(raw, "empty fragment id"));
        }
        Ok(Self::new(token, fragment))
    }
}

impl fmt::Display for AlignmentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.token, self.fragment)
    }
}

/// Parse one whitespace-separated line of alignment records.
pub fn parse_records(line: &str) -> Result<Vec<AlignmentRecord>, AlignmentError> {
    line.split_whitespace().map(str::parse).collect()
}
