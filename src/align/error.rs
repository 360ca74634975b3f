//! Error types for alignment records.

use thiserror::Error;

use crate::graph::GraphError;

/// Errors raised while reading or resolving alignment records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlignmentError {
    /// The record is not of the form `tokenIndex-fragmentId`.
    #[error("malformed alignment record `{record}`: {reason}")]
    Malformed { record: String, reason: &'static str },

    /// The fragment id does not resolve against the sentence graph.
    #[error("alignment record `{record}` does not resolve: {source}")]
    Unresolved {
        record: String,
        #[source]
        source: GraphError,
    },
}

impl AlignmentError {
    pub fn malformed(record: impl Into<String>, reason: &'static str) -> Self {
        Self::Malformed {
            record: record.into(),
            reason,
        }
    }
}
