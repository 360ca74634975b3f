//! Error types for sentence processing and corpus runs.

use std::path::PathBuf;

use thiserror::Error;

use crate::align::AlignmentError;
use crate::categorize::StatsError;
use crate::graph::GraphError;
use crate::linearize::TraversalError;

/// Why a single sentence could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SentenceError {
    #[error(transparent)]
    Alignment(#[from] AlignmentError),

    #[error(transparent)]
    Traversal(#[from] TraversalError),

    #[error("{tokens} tokens but {pos} part-of-speech tags")]
    PosMismatch { tokens: usize, pos: usize },
}

/// Errors that end a corpus run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The parallel input streams disagree on the number of sentences.
    #[error("input shape mismatch: {graphs} graphs, {alignments} alignments, {tokens} token lines, {pos} pos lines")]
    InputShapeMismatch {
        graphs: usize,
        alignments: usize,
        tokens: usize,
        pos: usize,
    },

    #[error("invalid graph file {path}: {source}")]
    Graph {
        path: PathBuf,
        #[source]
        source: GraphError,
    },

    #[error(transparent)]
    Stats(#[from] StatsError),

    /// A sentence failed under [`FailurePolicy::Abort`](super::FailurePolicy::Abort).
    #[error("sentence {index} failed: {source}")]
    SentenceFailed {
        index: usize,
        #[source]
        source: SentenceError,
    },
}

impl PipelineError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}
