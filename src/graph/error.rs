//! Error types for graph construction, reading and addressing.

use text_size::TextSize;
use thiserror::Error;

use crate::base::{EdgeIdx, NodeIdx};

/// Errors raised while building, parsing or addressing a semantic graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// PENMAN syntax error at a byte offset.
    #[error("syntax error at offset {}: {message}", u32::from(*offset))]
    Syntax { message: String, offset: TextSize },

    /// The input held no graph at all.
    #[error("empty graph input")]
    Empty,

    /// A variable was defined twice within one graph.
    #[error("variable `{0}` defined more than once")]
    DuplicateVariable(String),

    /// An edge endpoint does not reference a node of the same graph.
    #[error("edge {edge} references missing node {node}")]
    DanglingEdge { edge: EdgeIdx, node: NodeIdx },

    /// The designated root is not a node of the graph.
    #[error("root {0} is not a node of the graph")]
    MissingRoot(NodeIdx),

    /// A fragment address does not resolve against the graph.
    #[error("invalid fragment address `{address}`: {reason}")]
    InvalidAddress { address: String, reason: &'static str },
}

impl GraphError {
    /// Create a syntax error at the given byte offset.
    pub fn syntax(message: impl Into<String>, offset: TextSize) -> Self {
        Self::Syntax {
            message: message.into(),
            offset,
        }
    }

    /// Create an addressing error.
    pub fn invalid_address(address: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidAddress {
            address: address.into(),
            reason,
        }
    }
}
