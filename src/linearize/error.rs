//! Error types for graph traversal.

use thiserror::Error;

use crate::base::NodeIdx;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraversalError {
    /// A closing bracket was required but none was open.
    #[error(
        "no open bracket left to close before node {node} (depth {depth}, {missing} closure(s) missing)"
    )]
    UnbalancedClose {
        node: NodeIdx,
        depth: usize,
        missing: usize,
    },
}
