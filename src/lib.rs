//! # amr2seq
//!
//! Linearization of AMR-style semantic graphs into bracketed symbol
//! sequences, with token alignments reconciled into categorized spans.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! pipeline    → Corpus loading, parallel runs, output streams
//!   ↓
//! linearize   → DFS traversal with reentrancy, token collapse, span audit
//!   ↓
//! categorize  → Corpus statistics, categorization oracle
//!   ↓
//! align       → Alignment records, reconciliation, span merging, conflicts
//!   ↓
//! graph       → Graph model, PENMAN reader (logos), addresses, fragments
//!   ↓
//! base        → Primitives (NodeIdx, EdgeIdx, TokenSpan, constants)
//! ```
//!
//! The library only emits `tracing` events; installing a subscriber is up
//! to the host application.

// ============================================================================
// MODULES (dependency order: base → graph → align → categorize → linearize → pipeline)
// ============================================================================

/// Foundation types: typed indices, token spans, shared symbols
pub mod base;

/// Semantic graphs: model, PENMAN reader, fragment addresses, fragments
pub mod graph;

/// Token ↔ graph alignment: reconciliation, span merging, conflict resolution
pub mod align;

/// Corpus statistics and the categorization oracle
pub mod categorize;

/// Depth-first linearization and token collapse
pub mod linearize;

/// Corpus driver: configuration, input streams, runs
pub mod pipeline;

// Re-export foundation types
pub use base::{EdgeIdx, NodeIdx, TokenSpan};

pub use align::{AlignmentError, AlignmentRecord};
pub use categorize::{AmrStats, CategoryDecision, Categorizer, FrequencyCategorizer, Thresholds};
pub use graph::{GraphError, SemanticGraph, parse_graph, parse_graphs};
pub use linearize::{SentenceOutput, SpanAudit, TraversalError, linearize};
pub use pipeline::{
    FailurePolicy, LinearizeConfig, Pipeline, PipelineError, RunReport, SentenceError,
    process_sentence,
};
