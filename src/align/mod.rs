//! Token ↔ graph alignment: reconciliation, span merging and conflict resolution.
//!
//! ```text
//! "3-1.2" records ─► reconcile ─► NodeMapping (node → spans, op/role tokens)
//!                                   │
//!                  entity spans ◄───┤ collect_candidates
//!                                   ▼
//!                          candidate spans per node
//!                                   │ categorized_spans (+ category labels)
//!                                   ▼
//!                         ResolvedSpans (non-overlapping)
//! ```

mod candidates;
mod conflict;
mod entity;
mod error;
mod merge;
mod reconcile;
mod record;

pub use candidates::{CandidateSpans, EntityAlignmentCounts, collect_candidates};
pub use conflict::{ResolvedSpans, categorized_spans};
pub use entity::{EntitySpans, all_aligned_spans, remove_redundant};
pub use error::AlignmentError;
pub use merge::{merge_span_map, merge_spans};
pub use reconcile::{
    AnchoredToken, FragmentMapping, NodeMapping, Reconciliation, build_bimap, extract_fragments,
    extract_node_mapping, rebuild_fragment_map, reconcile,
};
pub use record::{AlignmentRecord, parse_records};
