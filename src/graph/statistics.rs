//! Per-graph concept counts feeding corpus statistics.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::graph::SemanticGraph;
use crate::base::constants::NAME_CONCEPT;

/// Occurrence counts gathered from one graph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphStatistics {
    /// Named entities, keyed by entity type (`person`, `country`, ...).
    pub named_entities: FxHashMap<SmolStr, usize>,
    /// Entity-like concepts (`date-entity`, `monetary-quantity`, ...).
    pub entities: FxHashMap<SmolStr, usize>,
    /// Predicate concepts (`want-01`).
    pub predicates: FxHashMap<SmolStr, usize>,
    /// Other concepts.
    pub variables: FxHashMap<SmolStr, usize>,
    /// Constant values.
    pub consts: FxHashMap<SmolStr, usize>,
    /// Extra incoming edges over all nodes: a node with three parents adds two.
    pub reentrancies: usize,
}

impl SemanticGraph {
    pub fn statistics(&self) -> GraphStatistics {
        let mut stats = GraphStatistics::default();
        for (idx, node) in self.nodes() {
            stats.reentrancies += node.p_edges.len().saturating_sub(1);

            let bucket = if node.is_const() {
                &mut stats.consts
            } else if self.is_named_entity(idx) {
                &mut stats.named_entities
            } else if node.is_entity_concept() {
                &mut stats.entities
            } else if node.is_predicate() {
                &mut stats.predicates
            } else if node.concept == NAME_CONCEPT {
                continue;
            } else {
                &mut stats.variables
            };
            *bucket.entry(node.concept.clone()).or_default() += 1;
        }
        stats
    }
}
