//! Frequency-threshold categorization.

use smol_str::{SmolStr, format_smolstr};

use super::{AmrStats, CategoryDecision, Categorizer, Thresholds};
use crate::base::NodeIdx;
use crate::base::constants::{
    DATE_LABEL, ENT_PREFIX, NAME_REL, NE_PREFIX, NONPRED_LABEL, NUMBER_LABEL, PRED_LABEL,
    WIKI_REL,
};
use crate::graph::SemanticGraph;

/// The default oracle, backed by frozen corpus statistics.
///
/// | node                         | symbol          | descends into          |
/// |------------------------------|-----------------|------------------------|
/// | named-entity root            | `NE_<concept>`  | all but `name`, `wiki` |
/// | `date-entity`                | `DATE`          | nothing                |
/// | other `*-entity`/`*-quantity`| `ENT_<concept>` | nothing                |
/// | numeric constant             | `NUMBER`        | -                      |
/// | rare predicate¹              | `PRED`          | all                    |
/// | rare other concept¹          | `NONPRED`       | all                    |
/// | anything else                | literal         | all                    |
///
/// ¹ only with `index_unknown`, when the corpus count is below the threshold.
#[derive(Clone, Copy, Debug)]
pub struct FrequencyCategorizer<'a> {
    stats: &'a AmrStats,
    index_unknown: bool,
}

impl<'a> FrequencyCategorizer<'a> {
    pub fn new(stats: &'a AmrStats) -> Self {
        Self {
            stats,
            index_unknown: false,
        }
    }

    /// Replace rare concepts by `PRED` / `NONPRED` categories.
    pub fn with_index_unknown(mut self, index_unknown: bool) -> Self {
        self.index_unknown = index_unknown;
        self
    }
}

fn all_relations(graph: &SemanticGraph, node: NodeIdx) -> Vec<SmolStr> {
    graph.children(node).map(|(_, e)| e.label.clone()).collect()
}

impl Categorizer for FrequencyCategorizer<'_> {
    fn categorize(
        &self,
        graph: &SemanticGraph,
        node: NodeIdx,
        thresholds: Thresholds,
    ) -> CategoryDecision {
        let n = graph.node(node);

        if graph.is_named_entity(node) {
            return CategoryDecision::category(format_smolstr!("{NE_PREFIX}{}", n.concept))
                .excluding([NAME_REL, WIKI_REL]);
        }
        if n.is_date_entity() {
            return CategoryDecision::category(DATE_LABEL).excluding(all_relations(graph, node));
        }
        if n.is_entity_concept() {
            return CategoryDecision::category(format_smolstr!("{ENT_PREFIX}{}", n.concept))
                .excluding(all_relations(graph, node));
        }
        if n.is_const() {
            return if n.is_number() {
                CategoryDecision::category(NUMBER_LABEL)
            } else {
                CategoryDecision::literal(n.concept.clone())
            };
        }

        if self.index_unknown {
            if n.is_predicate() {
                if self.stats.predicate_count(&n.concept) < thresholds.pred {
                    return CategoryDecision::category(PRED_LABEL);
                }
            } else if self.stats.nonpredicate_count(&n.concept) < thresholds.var {
                return CategoryDecision::category(NONPRED_LABEL);
            }
        }
        CategoryDecision::literal(n.concept.clone())
    }
}
