//! Node categorization: corpus statistics and the oracle consulted during
//! linearization.
//!
//! Statistics follow a build-then-freeze lifecycle: [`AmrStats`] is collected
//! (or loaded) before any sentence is linearized and is only read afterwards.

mod error;
mod frequency;
mod stats;

pub use error::StatsError;
pub use frequency::FrequencyCategorizer;
pub use stats::AmrStats;

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::base::NodeIdx;
use crate::base::constants::DEFAULT_MIN_FREQ;
use crate::graph::SemanticGraph;

/// Minimum corpus frequencies below which concepts are treated as unknown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Thresholds {
    pub pred: usize,
    pub var: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            pred: DEFAULT_MIN_FREQ,
            var: DEFAULT_MIN_FREQ,
        }
    }
}

/// What the oracle decided for one node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryDecision {
    /// Outgoing relations the traversal must not descend into.
    pub exclude_rels: FxHashSet<SmolStr>,
    /// Symbol emitted for the node.
    pub symbol: SmolStr,
    /// Whether `symbol` is a closed-class category label rather than a literal.
    pub categorized: bool,
}

impl CategoryDecision {
    pub fn literal(symbol: impl Into<SmolStr>) -> Self {
        Self {
            exclude_rels: FxHashSet::default(),
            symbol: symbol.into(),
            categorized: false,
        }
    }

    pub fn category(symbol: impl Into<SmolStr>) -> Self {
        Self {
            categorized: true,
            ..Self::literal(symbol)
        }
    }

    pub fn excluding<I, S>(mut self, rels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.exclude_rels.extend(rels.into_iter().map(Into::into));
        self
    }

    pub fn excludes(&self, rel: &str) -> bool {
        self.exclude_rels.contains(rel)
    }
}

/// Decides how a node is displayed in the linearized sequence.
pub trait Categorizer: Sync {
    fn categorize(
        &self,
        graph: &SemanticGraph,
        node: NodeIdx,
        thresholds: Thresholds,
    ) -> CategoryDecision;
}
