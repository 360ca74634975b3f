//! Shared symbols, relation names and file names.

// ============================================================================
// LINEARIZED SEQUENCE SYMBOLS
// ============================================================================

/// Opening bracket suffix: `ARG0(`
pub const LBR: &str = "(";
/// Closing bracket prefix: `)ARG0`
pub const RBR: &str = ")";
/// Relation label of the frame that starts a traversal.
pub const TOP: &str = "TOP";
/// Prefix of reentrancy reference symbols: `RET-0`, `RET-1`, ...
pub const RET: &str = "RET";

// ============================================================================
// RELATIONS AND CONCEPTS
// ============================================================================

/// Relation from a named-entity root to its name node.
pub const NAME_REL: &str = "name";
/// Concept of a name node.
pub const NAME_CONCEPT: &str = "name";
/// Wikification relation, dropped together with the name.
pub const WIKI_REL: &str = "wiki";
/// Prefix of operator relations (`op1`, `op2`, ...).
pub const OP_PREFIX: &str = "op";
/// Concept of date entities.
pub const DATE_ENTITY: &str = "date-entity";

// ============================================================================
// CATEGORY LABELS
// ============================================================================

pub const NE_PREFIX: &str = "NE_";
pub const ENT_PREFIX: &str = "ENT_";
pub const DATE_LABEL: &str = "DATE";
pub const NUMBER_LABEL: &str = "NUMBER";
pub const PRED_LABEL: &str = "PRED";
pub const NONPRED_LABEL: &str = "NONPRED";

// ============================================================================
// CORPUS FILES
// ============================================================================

pub const AMR_FILE: &str = "amr";
pub const ALIGNMENT_FILE: &str = "alignment";
pub const TOKEN_FILE: &str = "token";
pub const LEMMA_FILE: &str = "lemmatized_token";
pub const POS_FILE: &str = "pos";

pub const AMR_SEQ_FILE: &str = "amrseq";
pub const TOK_SEQ_FILE: &str = "tokseq";
pub const MAP_SEQ_FILE: &str = "mapseq";

// ============================================================================
// STATISTICS FILES
// ============================================================================

pub const PRED_STATS_FILE: &str = "pred";
pub const NON_PRED_STATS_FILE: &str = "non_pred_val";
pub const CONST_STATS_FILE: &str = "const";
pub const ENTITY_STATS_FILE: &str = "entities";
pub const NAMED_ENTITY_STATS_FILE: &str = "named_entities";

/// Default frequency threshold for predicates and non-predicate concepts.
pub const DEFAULT_MIN_FREQ: usize = 50;
