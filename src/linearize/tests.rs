#![allow(clippy::unwrap_used, clippy::expect_used)]

use indexmap::IndexMap;
use rstest::rstest;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::*;
use crate::base::{NodeIdx, TokenSpan};
use crate::categorize::{AmrStats, CategoryDecision, Categorizer, FrequencyCategorizer, Thresholds};
use crate::graph::{SemanticGraph, parse_graph};

/// Categorizes a fixed set of concepts, everything else is literal.
struct FixedCategorizer(Vec<(&'static str, &'static str)>);

impl Categorizer for FixedCategorizer {
    fn categorize(&self, graph: &SemanticGraph, node: NodeIdx, _: Thresholds) -> CategoryDecision {
        let concept = graph.node(node).node_str();
        match self.0.iter().find(|(c, _)| *c == concept) {
            Some((_, label)) => CategoryDecision::category(*label),
            None => CategoryDecision::literal(concept),
        }
    }
}

fn literal() -> FixedCategorizer {
    FixedCategorizer(Vec::new())
}

fn n(i: u32) -> NodeIdx {
    NodeIdx::new(i)
}

fn spans(entries: &[(u32, &[(usize, usize)])]) -> IndexMap<NodeIdx, Vec<TokenSpan>> {
    entries
        .iter()
        .map(|(node, s)| (n(*node), s.iter().map(|&(a, b)| TokenSpan::new(a, b)).collect()))
        .collect()
}

fn run(
    graph: &str,
    tokens: &[&str],
    candidates: &IndexMap<NodeIdx, Vec<TokenSpan>>,
    oracle: &dyn Categorizer,
) -> SentenceOutput {
    let graph = parse_graph(graph).unwrap();
    linearize(&graph, tokens, candidates, oracle, Thresholds::default()).unwrap()
}

// ============================================================================
// TRAVERSAL
// ============================================================================

#[test]
fn test_operator_children_without_categories() {
    let out = run(
        "(a / and :op1 (c / cat) :op2 (s / sit-01))",
        &["the", "cat", "sat"],
        &spans(&[(0, &[(0, 1)]), (1, &[(1, 2)]), (2, &[(2, 3)])]),
        &literal(),
    );
    assert_eq!(out.amr_line(), "TOP( and op1( cat )op1 op2( sit-01 )op2 )TOP");
    assert_eq!(out.tok_line(), "the cat sat");
    assert!(out.map_seq.is_empty());
    assert_eq!(out.reentrancies, 0);
}

#[test]
fn test_climbing_closes_every_level() {
    let out = run(
        "(a / a1 :x (b / b1 :y (c / c1)) :z (d / d1))",
        &[],
        &IndexMap::new(),
        &literal(),
    );
    assert_eq!(
        out.amr_line(),
        "TOP( a1 x( b1 y( c1 )y )x z( d1 )z )TOP"
    );
}

#[test]
fn test_reentrancy_is_referenced_not_expanded() {
    let out = run(
        "(w / want-01 :ARG0 (b / boy :mod (t / tall)) :ARG1 b :ARG2 b)",
        &["the", "boy", "wants"],
        &spans(&[(1, &[(1, 2)])]),
        &FixedCategorizer(vec![("boy", "PERSON")]),
    );
    assert_eq!(
        out.amr_line(),
        "TOP( want-01 ARG0( PERSON-0 mod( tall )mod )ARG0 ARG1( RET-0 )ARG1 ARG2( RET-1 )ARG2 )TOP"
    );
    assert_eq!(out.tok_line(), "the PERSON-0 wants");
    assert_eq!(out.map_line(), "1-2:boy:1:boy:PERSON-0");
    assert_eq!(out.reentrancies, 2);
}

#[test]
fn test_self_cycle() {
    let out = run("(a / self :ARG0 a)", &[], &IndexMap::new(), &literal());
    assert_eq!(out.amr_line(), "TOP( self ARG0( RET-0 )ARG0 )TOP");
}

#[test]
fn test_excluded_relations_are_skipped() {
    let stats = AmrStats::new();
    let out = run(
        "(g / go-01 :time (d / date-entity :year 2015 :month 3))",
        &["went", "in", "March", "2015"],
        &spans(&[(1, &[(2, 4)])]),
        &FrequencyCategorizer::new(&stats),
    );
    assert_eq!(out.amr_line(), "TOP( go-01 time( DATE-0 )time )TOP");
    assert_eq!(out.tok_line(), "went in DATE-0");
    assert_eq!(out.map_line(), "2-4:March 2015:1:date-entity:DATE-0");
}

#[test]
fn test_named_entity_collapses_to_one_label() {
    let stats = AmrStats::new();
    let out = run(
        r#"(s / speak-01 :ARG0 (p / person :name (n / name :op1 "Barack" :op2 "Obama")))"#,
        &["Barack", "Obama", "spoke"],
        &spans(&[(1, &[(0, 2)]), (0, &[(2, 3)])]),
        &FrequencyCategorizer::new(&stats),
    );
    assert_eq!(out.amr_line(), "TOP( speak-01 ARG0( NE_person-0 )ARG0 )TOP");
    assert_eq!(out.tok_line(), "NE_person-0 spoke");
    assert_eq!(out.map_line(), "0-2:Barack Obama:1:person:NE_person-0");
}

#[test]
fn test_labels_are_numbered_in_token_order() {
    let stats = AmrStats::new();
    let out = run(
        "(h / have-01 :quant 5 :ARG1 7)",
        &["7", "and", "5"],
        &spans(&[(1, &[(2, 3)]), (2, &[(0, 1)])]),
        &FrequencyCategorizer::new(&stats),
    );
    assert_eq!(out.tok_line(), "NUMBER-0 and NUMBER-1");
    assert_eq!(
        out.amr_line(),
        "TOP( have-01 quant( NUMBER-1 )quant ARG1( NUMBER-0 )ARG1 )TOP"
    );
    assert_eq!(out.map_line(), "0-1:7:2:7:NUMBER-0 2-3:5:1:5:NUMBER-1");
}

#[test]
fn test_node_with_two_spans_takes_last_label() {
    let out = run(
        "(s / say-01 :ARG0 (b / boy))",
        &["boy", "said", "boy"],
        &spans(&[(1, &[(0, 1), (2, 3)])]),
        &FixedCategorizer(vec![("boy", "P")]),
    );
    assert_eq!(out.tok_line(), "P-0 said P-1");
    assert_eq!(out.amr_line(), "TOP( say-01 ARG0( P-1 )ARG0 )TOP");
    assert_eq!(out.map_seq.len(), 2);
}

#[test]
fn test_uncategorized_nodes_keep_their_tokens() {
    let out = run(
        "(s / say-01 :ARG0 (b / boy))",
        &["boy", "said"],
        &spans(&[(1, &[(0, 1)]), (0, &[(1, 2)])]),
        &literal(),
    );
    assert_eq!(out.tok_line(), "boy said");
    assert_eq!(out.amr_line(), "TOP( say-01 ARG0( boy )ARG0 )TOP");
}

#[test]
fn test_categorized_node_without_span_keeps_symbol() {
    let out = run(
        "(s / say-01 :ARG0 (b / boy))",
        &["he", "said"],
        &IndexMap::new(),
        &FixedCategorizer(vec![("boy", "P")]),
    );
    assert_eq!(out.amr_line(), "TOP( say-01 ARG0( P )ARG0 )TOP");
    assert_eq!(out.tok_line(), "he said");
}

#[rstest]
#[case("(a / a1)")]
#[case("(a / a1 :x (b / b1 :y (c / c1 :z (d / d1))) :w (e / e1))")]
#[case("(w / want-01 :ARG0 (b / boy) :ARG1 (g / go-01 :ARG0 b :ARG1 (c / city :mod b)))")]
#[case("(a / and :op1 (b / b1 :x a) :op2 (c / c1 :y b :z (d / d1)) :op3 d)")]
fn test_brackets_balance_and_track_depth(#[case] input: &str) {
    let graph = parse_graph(input).unwrap();
    let lin = traverse(&graph, &literal(), Thresholds::default()).unwrap();

    let mut open: Vec<&SmolStr> = Vec::new();
    let mut max_depth = 0;
    for entry in &lin.entries {
        match entry {
            SeqEntry::Open(rel) => open.push(rel),
            SeqEntry::Close(rel) => assert_eq!(open.pop(), Some(rel)),
            SeqEntry::Reentrancy(_) | SeqEntry::Symbol { .. } => assert!(!open.is_empty()),
        }
        max_depth = max_depth.max(open.len());
    }
    assert!(open.is_empty());
    assert!(max_depth >= 1);

    let symbols = lin
        .entries
        .iter()
        .filter(|e| matches!(e, SeqEntry::Symbol { .. }))
        .count();
    assert_eq!(symbols + lin.reentrancies, graph.edge_count() + 1);
}

#[test]
fn test_deep_chain_linearizes() {
    let depth = 20_000;
    let mut input = "(v0 / c".to_string();
    for i in 1..=depth {
        input.push_str(&format!(" :x (v{i} / c"));
    }
    input.push_str(&")".repeat(depth + 1));

    let out = run(&input, &[], &IndexMap::new(), &literal());
    let line = out.amr_line();
    assert!(line.starts_with("TOP( c x( c x( c"));
    assert!(line.ends_with(")x )x )TOP"));
    assert_eq!(line.split(' ').filter(|t| *t == "x(").count(), depth);
    assert_eq!(line.split(' ').filter(|t| *t == ")x").count(), depth);
}

#[test]
fn test_reentrancy_numbers_in_first_seen_order() {
    let graph = parse_graph("(a / and :op1 (b / b1) :op2 (c / c1) :op3 c :op4 b)").unwrap();
    let lin = traverse(&graph, &literal(), Thresholds::default()).unwrap();
    let refs: Vec<String> = lin
        .entries
        .iter()
        .filter(|e| matches!(e, SeqEntry::Reentrancy(_)))
        .map(ToString::to_string)
        .collect();
    assert_eq!(refs, ["RET-0", "RET-1"]);
    assert!(lin.entries.contains(&SeqEntry::Open(SmolStr::new("op3"))));
}

#[test]
fn test_categorized_nodes_are_recorded() {
    let graph = parse_graph("(s / say-01 :ARG0 (b / boy) :ARG1 (g / girl))").unwrap();
    let oracle = FixedCategorizer(vec![("boy", "P"), ("girl", "P")]);
    let lin = traverse(&graph, &oracle, Thresholds::default()).unwrap();
    let expected: FxHashMap<NodeIdx, SmolStr> =
        [(n(1), SmolStr::new("P")), (n(2), SmolStr::new("P"))].into_iter().collect();
    assert_eq!(lin.node_to_label, expected);
}

// ============================================================================
// CLOSING STACK
// ============================================================================

#[test]
fn test_closing_stack_underflow() {
    let mut stack = ClosingStack::new();
    stack.push(SmolStr::new("TOP"));
    let mut out = Vec::new();
    assert_eq!(stack.close(3, &mut out), Err(2));
    assert_eq!(out, [SeqEntry::Close(SmolStr::new("TOP"))]);
    assert!(stack.is_empty());
}

#[test]
fn test_closing_stack_drains_innermost_first() {
    let mut stack = ClosingStack::new();
    stack.push(SmolStr::new("TOP"));
    stack.push(SmolStr::new("ARG0"));
    assert_eq!(stack.len(), 2);
    let mut out = Vec::new();
    stack.drain_into(&mut out);
    let rendered: Vec<String> = out.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, [")ARG0", ")TOP"]);
}

// ============================================================================
// OUTPUT
// ============================================================================

#[test]
fn test_span_audit_format() {
    let audit = SpanAudit {
        span: TokenSpan::new(3, 5),
        surface: "New York".to_string(),
        node: n(7),
        node_str: SmolStr::new("city"),
        label: SmolStr::new("NE_city-0"),
    };
    assert_eq!(audit.to_string(), "3-5:New York:7:city:NE_city-0");
}

#[test]
fn test_empty_output_lines() {
    let out = SentenceOutput::empty();
    assert_eq!(out.amr_line(), "");
    assert_eq!(out.tok_line(), "");
    assert_eq!(out.map_line(), "");
}
