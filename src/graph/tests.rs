#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::base::{EdgeIdx, NodeIdx};

const WANT_GO: &str = r#"
# ::id sample.1
(w / want-01
   :ARG0 (b / boy)
   :ARG1 (g / go-01
            :ARG0 b))
"#;

const OBAMA: &str = r#"(p / person :name (n / name :op1 "Barack" :op2 "Obama"))"#;

fn n(i: u32) -> NodeIdx {
    NodeIdx::new(i)
}

fn e(i: u32) -> EdgeIdx {
    EdgeIdx::new(i)
}

// ============================================================================
// READER
// ============================================================================

#[test]
fn test_parse_reentrant_graph() {
    let graph = parse_graph(WANT_GO).unwrap();
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 3);
    assert_eq!(graph.root(), n(0));
    assert_eq!(graph.node(n(0)).concept, "want-01");
    assert_eq!(graph.node(n(1)).concept, "boy");
    assert_eq!(graph.node(n(1)).p_edges, vec![e(0), e(2)]);
    assert_eq!(graph.edge(e(2)).label, "ARG0");
    assert_eq!(graph.edge(e(2)).head, n(2));
    assert_eq!(graph.edge(e(2)).tail, n(1));
}

#[test]
fn test_parse_forward_reference() {
    let graph = parse_graph("(a / and :op1 b :op2 (b / boy))").unwrap();
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.node(n(1)).concept, "boy");
    assert_eq!(graph.node(n(1)).p_edges.len(), 2);
}

#[test]
fn test_parse_constants() {
    let graph = parse_graph(r#"(h / have-01 :polarity - :quant 100 :mod "big")"#).unwrap();
    let consts: Vec<_> = graph
        .nodes()
        .filter(|(_, node)| node.is_const())
        .map(|(_, node)| node.node_str().to_string())
        .collect();
    assert_eq!(consts, vec!["-", "100", "big"]);
    assert!(graph.node(n(2)).is_number());
    assert!(!graph.node(n(1)).is_number());
}

#[test]
fn test_parse_multiple_graphs() {
    let graphs = parse_graphs(&format!("{WANT_GO}\n\n{OBAMA}\n")).unwrap();
    assert_eq!(graphs.len(), 2);
    assert_eq!(graphs[1].node(graphs[1].root()).concept, "person");
}

#[test]
fn test_parse_errors() {
    assert_eq!(parse_graph("  # only a comment\n"), Err(GraphError::Empty));
    assert!(matches!(parse_graph("(a / b"), Err(GraphError::Syntax { .. })));
    assert!(matches!(parse_graph("(a / b :ARG0)"), Err(GraphError::Syntax { .. })));
    assert!(matches!(parse_graph("(a / b) (c / d)"), Err(GraphError::Syntax { .. })));
    assert_eq!(
        parse_graph("(a / b :ARG0 (a / c))"),
        Err(GraphError::DuplicateVariable("a".to_string()))
    );
}

fn nested(depth: usize) -> String {
    let mut text = String::with_capacity(depth * 16);
    for i in 0..depth {
        text.push_str(&format!("(v{i} / c :ARG0 "));
    }
    text.push_str("(leaf / c)");
    text.push_str(&")".repeat(depth));
    text
}

#[test]
fn test_parse_deep_nesting() {
    let depth = 20_000;
    let graph = parse_graph(&nested(depth)).unwrap();
    assert_eq!(graph.node_count(), depth + 1);
    assert_eq!(graph.edge_count(), depth);
    assert_eq!(graph.node(n(depth as u32)).var.as_deref(), Some("leaf"));
    assert_eq!(graph.edge(e(depth as u32 - 1)).head, n(depth as u32 - 1));

    let unclosed = nested(depth);
    assert!(matches!(
        parse_graph(&unclosed[..unclosed.len() - 1]),
        Err(GraphError::Syntax { .. })
    ));
}

#[test]
fn test_builder_rejects_dangling_edge() {
    let mut builder = SemanticGraph::builder();
    let a = builder.node("a", "alpha");
    builder.edge(a, ":ARG0", n(5));
    assert_eq!(
        builder.build(a),
        Err(GraphError::DanglingEdge { edge: e(0), node: n(5) })
    );
}

// ============================================================================
// ADDRESSES
// ============================================================================

#[test]
fn test_resolve_fragment_addresses() {
    let graph = parse_graph(WANT_GO).unwrap();
    assert_eq!(graph.resolve_fragment("1").unwrap(), FragmentRef::Node(n(0)));
    assert_eq!(graph.resolve_fragment("1.2").unwrap(), FragmentRef::Node(n(2)));
    assert_eq!(graph.resolve_fragment("1.2.1").unwrap(), FragmentRef::Node(n(1)));
    assert_eq!(graph.resolve_fragment("1.1.r").unwrap(), FragmentRef::Edge(e(0)));
    assert_eq!(graph.resolve_fragment("1.2.1.r").unwrap(), FragmentRef::Edge(e(2)));
}

#[test]
fn test_checked_lookups() {
    let graph = parse_graph(WANT_GO).unwrap();
    assert_eq!(graph.get_node(n(2)).map(|node| node.node_str()), Some("go-01"));
    assert_eq!(graph.get_edge(e(1)).map(|edge| edge.tail), Some(n(2)));
    assert!(graph.get_node(n(3)).is_none());
    assert!(graph.get_edge(e(3)).is_none());
}

#[test]
fn test_resolve_fragment_errors() {
    let graph = parse_graph(WANT_GO).unwrap();
    for bad in ["", "2", "1.3", "1.0", "1.x", "1.r", "1.1.r.1"] {
        assert!(
            matches!(graph.resolve_fragment(bad), Err(GraphError::InvalidAddress { .. })),
            "expected `{bad}` to be rejected"
        );
    }
}

// ============================================================================
// ENTITIES AND STATISTICS
// ============================================================================

#[test]
fn test_named_entity_detection() {
    let graph = parse_graph(OBAMA).unwrap();
    assert!(graph.is_named_entity(n(0)));
    assert!(!graph.is_named_entity(n(1)));
    assert_eq!(graph.named_entity_mention(n(0)), vec!["Barack", "Obama"]);
}

#[test]
fn test_extract_entities() {
    let graph = parse_graph(OBAMA).unwrap();
    let entities = graph.extract_entities();
    assert_eq!(entities.len(), 1);
    let (frag, label) = &entities[0];
    assert_eq!(label, "person");
    assert_eq!(frag.root(), n(0));
    assert_eq!(frag.nodes().len(), 4);
    assert_eq!(frag.edges().len(), 3);
}

#[test]
fn test_graph_statistics() {
    let stats = parse_graph(WANT_GO).unwrap().statistics();
    assert_eq!(stats.reentrancies, 1);
    assert_eq!(stats.predicates.get("want-01"), Some(&1));
    assert_eq!(stats.predicates.get("go-01"), Some(&1));
    assert_eq!(stats.variables.get("boy"), Some(&1));

    let stats = parse_graph(OBAMA).unwrap().statistics();
    assert_eq!(stats.named_entities.get("person"), Some(&1));
    assert_eq!(stats.consts.len(), 2);
    assert!(stats.variables.is_empty());
}

#[test]
fn test_self_cycle() {
    let mut builder = SemanticGraph::builder();
    let a = builder.node("a", "alpha");
    builder.edge(a, "mod", a);
    assert!(builder.build(a).unwrap().has_self_cycle());
    assert!(!parse_graph(WANT_GO).unwrap().has_self_cycle());
}

// ============================================================================
// FRAGMENTS
// ============================================================================

#[test]
fn test_fragment_identity_ignores_span() {
    let graph = parse_graph(WANT_GO).unwrap();
    let mut a = Fragment::for_node(&graph, n(1));
    let b = Fragment::for_node(&graph, n(1));
    a.set_span(crate::base::TokenSpan::unit(3));
    assert_eq!(a, b);
    assert_eq!(a.edge(), Some(e(0)));
}

#[test]
fn test_edge_fragment_ext_nodes() {
    let graph = parse_graph(WANT_GO).unwrap();
    let frag = Fragment::for_edge(&graph, e(1));
    assert_eq!(frag.root(), n(0));
    assert!(frag.contains_node(n(2)));
    assert!(frag.ext_nodes().contains(&n(1)));
}

#[test]
fn test_connect_adjacent_merges_parent_and_child() {
    let graph = parse_graph(WANT_GO).unwrap();
    let merged = connect_adjacent(
        vec![Fragment::for_node(&graph, n(1)), Fragment::for_node(&graph, n(2))],
        &graph,
    );
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].root(), n(2));
    assert!(merged[0].edges().contains(&e(2)));
}

#[test]
fn test_connect_adjacent_keeps_distant_fragments() {
    let graph = parse_graph(OBAMA).unwrap();
    let merged = connect_adjacent(
        vec![Fragment::for_node(&graph, n(2)), Fragment::for_node(&graph, n(3))],
        &graph,
    );
    assert_eq!(merged.len(), 2);
}
