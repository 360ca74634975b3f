//! Reader for PENMAN graph notation
//!
//! ```text
//! graph := node
//! node  := '(' VAR ['/' CONCEPT] (ROLE value)* ')'
//! value := node | STRING | SYMBOL
//! ```
//!
//! A SYMBOL value naming a variable defined anywhere in the same graph is a
//! reentrancy; any other SYMBOL or STRING value is a constant.

use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;
use text_size::TextSize;

use super::error::GraphError;
use super::graph::{GraphBuilder, SemanticGraph};
use super::lexer::{Token, TokenKind, tokenize};
use crate::base::NodeIdx;

/// Parse every graph in `input`, in order.
pub fn parse_graphs(input: &str) -> Result<Vec<SemanticGraph>, GraphError> {
    let tokens = tokenize(input);
    let mut parser = Parser::new(&tokens, input.len());
    let mut graphs = Vec::new();
    while !parser.at_eof() {
        let tree = parser.parse_node()?;
        graphs.push(build(tree)?);
    }
    Ok(graphs)
}

/// Parse exactly one graph.
pub fn parse_graph(input: &str) -> Result<SemanticGraph, GraphError> {
    let tokens = tokenize(input);
    let mut parser = Parser::new(&tokens, input.len());
    if parser.at_eof() {
        return Err(GraphError::Empty);
    }
    let tree = parser.parse_node()?;
    if !parser.at_eof() {
        return Err(parser.error("trailing input after graph"));
    }
    build(tree)
}

// ============================================================================
// PARSE TREE
// ============================================================================

/// Nodes of one parsed graph in preorder; `nodes[0]` is the top node.
#[derive(Debug)]
struct ParseTree {
    nodes: Vec<ParsedNode>,
}

#[derive(Debug)]
struct ParsedNode {
    var: SmolStr,
    concept: Option<SmolStr>,
    roles: Vec<(SmolStr, Value)>,
}

#[derive(Debug)]
enum Value {
    /// Index into [`ParseTree::nodes`].
    Node(usize),
    Symbol(SmolStr),
    String(SmolStr),
}

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    end: TextSize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>], input_len: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            end: TextSize::new(input_len as u32),
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current().map(|t| t.kind) == Some(kind)
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) -> Option<&Token<'a>> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<&'a str, GraphError> {
        if self.at(kind) {
            let text = self.tokens[self.pos].text;
            self.pos += 1;
            Ok(text)
        } else {
            Err(self.error(format!("expected {what}")))
        }
    }

    fn error(&self, message: impl Into<String>) -> GraphError {
        let offset = self.current().map(|t| t.offset).unwrap_or(self.end);
        GraphError::syntax(message, offset)
    }

    // =========================================================================
    // Grammar
    // =========================================================================

    /// Parse one bracketed node and everything nested in it.
    ///
    /// Open nodes live on an explicit stack, so nesting depth is bounded by
    /// memory only.
    fn parse_node(&mut self) -> Result<ParseTree, GraphError> {
        let mut nodes = vec![self.parse_header()?];
        let mut open = vec![0];

        while let Some(&current) = open.last() {
            if !self.at(TokenKind::Role) {
                self.expect(TokenKind::RParen, "`)`")?;
                open.pop();
                continue;
            }
            let role = SmolStr::new(self.expect(TokenKind::Role, "role")?.trim_start_matches(':'));
            let value = match self.current().map(|t| t.kind) {
                Some(TokenKind::LParen) => {
                    nodes.push(self.parse_header()?);
                    let child = nodes.len() - 1;
                    open.push(child);
                    Value::Node(child)
                }
                Some(TokenKind::Symbol) => {
                    Value::Symbol(SmolStr::new(self.expect(TokenKind::Symbol, "value")?))
                }
                Some(TokenKind::String) => {
                    Value::String(unquote(self.expect(TokenKind::String, "value")?))
                }
                _ => return Err(self.error("expected a node, variable or constant after role")),
            };
            nodes[current].roles.push((role, value));
        }

        Ok(ParseTree { nodes })
    }

    /// `'(' VAR ['/' CONCEPT]`
    fn parse_header(&mut self) -> Result<ParsedNode, GraphError> {
        self.expect(TokenKind::LParen, "`(`")?;
        let var = SmolStr::new(self.expect(TokenKind::Symbol, "variable")?);

        let mut concept = None;
        if self.at(TokenKind::Slash) {
            self.bump();
            concept = Some(match self.current().map(|t| t.kind) {
                Some(TokenKind::Symbol) => SmolStr::new(self.expect(TokenKind::Symbol, "concept")?),
                Some(TokenKind::String) => unquote(self.expect(TokenKind::String, "concept")?),
                _ => return Err(self.error("expected concept after `/`")),
            });
        }

        Ok(ParsedNode {
            var,
            concept,
            roles: Vec::new(),
        })
    }
}

fn unquote(text: &str) -> SmolStr {
    let inner = text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text);
    SmolStr::new(inner)
}

// ============================================================================
// GRAPH CONSTRUCTION
// ============================================================================

fn collect_vars(tree: &ParseTree) -> Result<FxHashSet<SmolStr>, GraphError> {
    let mut vars = FxHashSet::default();
    for node in &tree.nodes {
        if !vars.insert(node.var.clone()) {
            return Err(GraphError::DuplicateVariable(node.var.to_string()));
        }
    }
    Ok(vars)
}

struct Assembler {
    builder: GraphBuilder,
    defined: FxHashSet<SmolStr>,
    var_nodes: FxHashMap<SmolStr, NodeIdx>,
}

impl Assembler {
    fn var_node(&mut self, var: &SmolStr) -> NodeIdx {
        if let Some(&idx) = self.var_nodes.get(var) {
            return idx;
        }
        let idx = self.builder.node(var.clone(), var.clone());
        self.var_nodes.insert(var.clone(), idx);
        idx
    }

    fn set_concept(&mut self, idx: NodeIdx, parsed: &ParsedNode) {
        if let Some(concept) = &parsed.concept {
            self.builder.set_concept(idx, concept.clone());
        }
    }

    /// Add nodes and edges in preorder, each edge right before the subtree
    /// it leads to.
    fn expand(&mut self, tree: &ParseTree, root: NodeIdx) {
        let Some(top) = tree.nodes.first() else {
            return;
        };
        self.set_concept(root, top);

        // (parsed node, graph node, next role)
        let mut stack = vec![(0usize, root, 0usize)];
        while let Some(frame) = stack.last_mut() {
            let (parsed, idx, next) = *frame;
            let Some((role, value)) = tree.nodes[parsed].roles.get(next) else {
                stack.pop();
                continue;
            };
            frame.2 += 1;

            let (tail, subtree) = match value {
                Value::Node(child) => (self.var_node(&tree.nodes[*child].var), Some(*child)),
                Value::Symbol(sym) if self.defined.contains(sym) => (self.var_node(sym), None),
                Value::Symbol(sym) | Value::String(sym) => {
                    (self.builder.constant(sym.clone()), None)
                }
            };
            self.builder.edge(idx, role, tail);
            if let Some(child) = subtree {
                self.set_concept(tail, &tree.nodes[child]);
                stack.push((child, tail, 0));
            }
        }
    }
}

fn build(tree: ParseTree) -> Result<SemanticGraph, GraphError> {
    let defined = collect_vars(&tree)?;
    let Some(top) = tree.nodes.first() else {
        return Err(GraphError::Empty);
    };

    let mut assembler = Assembler {
        builder: SemanticGraph::builder(),
        defined,
        var_nodes: FxHashMap::default(),
    };
    let root = assembler.var_node(&top.var);
    assembler.expand(&tree, root);
    assembler.builder.build(root)
}
