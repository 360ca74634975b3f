//! Semantic graphs: model, reader, addressing and fragments.
//!
//! ```text
//! PENMAN text → lexer (logos) → parser → SemanticGraph
//!                                          ├── resolve_fragment("1.2.r") → FragmentRef
//!                                          ├── extract_entities()        → entity Fragments
//!                                          └── statistics()              → GraphStatistics
//! ```

mod address;
mod error;
mod fragment;
#[allow(clippy::module_inception)]
mod graph;
mod lexer;
mod penman;
mod statistics;

pub use address::FragmentRef;
pub use error::GraphError;
pub use fragment::{Fragment, connect_adjacent};
pub use graph::{Edge, GraphBuilder, Node, SemanticGraph};
pub use lexer::{Lexer, Token, TokenKind};
pub use penman::{parse_graph, parse_graphs};
pub use statistics::GraphStatistics;

#[cfg(test)]
mod tests;
