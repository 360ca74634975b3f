//! Foundation types for the amr2seq toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`NodeIdx`], [`EdgeIdx`] - Graph element identifiers (disjoint index spaces)
//! - [`TokenSpan`] - Half-open token intervals
//! - Domain constants (bracket symbols, relation names, file names)
//!
//! This module has NO dependencies on other amr2seq modules.

pub mod constants;
mod ids;
mod span;

pub use ids::{EdgeIdx, NodeIdx};
pub use span::TokenSpan;
