//! Grammar engine: registry, queries, parsing, and capture extraction.
//!
//! This module provides:
//! - Lazy, mutex-guarded loading of tree-sitter grammars and queries
//! - The static per-language structural query catalog
//! - Parsing of source text into syntax trees
//! - Mechanical query execution yielding raw captures

pub mod captures;
pub mod parser;
pub mod queries;
pub mod registry;

pub use captures::{run_query, LineSpan, RawCapture};
pub use parser::parse_source;
pub use registry::{GrammarRegistry, LanguageSupport};
