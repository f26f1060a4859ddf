//! Mechanical query execution against a syntax tree.
//!
//! No filtering and no labeling happens here; every capture the query
//! produces is materialized as plain data for the synthesizer.

use anyhow::{anyhow, Result};
use tree_sitter::{Node, QueryCursor, Tree};

use crate::engine::registry::LanguageSupport;

/// Upper bound on in-flight query matches for one file.
pub const QUERY_MATCH_LIMIT: u32 = 10_000;

/// 0-based inclusive line range of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    pub start_line: usize,
    pub end_line: usize,
}

/// One capture produced by query execution.
#[derive(Debug, Clone)]
pub struct RawCapture {
    /// The capture tag from the query (e.g. `definition.function`).
    pub name: String,
    /// Span of the captured node itself.
    pub span: LineSpan,
    /// Span of the captured node's parent, when it has one. The
    /// synthesizer uses this to widen identifier captures to their
    /// enclosing declaration.
    pub parent_span: Option<LineSpan>,
}

/// Execute the compiled query over a tree and collect every capture.
pub fn run_query(support: &LanguageSupport, tree: &Tree, source: &str) -> Result<Vec<RawCapture>> {
    let mut cursor = QueryCursor::new();
    cursor.set_match_limit(QUERY_MATCH_LIMIT);

    let mut captures = Vec::new();
    for query_match in cursor.matches(&support.query, tree.root_node(), source.as_bytes()) {
        for capture in query_match.captures {
            let name = support.query.capture_names()[capture.index as usize].to_string();
            captures.push(RawCapture {
                name,
                span: span_of(capture.node),
                parent_span: capture.node.parent().map(span_of),
            });
        }
    }

    if cursor.did_exceed_match_limit() {
        return Err(anyhow!("query match limit exceeded"));
    }

    Ok(captures)
}

fn span_of(node: Node) -> LineSpan {
    LineSpan {
        start_line: node.start_position().row,
        end_line: node.end_position().row,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::parser::parse_source;
    use crate::engine::registry::GrammarRegistry;
    use crate::processing::Language;

    fn rust_support() -> std::sync::Arc<LanguageSupport> {
        let registry = GrammarRegistry::new();
        let loaded = registry.ensure_loaded(&[Language::Rust].into_iter().collect());
        loaded[&Language::Rust].clone()
    }

    #[test]
    fn test_function_capture_pair() {
        let source = "fn add(a: i32, b: i32) -> i32 {\n    a + b\n}\n";
        let support = rust_support();
        let tree = parse_source(&support.grammar, source).unwrap();

        let captures = run_query(&support, &tree, source).unwrap();

        let block = captures
            .iter()
            .find(|c| c.name == "definition.function")
            .unwrap();
        assert_eq!(block.span, LineSpan { start_line: 0, end_line: 2 });

        let name = captures
            .iter()
            .find(|c| c.name == "name.definition.function")
            .unwrap();
        // The identifier sits on one line; its parent is the whole item.
        assert_eq!(name.span, LineSpan { start_line: 0, end_line: 0 });
        assert_eq!(
            name.parent_span,
            Some(LineSpan { start_line: 0, end_line: 2 })
        );
    }

    #[test]
    fn test_no_captures_on_bare_statements() {
        let source = "static X: u8 = 1;\n";
        let support = rust_support();
        let tree = parse_source(&support.grammar, source).unwrap();

        let captures = run_query(&support, &tree, source).unwrap();
        assert!(captures.is_empty());
    }
}
