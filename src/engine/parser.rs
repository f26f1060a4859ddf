//! Source parsing against a loaded grammar.

use anyhow::{anyhow, Result};
use tree_sitter::{Parser, Tree};

/// Parse source text with the given grammar.
///
/// A fresh `Parser` is constructed per call; the tree-sitter `Parser` is
/// stateful and not shareable across threads. Malformed input still
/// yields a usable tree (the grammars recover from errors); only a
/// catastrophic `None` from the underlying parser is reported as failure.
pub fn parse_source(grammar: &tree_sitter::Language, source: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(grammar)
        .map_err(|e| anyhow!("grammar rejected by parser: {e}"))?;

    parser
        .parse(source.as_bytes(), None)
        .ok_or_else(|| anyhow!("parser produced no tree"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_rust() {
        let tree = parse_source(&tree_sitter_rust::language(), "fn main() {}\n").unwrap();
        assert_eq!(tree.root_node().kind(), "source_file");
        assert!(!tree.root_node().has_error());
    }

    #[test]
    fn test_malformed_input_still_yields_tree() {
        let tree = parse_source(&tree_sitter_rust::language(), "fn broken( {{{\n").unwrap();
        assert!(tree.root_node().has_error());
    }

    #[test]
    fn test_deterministic() {
        let grammar = tree_sitter_python::language();
        let a = parse_source(&grammar, "def f():\n    pass\n").unwrap();
        let b = parse_source(&grammar, "def f():\n    pass\n").unwrap();
        assert_eq!(a.root_node().to_sexp(), b.root_node().to_sexp());
    }
}
