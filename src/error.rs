//! Per-file error taxonomy for extraction outcomes.
//!
//! Every failure mode a single file can hit is tagged here so batch
//! results can report partial success instead of aborting the run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why extraction failed for one file.
///
/// Produced at the coordinator boundary; never propagates across files.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The extension maps to no grammar and no fallback parser.
    #[error("unsupported language for {}", path.display())]
    UnsupportedLanguage { path: PathBuf },

    /// A grammar exists for the language but failed to initialize.
    #[error("grammar for {language} failed to load")]
    GrammarLoadFailure { language: &'static str },

    /// The parser returned no tree at all. Rare: tree-sitter recovers
    /// from malformed input rather than failing.
    #[error("parse failed for {}", path.display())]
    ParseFailure { path: PathBuf },

    /// The compiled query could not be executed against the tree.
    #[error("query execution failed for {}: {reason}", path.display())]
    QueryExecutionFailure { path: PathBuf, reason: String },

    /// The source could not be read or decoded.
    #[error("failed to read {}: {source}", path.display())]
    IOFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ExtractionError {
    /// Short tag for logs and reports.
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractionError::UnsupportedLanguage { .. } => "unsupported_language",
            ExtractionError::GrammarLoadFailure { .. } => "grammar_load_failure",
            ExtractionError::ParseFailure { .. } => "parse_failure",
            ExtractionError::QueryExecutionFailure { .. } => "query_execution_failure",
            ExtractionError::IOFailure { .. } => "io_failure",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let err = ExtractionError::UnsupportedLanguage {
            path: PathBuf::from("file.xyz"),
        };
        assert_eq!(err.kind(), "unsupported_language");

        let err = ExtractionError::IOFailure {
            path: PathBuf::from("gone.rs"),
            source: io::Error::new(io::ErrorKind::NotFound, "vanished"),
        };
        assert_eq!(err.kind(), "io_failure");
        assert!(err.to_string().contains("gone.rs"));
    }
}
