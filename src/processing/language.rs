//! Language definitions and extension-based detection.
//!
//! Maps file extensions to the languages the extraction engine supports,
//! either through a tree-sitter grammar or through the text fallback.

use std::collections::HashMap;
use std::path::Path;

/// Languages the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    // Grammar-backed languages
    Python,
    JavaScript,
    TypeScript,
    TypeScriptReact,
    Go,
    Rust,
    Java,
    C,
    Cpp,
    Ruby,

    // Fallback-only (no formal grammar; heading scanner)
    Markdown,

    /// No grammar and no fallback.
    Unknown,
}

impl Language {
    /// Whether a tree-sitter grammar backs this language.
    pub fn has_grammar(&self) -> bool {
        !matches!(self, Language::Markdown | Language::Unknown)
    }

    /// Whether the language is served by the text fallback parser.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Language::Markdown)
    }

    /// Get a string representation of the language.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::TypeScriptReact => "tsx",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::Java => "java",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::Ruby => "ruby",
            Language::Markdown => "markdown",
            Language::Unknown => "unknown",
        }
    }
}

/// Extension-based language detector.
///
/// The extension table is static data populated once at construction;
/// adding a language means adding rows, not new control flow.
#[derive(Debug, Clone)]
pub struct LanguageDetector {
    extension_map: HashMap<&'static str, Language>,
}

impl Default for LanguageDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageDetector {
    /// Create a detector with the default extension mappings.
    pub fn new() -> Self {
        let mut extension_map = HashMap::new();

        for ext in ["py", "pyi", "pyw"] {
            extension_map.insert(ext, Language::Python);
        }
        for ext in ["js", "mjs", "cjs", "jsx"] {
            extension_map.insert(ext, Language::JavaScript);
        }
        extension_map.insert("ts", Language::TypeScript);
        extension_map.insert("tsx", Language::TypeScriptReact);
        extension_map.insert("go", Language::Go);
        extension_map.insert("rs", Language::Rust);
        extension_map.insert("java", Language::Java);
        for ext in ["c", "h"] {
            extension_map.insert(ext, Language::C);
        }
        for ext in ["cpp", "cc", "cxx", "hpp", "hxx", "hh"] {
            extension_map.insert(ext, Language::Cpp);
        }
        for ext in ["rb", "rake"] {
            extension_map.insert(ext, Language::Ruby);
        }
        for ext in ["md", "markdown"] {
            extension_map.insert(ext, Language::Markdown);
        }

        Self { extension_map }
    }

    /// Detect the language of a path from its extension.
    pub fn detect(&self, path: &Path) -> Language {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        self.extension_map
            .get(extension.as_str())
            .copied()
            .unwrap_or(Language::Unknown)
    }
}
