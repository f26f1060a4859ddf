//! Lazy grammar and query cache.
//!
//! Grammars and their compiled queries are loaded on first use, keyed by
//! language, and kept for the lifetime of the registry. The loadable set
//! is a registration table built at construction.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use tracing::{debug, warn};
use tree_sitter::Query;

use crate::engine::queries;
use crate::processing::Language;

/// A compiled grammar plus the structural query bound to it.
///
/// Immutable after load; shared across worker tasks via `Arc`.
pub struct LanguageSupport {
    pub grammar: tree_sitter::Language,
    pub query: Query,
}

type GrammarLoader = fn() -> tree_sitter::Language;

/// Process-wide cache of loaded grammars and compiled queries.
pub struct GrammarRegistry {
    loaders: HashMap<Language, GrammarLoader>,
    loaded: Mutex<HashMap<Language, Arc<LanguageSupport>>>,
}

impl Default for GrammarRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl GrammarRegistry {
    /// Create a registry with all built-in grammar loaders registered.
    pub fn new() -> Self {
        Self {
            loaders: builtin_loaders().into_iter().collect(),
            loaded: Mutex::new(HashMap::new()),
        }
    }

    /// Load (or return cached) support for every requested language.
    ///
    /// Languages without a registered grammar are silently omitted, as is
    /// any language whose load fails; one failure never affects the rest
    /// of the set. Failures are not cached, so a later call retries.
    pub fn ensure_loaded(
        &self,
        languages: &HashSet<Language>,
    ) -> HashMap<Language, Arc<LanguageSupport>> {
        let mut result = HashMap::new();

        // One lock for the whole call: concurrent first use of a language
        // cannot trigger a duplicate load.
        let mut loaded = self
            .loaded
            .lock()
            .expect("grammar registry mutex poisoned");

        for &language in languages {
            if let Some(support) = loaded.get(&language) {
                result.insert(language, Arc::clone(support));
                continue;
            }

            let Some(&loader) = self.loaders.get(&language) else {
                debug!(language = language.as_str(), "no grammar registered");
                continue;
            };

            match compile_support(language, loader) {
                Ok(support) => {
                    let support = Arc::new(support);
                    debug!(language = language.as_str(), "loaded grammar and query");
                    loaded.insert(language, Arc::clone(&support));
                    result.insert(language, support);
                }
                Err(e) => {
                    warn!(
                        language = language.as_str(),
                        error = %e,
                        "failed to load grammar support"
                    );
                }
            }
        }

        result
    }
}

fn compile_support(language: Language, loader: GrammarLoader) -> Result<LanguageSupport> {
    let grammar = loader();
    let text = queries::query_source(language)
        .ok_or_else(|| anyhow!("no query registered for {}", language.as_str()))?;
    let query = Query::new(&grammar, text)
        .map_err(|e| anyhow!("query compilation failed for {}: {e}", language.as_str()))?;

    Ok(LanguageSupport { grammar, query })
}

/// The grammar registration table. Adding a language is a data addition.
fn builtin_loaders() -> Vec<(Language, GrammarLoader)> {
    vec![
        (Language::Python, tree_sitter_python::language),
        (Language::JavaScript, tree_sitter_javascript::language),
        (
            Language::TypeScript,
            tree_sitter_typescript::language_typescript,
        ),
        (
            Language::TypeScriptReact,
            tree_sitter_typescript::language_tsx,
        ),
        (Language::Go, tree_sitter_go::language),
        (Language::Rust, tree_sitter_rust::language),
        (Language::Java, tree_sitter_java::language),
        (Language::C, tree_sitter_c::language),
        (Language::Cpp, tree_sitter_cpp::language),
        (Language::Ruby, tree_sitter_ruby::language),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(languages: &[Language]) -> HashSet<Language> {
        languages.iter().copied().collect()
    }

    #[test]
    fn test_loads_requested_languages() {
        let registry = GrammarRegistry::new();
        let loaded = registry.ensure_loaded(&set(&[Language::Rust, Language::Python]));

        assert_eq!(loaded.len(), 2);
        assert!(loaded.contains_key(&Language::Rust));
        assert!(loaded.contains_key(&Language::Python));
    }

    #[test]
    fn test_every_builtin_language_compiles() {
        let registry = GrammarRegistry::new();
        let all: Vec<Language> = builtin_loaders().iter().map(|&(l, _)| l).collect();
        let loaded = registry.ensure_loaded(&set(&all));

        assert_eq!(loaded.len(), all.len());
    }

    #[test]
    fn test_unknown_languages_omitted() {
        let registry = GrammarRegistry::new();
        let loaded =
            registry.ensure_loaded(&set(&[Language::Markdown, Language::Unknown, Language::Go]));

        assert_eq!(loaded.len(), 1);
        assert!(loaded.contains_key(&Language::Go));
    }

    #[test]
    fn test_cache_is_idempotent() {
        let registry = GrammarRegistry::new();
        let first = registry.ensure_loaded(&set(&[Language::Rust]));
        let second = registry.ensure_loaded(&set(&[Language::Rust]));

        assert!(Arc::ptr_eq(
            &first[&Language::Rust],
            &second[&Language::Rust]
        ));
    }
}
