//! Per-file and batch extraction orchestration.
//!
//! The coordinator resolves each path to a language, routes it through
//! the grammar path (registry, parser, query) or the text fallback, and
//! feeds both into the synthesizer. Every per-file failure is caught and
//! tagged; nothing aborts a batch.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::engine::{parse_source, run_query, GrammarRegistry, LanguageSupport};
use crate::error::ExtractionError;
use crate::processing::{decode_source, is_binary, scan_headings, Language, LanguageDetector};
use crate::synthesis::{synthesize, SynthesisPolicy};
use crate::types::{BatchReport, ExtractionConfig, FileOutcome};

/// Byte window inspected when sniffing for binary content.
const BINARY_SNIFF_WINDOW: usize = 8192;

/// Collaborator that may veto specific paths before parsing.
///
/// A veto skips the file; it is never reported as an error.
pub trait AccessPolicy: Send + Sync {
    fn allows(&self, path: &Path) -> bool;
}

/// Default policy: every path is allowed.
pub struct AllowAll;

impl AccessPolicy for AllowAll {
    fn allows(&self, _path: &Path) -> bool {
        true
    }
}

/// Orchestrates definition extraction across files.
#[derive(Clone)]
pub struct ExtractionCoordinator {
    registry: Arc<GrammarRegistry>,
    detector: LanguageDetector,
    policy: SynthesisPolicy,
    access: Arc<dyn AccessPolicy>,
    config: ExtractionConfig,
}

impl ExtractionCoordinator {
    /// Create a coordinator with the given configuration.
    pub fn new(config: ExtractionConfig) -> Self {
        Self {
            registry: Arc::new(GrammarRegistry::new()),
            detector: LanguageDetector::new(),
            policy: SynthesisPolicy::with_min_lines(config.min_definition_lines),
            access: Arc::new(AllowAll),
            config,
        }
    }

    /// Replace the access-control collaborator.
    pub fn with_access_policy(mut self, access: Arc<dyn AccessPolicy>) -> Self {
        self.access = access;
        self
    }

    /// Replace the synthesis policy wholesale.
    pub fn with_synthesis_policy(mut self, policy: SynthesisPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Extract definitions from a single file.
    pub fn extract_file(&self, path: &Path) -> FileOutcome {
        let language = self.detector.detect(path);
        let support = if language.has_grammar() {
            self.registry.ensure_loaded(&std::iter::once(language).collect())
        } else {
            HashMap::new()
        };

        self.resolve_and_extract(path, &support)
    }

    /// Extract definitions from a batch of files.
    ///
    /// Grammars are resolved once for the whole batch, then files are
    /// processed on a bounded worker pool with per-file isolation. Vetoed
    /// paths are omitted from the result map and counted in the report.
    pub async fn extract_paths(
        &self,
        paths: Vec<PathBuf>,
    ) -> (HashMap<PathBuf, FileOutcome>, BatchReport) {
        let total_files = paths.len();
        info!(total_files, "starting batch extraction");

        let requested: HashSet<Language> = paths
            .iter()
            .map(|path| self.detector.detect(path))
            .filter(Language::has_grammar)
            .collect();
        let support = Arc::new(self.registry.ensure_loaded(&requested));

        let semaphore = Arc::new(Semaphore::new(self.config.concurrency.max(1)));
        let mut tasks = JoinSet::new();

        for path in paths {
            let coordinator = self.clone();
            let support = Arc::clone(&support);
            let semaphore = Arc::clone(&semaphore);

            tasks.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("batch semaphore closed");
                let outcome = coordinator.resolve_and_extract(&path, &support);
                (path, outcome)
            });
        }

        let mut outcomes = HashMap::new();
        let mut report = BatchReport {
            total_files,
            ..Default::default()
        };

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((path, outcome)) => {
                    report.record(&outcome);
                    match &outcome {
                        FileOutcome::Skipped => {
                            debug!(path = %path.display(), "path vetoed, skipping");
                            continue;
                        }
                        FileOutcome::Failed(error) => {
                            warn!(
                                path = %path.display(),
                                kind = error.kind(),
                                error = %error,
                                "file extraction failed"
                            );
                        }
                        _ => {}
                    }
                    outcomes.insert(path, outcome);
                }
                Err(e) => warn!(error = %e, "extraction task aborted"),
            }
        }

        info!(
            extracted = report.extracted,
            empty = report.empty,
            skipped = report.skipped,
            failed = report.failed,
            "batch extraction complete"
        );

        (outcomes, report)
    }

    /// Veto check, language dispatch, and extraction for one path.
    fn resolve_and_extract(
        &self,
        path: &Path,
        support_map: &HashMap<Language, Arc<LanguageSupport>>,
    ) -> FileOutcome {
        if !self.access.allows(path) {
            return FileOutcome::Skipped;
        }

        let language = self.detector.detect(path);
        if language == Language::Unknown {
            return FileOutcome::Failed(ExtractionError::UnsupportedLanguage {
                path: path.to_path_buf(),
            });
        }

        if language.has_grammar() {
            match support_map.get(&language) {
                Some(support) => self.extract_with(path, Some(support)),
                // Absent from a map that was resolved for this batch:
                // the load failed and is not retried within the call.
                None => FileOutcome::Failed(ExtractionError::GrammarLoadFailure {
                    language: language.as_str(),
                }),
            }
        } else {
            self.extract_with(path, None)
        }
    }

    /// Run the grammar or fallback pipeline and synthesize the outline.
    fn extract_with(&self, path: &Path, support: Option<&Arc<LanguageSupport>>) -> FileOutcome {
        let source = match self.read_source(path) {
            Ok(source) => source,
            Err(error) => return FileOutcome::Failed(error),
        };

        let captures = match support {
            Some(support) => {
                let tree = match parse_source(&support.grammar, &source) {
                    Ok(tree) => tree,
                    Err(e) => {
                        debug!(path = %path.display(), error = %e, "parser fault");
                        return FileOutcome::Failed(ExtractionError::ParseFailure {
                            path: path.to_path_buf(),
                        });
                    }
                };

                match run_query(support, &tree, &source) {
                    Ok(captures) => captures,
                    Err(e) => {
                        return FileOutcome::Failed(ExtractionError::QueryExecutionFailure {
                            path: path.to_path_buf(),
                            reason: e.to_string(),
                        })
                    }
                }
            }
            None => scan_headings(&source),
        };

        let lines: Vec<&str> = source.lines().collect();
        match synthesize(&captures, &lines, &self.policy) {
            Some(records) => FileOutcome::Definitions(records),
            None => FileOutcome::Empty,
        }
    }

    /// Read and decode one file, enforcing the size and binary guards.
    fn read_source(&self, path: &Path) -> Result<String, ExtractionError> {
        let bytes = fs::read(path).map_err(|source| ExtractionError::IOFailure {
            path: path.to_path_buf(),
            source,
        })?;

        if bytes.len() > self.config.max_file_size {
            return Err(ExtractionError::IOFailure {
                path: path.to_path_buf(),
                source: io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("file exceeds {} bytes", self.config.max_file_size),
                ),
            });
        }

        if is_binary(&bytes, BINARY_SNIFF_WINDOW) {
            return Err(ExtractionError::IOFailure {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::InvalidData, "binary content"),
            });
        }

        Ok(decode_source(&bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    fn coordinator() -> ExtractionCoordinator {
        ExtractionCoordinator::new(ExtractionConfig::default())
    }

    const RUST_FN: &str = "fn greet(name: &str) -> String {\n    let mut s = String::from(\"hello \");\n    s.push_str(name);\n    s\n}\n";

    #[test]
    fn test_single_rust_definition() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "greet.rs", RUST_FN);

        let outcome = coordinator().extract_file(&path);
        let records = outcome.definitions().expect("expected definitions");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].start_line, 0);
        assert_eq!(records[0].end_line, 4);
        assert_eq!(records[0].label, "fn greet(name: &str) -> String {");
    }

    #[test]
    fn test_three_line_function_respects_min_lines() {
        let dir = TempDir::new().unwrap();
        let source = "function add(a,b) {\n  return a+b;\n}\n";
        let path = write_file(&dir, "add.js", source);

        let strict = coordinator().extract_file(&path);
        assert!(matches!(strict, FileOutcome::Empty));

        let relaxed = ExtractionCoordinator::new(ExtractionConfig::default().with_min_lines(3))
            .extract_file(&path);
        let records = relaxed.definitions().expect("expected definitions");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].start_line, 0);
        assert_eq!(records[0].end_line, 2);
        assert_eq!(records[0].label, "function add(a,b) {");
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "data.xyz", "nothing here\n");

        let outcome = coordinator().extract_file(&path);
        assert!(matches!(
            outcome,
            FileOutcome::Failed(ExtractionError::UnsupportedLanguage { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_failure() {
        let outcome = coordinator().extract_file(Path::new("/nonexistent/void.rs"));
        assert!(matches!(
            outcome,
            FileOutcome::Failed(ExtractionError::IOFailure { .. })
        ));
    }

    #[test]
    fn test_markdown_fallback_sections() {
        let dir = TempDir::new().unwrap();
        let doc = "# Intro\none\ntwo\nthree\nfour\n# Usage\nfive\nsix\nseven\n";
        let path = write_file(&dir, "README.md", doc);

        let outcome = coordinator().extract_file(&path);
        let records = outcome.definitions().expect("expected sections");

        assert_eq!(records.len(), 2);
        assert_eq!((records[0].start_line, records[0].end_line), (0, 4));
        assert_eq!(records[0].label, "# Intro");
        assert_eq!((records[1].start_line, records[1].end_line), (5, 8));
    }

    #[test]
    fn test_access_policy_veto() {
        struct DenyAll;
        impl AccessPolicy for DenyAll {
            fn allows(&self, _path: &Path) -> bool {
                false
            }
        }

        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "greet.rs", RUST_FN);

        let outcome = coordinator()
            .with_access_policy(Arc::new(DenyAll))
            .extract_file(&path);
        assert!(matches!(outcome, FileOutcome::Skipped));
    }

    #[test]
    fn test_no_definitions_is_empty_not_error() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "consts.rs", "static X: u8 = 1;\nstatic Y: u8 = 2;\n");

        let outcome = coordinator().extract_file(&path);
        assert!(matches!(outcome, FileOutcome::Empty));
    }

    #[tokio::test]
    async fn test_batch_isolates_unsupported_file() {
        let dir = TempDir::new().unwrap();
        let mut paths = Vec::new();
        for i in 0..9 {
            paths.push(write_file(
                &dir,
                &format!("mod_{i}.rs"),
                &format!("fn work_{i}() {{\n    let a = {i};\n    let b = a + 1;\n    drop(b);\n}}\n"),
            ));
        }
        let odd = write_file(&dir, "blob.xyz", "opaque\n");
        paths.push(odd.clone());

        let (outcomes, report) = coordinator().extract_paths(paths).await;

        assert_eq!(outcomes.len(), 10);
        assert_eq!(report.total_files, 10);
        assert_eq!(report.extracted, 9);
        assert_eq!(report.failed, 1);
        assert!(matches!(
            outcomes[&odd],
            FileOutcome::Failed(ExtractionError::UnsupportedLanguage { .. })
        ));
    }

    #[tokio::test]
    async fn test_batch_omits_vetoed_paths() {
        struct DenyReadme;
        impl AccessPolicy for DenyReadme {
            fn allows(&self, path: &Path) -> bool {
                path.file_name().and_then(|n| n.to_str()) != Some("README.md")
            }
        }

        let dir = TempDir::new().unwrap();
        let kept = write_file(&dir, "greet.rs", RUST_FN);
        let vetoed = write_file(&dir, "README.md", "# Title\na\nb\nc\nd\n");

        let (outcomes, report) = coordinator()
            .with_access_policy(Arc::new(DenyReadme))
            .extract_paths(vec![kept.clone(), vetoed.clone()])
            .await;

        assert!(outcomes.contains_key(&kept));
        assert!(!outcomes.contains_key(&vetoed));
        assert_eq!(report.skipped, 1);
    }
}
