//! Definition records and per-file outcomes.

use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// One synthesized definition: a line-range-bounded outline entry.
///
/// Lines are 0-based and inclusive on both ends; rendering layers add 1
/// at the output boundary. Invariant: `start_line <= end_line`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionRecord {
    /// First source line of the definition (0-based).
    pub start_line: usize,
    /// Last source line of the definition (0-based, inclusive).
    pub end_line: usize,
    /// Trimmed text of the definition's first source line.
    pub label: String,
}

impl DefinitionRecord {
    /// Number of source lines the definition spans.
    pub fn line_count(&self) -> usize {
        self.end_line.saturating_sub(self.start_line) + 1
    }
}

/// Result of extracting one file.
#[derive(Debug)]
pub enum FileOutcome {
    /// At least one definition was found. The list is ordered by
    /// `start_line` and free of duplicate spans.
    Definitions(Vec<DefinitionRecord>),
    /// Extraction ran cleanly but nothing qualified.
    Empty,
    /// The access policy vetoed the path before parsing.
    Skipped,
    /// Extraction failed; the error says at which stage.
    Failed(ExtractionError),
}

impl FileOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, FileOutcome::Failed(_))
    }

    /// The definition list, if any was produced.
    pub fn definitions(&self) -> Option<&[DefinitionRecord]> {
        match self {
            FileOutcome::Definitions(records) => Some(records),
            _ => None,
        }
    }
}

/// Counters for one batch extraction call.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Paths handed to the batch.
    pub total_files: usize,
    /// Files that yielded at least one definition.
    pub extracted: usize,
    /// Files that parsed cleanly but yielded nothing.
    pub empty: usize,
    /// Files vetoed by the access policy.
    pub skipped: usize,
    /// Files that failed at some stage.
    pub failed: usize,
}

impl BatchReport {
    pub fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Definitions(_) => self.extracted += 1,
            FileOutcome::Empty => self.empty += 1,
            FileOutcome::Skipped => self.skipped += 1,
            FileOutcome::Failed(_) => self.failed += 1,
        }
    }
}
