//! Configuration for extraction runs.

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_CONCURRENCY, DEFAULT_MAX_FILE_SIZE, DEFAULT_MIN_DEFINITION_LINES};

/// Coordinator-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Minimum lines a definition must span to appear in the outline.
    pub min_definition_lines: usize,

    /// Maximum files processed concurrently during a batch.
    pub concurrency: usize,

    /// Maximum source size in bytes; larger files are refused.
    pub max_file_size: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_definition_lines: DEFAULT_MIN_DEFINITION_LINES,
            concurrency: DEFAULT_CONCURRENCY,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl ExtractionConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            min_definition_lines: std::env::var("OUTLINER_MIN_LINES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MIN_DEFINITION_LINES),
            concurrency: std::env::var("OUTLINER_CONCURRENCY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_CONCURRENCY),
            max_file_size: std::env::var("OUTLINER_MAX_FILE_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_FILE_SIZE),
        }
    }

    /// Set the minimum definition size.
    pub fn with_min_lines(mut self, min_lines: usize) -> Self {
        self.min_definition_lines = min_lines;
        self
    }

    /// Set the batch concurrency.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}
