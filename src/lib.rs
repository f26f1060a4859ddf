//! Outliner Library
//!
//! Extracts structural definitions (functions, classes, methods, types,
//! sections) from source files across many languages and emits compact,
//! line-range-bounded summaries usable as a navigable outline.

pub mod coordinator;
pub mod engine;
pub mod error;
pub mod processing;
pub mod synthesis;
pub mod types;

pub use coordinator::{AccessPolicy, AllowAll, ExtractionCoordinator};
pub use error::ExtractionError;
pub use processing::{Language, LanguageDetector};
pub use synthesis::{synthesize, SynthesisPolicy};
pub use types::{BatchReport, DefinitionRecord, ExtractionConfig, FileOutcome};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::coordinator::{AccessPolicy, AllowAll, ExtractionCoordinator};
    pub use crate::error::ExtractionError;
    pub use crate::processing::{Language, LanguageDetector};
    pub use crate::synthesis::SynthesisPolicy;
    pub use crate::types::*;
}

/// Default minimum lines a definition must span to be emitted
pub const DEFAULT_MIN_DEFINITION_LINES: usize = 4;

/// Default number of files processed concurrently in a batch
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Maximum source size for a single file (10MB)
pub const DEFAULT_MAX_FILE_SIZE: usize = 10 * 1024 * 1024;
