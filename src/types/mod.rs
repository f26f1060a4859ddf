//! Core types for the extraction service.

mod config;
mod record;

pub use config::ExtractionConfig;
pub use record::{BatchReport, DefinitionRecord, FileOutcome};
