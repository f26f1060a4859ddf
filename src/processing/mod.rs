//! Processing module for file preparation.
//!
//! This module provides:
//! - Language detection from file extensions
//! - Source byte decoding and binary sniffing
//! - The scan-based fallback parser for grammarless formats

pub mod fallback;
pub mod language;
pub mod source;

pub use fallback::scan_headings;
pub use language::{Language, LanguageDetector};
pub use source::{decode_source, is_binary};
