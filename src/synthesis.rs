//! Capture-to-definition synthesis.
//!
//! Turns raw query captures into the final ordered outline. The pipeline
//! is deterministic and runs in a fixed order: filter, span resolution,
//! minimum-size filter, stable sort, deduplication, inline-markup
//! exclusion, labeling.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

use crate::engine::captures::RawCapture;
use crate::types::DefinitionRecord;
use crate::DEFAULT_MIN_DEFINITION_LINES;

lazy_static! {
    // A trimmed line consisting of a single markup tag, opening or
    // closing, possibly unterminated.
    static ref INLINE_MARKUP: Regex = Regex::new(r"^</?[A-Za-z][^>]*>?$").unwrap();
}

/// Default predicate for the inline-markup exclusion.
pub fn looks_like_inline_markup(line: &str) -> bool {
    INLINE_MARKUP.is_match(line)
}

/// Tunable synthesis policy.
///
/// `inline_markup` is replaceable: block-level queries in markup-hosting
/// grammars can spuriously match inline fragments, and what counts as one
/// is approximate policy rather than contract.
#[derive(Clone)]
pub struct SynthesisPolicy {
    /// Minimum lines a definition must span to be emitted.
    pub min_lines: usize,
    /// Predicate applied to the trimmed first line of candidates that did
    /// not come from a confirmed identifier capture.
    pub inline_markup: fn(&str) -> bool,
}

impl Default for SynthesisPolicy {
    fn default() -> Self {
        Self {
            min_lines: DEFAULT_MIN_DEFINITION_LINES,
            inline_markup: looks_like_inline_markup,
        }
    }
}

impl SynthesisPolicy {
    /// Policy with a custom minimum size.
    pub fn with_min_lines(min_lines: usize) -> Self {
        Self {
            min_lines,
            ..Default::default()
        }
    }
}

struct Candidate {
    start_line: usize,
    end_line: usize,
    /// Whether the candidate came from a `name.definition` capture.
    named: bool,
}

/// Synthesize the ordered definition list from raw captures.
///
/// Returns `None` when nothing qualifies, which callers report as an
/// empty outline rather than an error.
pub fn synthesize(
    captures: &[RawCapture],
    source_lines: &[&str],
    policy: &SynthesisPolicy,
) -> Option<Vec<DefinitionRecord>> {
    let mut candidates = Vec::new();

    for capture in captures {
        if !capture.name.contains("definition") {
            continue;
        }

        // An identifier capture stands in for its enclosing declaration.
        let named = capture.name.contains("name.definition");
        let span = if named {
            capture.parent_span.unwrap_or(capture.span)
        } else {
            capture.span
        };

        let line_count = span.end_line.saturating_sub(span.start_line) + 1;
        if line_count < policy.min_lines {
            continue;
        }

        candidates.push(Candidate {
            start_line: span.start_line,
            end_line: span.end_line,
            named,
        });
    }

    // Stable: ties keep capture order.
    candidates.sort_by_key(|c| c.start_line);

    let mut seen = HashSet::new();
    let mut records = Vec::new();

    for candidate in candidates {
        if !seen.insert((candidate.start_line, candidate.end_line)) {
            continue;
        }

        let label = source_lines
            .get(candidate.start_line)
            .map(|line| line.trim())
            .unwrap_or_default();

        if !candidate.named && (policy.inline_markup)(label) {
            continue;
        }

        records.push(DefinitionRecord {
            start_line: candidate.start_line,
            end_line: candidate.end_line,
            label: label.to_string(),
        });
    }

    if records.is_empty() {
        None
    } else {
        Some(records)
    }
}
