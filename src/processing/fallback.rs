//! Scan-based fallback parser for formats without a grammar.
//!
//! Produces `definition.section` captures for Markdown headings so the
//! synthesizer can treat heading-delimited sections exactly like grammar
//! captures. Two heading styles are recognized: ATX (`#` run + whitespace
//! + text, level = run length) and setext (a text line underlined with
//! `=` for level 1 or `-` for level 2).

use crate::engine::captures::{LineSpan, RawCapture};

/// Capture name attached to every fallback section.
pub const SECTION_CAPTURE: &str = "definition.section";

/// Scan a document for headings and emit one capture per section.
///
/// A section headed at line `i` with level `L` runs until just before the
/// next heading of level `<= L`, or to the end of the document.
pub fn scan_headings(source: &str) -> Vec<RawCapture> {
    let lines: Vec<&str> = source.lines().collect();
    let headings = collect_headings(&lines);

    let mut captures = Vec::with_capacity(headings.len());
    for (idx, &(start, level)) in headings.iter().enumerate() {
        let end = headings[idx + 1..]
            .iter()
            .find(|&&(_, next_level)| next_level <= level)
            .map(|&(next_start, _)| next_start - 1)
            .unwrap_or(lines.len().saturating_sub(1));

        captures.push(RawCapture {
            name: SECTION_CAPTURE.to_string(),
            span: LineSpan {
                start_line: start,
                end_line: end,
            },
            parent_span: None,
        });
    }

    captures
}

/// Collect `(line_index, level)` pairs for every heading in the document.
fn collect_headings(lines: &[&str]) -> Vec<(usize, usize)> {
    let mut headings = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if let Some(level) = atx_level(lines[i]) {
            headings.push((i, level));
            i += 1;
            continue;
        }

        // Setext: a plain text line followed by an underline row.
        if i + 1 < lines.len() && !lines[i].trim().is_empty() {
            if let Some(level) = underline_level(lines[i + 1]) {
                headings.push((i, level));
                i += 2;
                continue;
            }
        }

        i += 1;
    }

    headings
}

/// Level of an ATX heading, if the line is one.
fn atx_level(line: &str) -> Option<usize> {
    let trimmed = line.trim_start();
    let hashes = trimmed.chars().take_while(|&c| c == '#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }

    let rest = &trimmed[hashes..];
    if rest.starts_with(' ') || rest.starts_with('\t') {
        if rest.trim().is_empty() {
            return None;
        }
        return Some(hashes);
    }
    None
}

/// Level selected by a setext underline row, if the line is one.
fn underline_level(line: &str) -> Option<usize> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.chars().all(|c| c == '=') {
        return Some(1);
    }
    if trimmed.chars().all(|c| c == '-') {
        return Some(2);
    }
    None
}
