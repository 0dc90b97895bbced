//! All-uppercase word diagnostics
//!
//! Flags every word made of two or more uppercase ASCII letters.
//!
//! Created by M&K (c)2025 The LibraxisAI Team

use std::sync::LazyLock;

use regex::Regex;
use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity, Position, Range};

use super::DIAGNOSTIC_SOURCE;

static UPPERCASE_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]{2,}\b").expect("uppercase pattern is valid"));

/// Generate diagnostics for all-uppercase words in a document
///
/// Lines are split on `\n`; matches come out in line order, then column order.
pub fn uppercase_diagnostics(text: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for (line_idx, line) in text.split('\n').enumerate() {
        let line_no = line_idx as u32;

        for found in UPPERCASE_WORD.find_iter(line) {
            let start = utf16_column(line, found.start());
            let end = start + utf16_len(found.as_str());

            diagnostics.push(Diagnostic {
                range: Range {
                    start: Position {
                        line: line_no,
                        character: start,
                    },
                    end: Position {
                        line: line_no,
                        character: end,
                    },
                },
                severity: Some(DiagnosticSeverity::WARNING),
                code: None,
                code_description: None,
                source: Some(DIAGNOSTIC_SOURCE.to_string()),
                message: format!("{} is all uppercase.", found.as_str()),
                related_information: None,
                tags: None,
                data: None,
            });
        }
    }

    diagnostics
}

/// Convert a byte offset within `line` to an LSP (UTF-16) column
fn utf16_column(line: &str, byte_offset: usize) -> u32 {
    utf16_len(&line[..byte_offset])
}

fn utf16_len(s: &str) -> u32 {
    s.chars().map(char::len_utf16).sum::<usize>() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(d: &Diagnostic) -> (u32, u32, u32, u32) {
        (
            d.range.start.line,
            d.range.start.character,
            d.range.end.line,
            d.range.end.character,
        )
    }

    #[test]
    fn test_two_lines_with_uppercase_words() {
        let diags = uppercase_diagnostics("let ABC = 1;\nlet x = DEF;");

        assert_eq!(diags.len(), 2);
        assert_eq!(span(&diags[0]), (0, 4, 0, 7));
        assert_eq!(diags[0].message, "ABC is all uppercase.");
        assert_eq!(span(&diags[1]), (1, 8, 1, 11));
        assert_eq!(diags[1].message, "DEF is all uppercase.");
    }

    #[test]
    fn test_no_uppercase_run() {
        assert!(uppercase_diagnostics("ok").is_empty());
        assert!(uppercase_diagnostics("").is_empty());
    }

    #[test]
    fn test_single_letter_is_not_flagged() {
        assert!(uppercase_diagnostics("let A = B;").is_empty());
    }

    #[test]
    fn test_mixed_case_word_is_not_flagged() {
        // No word boundary inside "ABc" or "xYZ"
        assert!(uppercase_diagnostics("ABc xYZ HTTPServer").is_empty());
    }

    #[test]
    fn test_severity_and_source() {
        let diags = uppercase_diagnostics("TODO");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, Some(DiagnosticSeverity::WARNING));
        assert_eq!(diags[0].source.as_deref(), Some("ex"));
    }

    #[test]
    fn test_ordering_is_line_then_column() {
        let diags = uppercase_diagnostics("ZZ AA\nBB CC DD\n\nEE");
        let spans: Vec<_> = diags.iter().map(span).collect();

        assert_eq!(
            spans,
            vec![
                (0, 0, 0, 2),
                (0, 3, 0, 5),
                (1, 0, 1, 2),
                (1, 3, 1, 5),
                (1, 6, 1, 8),
                (3, 0, 3, 2),
            ]
        );
        assert!(spans.windows(2).all(|w| (w[0].0, w[0].1) < (w[1].0, w[1].1)));
    }

    #[test]
    fn test_crlf_line_endings() {
        let diags = uppercase_diagnostics("FOO\r\nbar BAZ\r\n");
        assert_eq!(diags.len(), 2);
        assert_eq!(span(&diags[0]), (0, 0, 0, 3));
        assert_eq!(span(&diags[1]), (1, 4, 1, 7));
    }

    #[test]
    fn test_columns_are_utf16() {
        // 'ł' is 2 bytes in UTF-8 but a single UTF-16 unit
        let diags = uppercase_diagnostics("zażółć ABC");
        assert_eq!(diags.len(), 1);
        assert_eq!(span(&diags[0]), (0, 7, 0, 10));

        // The emoji takes two UTF-16 units
        let diags = uppercase_diagnostics("🙂 XY");
        assert_eq!(span(&diags[0]), (0, 3, 0, 5));
    }
}
