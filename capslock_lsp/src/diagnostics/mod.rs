//! Diagnostics generation for capslock LSP
//!
//! Scans document text and produces LSP Diagnostic objects.
//!
//! Created by M&K (c)2025 The LibraxisAI Team

mod uppercase;

pub use uppercase::uppercase_diagnostics;

use tower_lsp::lsp_types::Diagnostic;

/// Source tag carried by every diagnostic this server emits.
///
/// Quick fixes are only offered for diagnostics with this source.
pub const DIAGNOSTIC_SOURCE: &str = "ex";

/// Collect all diagnostics for a document's text
pub fn compute_diagnostics(text: &str) -> Vec<Diagnostic> {
    uppercase_diagnostics(text)
}

/// Cap a diagnostic list at `max_problems`, keeping the earliest entries
pub fn limit_problems(mut diagnostics: Vec<Diagnostic>, max_problems: usize) -> Vec<Diagnostic> {
    if diagnostics.len() > max_problems {
        tracing::debug!(
            "Truncating {} diagnostics to {}",
            diagnostics.len(),
            max_problems
        );
        diagnostics.truncate(max_problems);
    }
    diagnostics
}
