//! Quick fix code actions for capslock diagnostics
//!
//! Actions carry a command instead of an inline edit; the edit is produced
//! only when the client executes the command.
//!
//! Created by M&K (c)2025 The LibraxisAI Team

use tower_lsp::lsp_types::{CodeAction, CodeActionKind, CodeActionParams, Diagnostic, Url};

use super::commands::ServerCommand;
use crate::diagnostics::DIAGNOSTIC_SOURCE;

/// Build one quick fix per diagnostic in the request context that we produced
///
/// Diagnostics from other sources are skipped.
pub fn code_actions_for(params: &CodeActionParams) -> Vec<CodeAction> {
    let uri = &params.text_document.uri;

    params
        .context
        .diagnostics
        .iter()
        .filter(|diag| diag.source.as_deref() == Some(DIAGNOSTIC_SOURCE))
        .map(|diag| lower_case_fix(diag, uri))
        .collect()
}

/// Generate the "To Lower Case" quick fix for a single diagnostic
fn lower_case_fix(diagnostic: &Diagnostic, uri: &Url) -> CodeAction {
    let command = ServerCommand::ToLowerCase {
        uri: uri.clone(),
        range: diagnostic.range,
    };

    CodeAction {
        title: command.title().to_string(),
        kind: Some(CodeActionKind::QUICKFIX),
        diagnostics: Some(vec![diagnostic.clone()]),
        is_preferred: None,
        disabled: None,
        edit: None,
        command: Some(command.to_command()),
        data: None,
    }
}
