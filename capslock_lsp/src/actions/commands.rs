//! Executable commands for capslock LSP
//!
//! Each known command id owns a typed payload. Arguments are validated here,
//! at the protocol boundary, before anything is executed.
//!
//! Created by M&K (c)2025 The LibraxisAI Team

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tower_lsp::lsp_types::{Command, Range, TextEdit, Url, WorkspaceEdit};

use crate::error::ServerError;

/// Command id for the lower-case quick fix
pub const TO_LOWER_CASE: &str = "myToLowerCase";

/// Title shown for the quick fix and its command
pub const TO_LOWER_CASE_TITLE: &str = "To Lower Case";

/// Literal text the lower-case fix writes over the flagged range
pub const REPLACEMENT_TEXT: &str = "foo";

/// A decoded server command
#[derive(Debug, Clone, PartialEq)]
pub enum ServerCommand {
    /// Replace `range` in `uri`
    ToLowerCase { uri: Url, range: Range },
}

impl ServerCommand {
    /// Command ids advertised in `executeCommandProvider`
    pub fn ids() -> Vec<String> {
        vec![TO_LOWER_CASE.to_string()]
    }

    /// Decode an `executeCommand` request.
    ///
    /// Unknown ids yield `Ok(None)`; malformed arguments for a known id are an
    /// error.
    pub fn parse(command: &str, arguments: &[Value]) -> Result<Option<Self>, ServerError> {
        match command {
            TO_LOWER_CASE => {
                let uri: Url = positional(command, arguments, 0, "uri")?;
                let range: Range = positional(command, arguments, 1, "range")?;
                Ok(Some(ServerCommand::ToLowerCase { uri, range }))
            }
            other => {
                tracing::debug!("Ignoring unknown command: {}", other);
                Ok(None)
            }
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            ServerCommand::ToLowerCase { .. } => TO_LOWER_CASE,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ServerCommand::ToLowerCase { .. } => TO_LOWER_CASE_TITLE,
        }
    }

    /// Encode as an LSP `Command` with positional arguments
    pub fn to_command(&self) -> Command {
        let arguments = match self {
            ServerCommand::ToLowerCase { uri, range } => vec![
                serde_json::to_value(uri).unwrap_or_default(),
                serde_json::to_value(range).unwrap_or_default(),
            ],
        };

        Command {
            title: self.title().to_string(),
            command: self.id().to_string(),
            arguments: Some(arguments),
        }
    }

    /// The edit the client is asked to apply when this command runs
    pub fn workspace_edit(&self) -> WorkspaceEdit {
        match self {
            ServerCommand::ToLowerCase { uri, range } => {
                let text_edit = TextEdit {
                    range: *range,
                    new_text: REPLACEMENT_TEXT.to_string(),
                };

                let mut changes = HashMap::new();
                changes.insert(uri.clone(), vec![text_edit]);

                WorkspaceEdit {
                    changes: Some(changes),
                    document_changes: None,
                    change_annotations: None,
                }
            }
        }
    }
}

/// Deserialize the argument at `index`, naming it in the error
fn positional<T: DeserializeOwned>(
    command: &str,
    arguments: &[Value],
    index: usize,
    name: &str,
) -> Result<T, ServerError> {
    let value = arguments
        .get(index)
        .ok_or_else(|| ServerError::InvalidArguments {
            command: command.to_string(),
            reason: format!("missing argument {} ({})", index, name),
        })?;

    serde_json::from_value(value.clone()).map_err(|e| ServerError::InvalidArguments {
        command: command.to_string(),
        reason: format!("argument {} ({}): {}", index, name, e),
    })
}
