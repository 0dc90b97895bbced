//! Server error taxonomy
//!
//! Created by M&K (c)2025 The LibraxisAI Team

use std::borrow::Cow;

use tower_lsp::jsonrpc::{self, ErrorCode};

use crate::session::SessionState;

/// JSON-RPC code reserved by LSP for requests sent before `initialize`
const SERVER_NOT_INITIALIZED: i64 = -32002;

/// Errors surfaced to the client as JSON-RPC error replies
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ServerError {
    #[error("server not initialized")]
    NotInitialized,

    #[error("server is shutting down")]
    ShuttingDown,

    #[error("illegal lifecycle transition from {from} to {to}")]
    InvalidTransition { from: SessionState, to: SessionState },

    #[error("invalid arguments for command '{command}': {reason}")]
    InvalidArguments { command: String, reason: String },
}

impl From<ServerError> for jsonrpc::Error {
    fn from(err: ServerError) -> Self {
        let code = match err {
            ServerError::NotInitialized => ErrorCode::ServerError(SERVER_NOT_INITIALIZED),
            ServerError::ShuttingDown | ServerError::InvalidTransition { .. } => {
                ErrorCode::InvalidRequest
            }
            ServerError::InvalidArguments { .. } => ErrorCode::InvalidParams,
        };

        jsonrpc::Error {
            code,
            message: Cow::Owned(err.to_string()),
            data: None,
        }
    }
}
