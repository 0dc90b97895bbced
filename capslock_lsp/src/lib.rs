//! capslock Language Server Protocol implementation
//!
//! Flags all-uppercase words, offers a lower-case quick fix, and serves a
//! small fixed completion list.
//!
//! Created by M&K (c)2025 The LibraxisAI Team

use std::process::ExitCode;
use std::sync::Arc;

use tower_lsp::{LspService, Server};

mod actions;
mod backend;
mod completion;
mod config;
mod diagnostics;
mod documents;
mod error;
mod session;

pub use backend::{Backend, server_capabilities};
pub use completion::CompletionKind;
pub use config::ServerConfig;
pub use diagnostics::{DIAGNOSTIC_SOURCE, compute_diagnostics};
pub use error::ServerError;
pub use session::{Session, SessionState};

/// Run the LSP server over stdio
///
/// Returns the process exit code once the client sends `exit` or disconnects.
pub async fn run_server() -> anyhow::Result<ExitCode> {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let session = Arc::new(Session::new());
    let (service, socket) = LspService::new({
        let session = Arc::clone(&session);
        move |client| Backend::with_session(client, session)
    });
    Server::new(stdin, stdout, socket).serve(service).await;

    Ok(session.exit().await)
}
