//! LSP Backend implementation for capslock
//!
//! Provides lifecycle handlers, document synchronization, and the feature
//! requests (completion, code actions, commands) for the LSP server.
//!
//! Created by M&K (c)2025 The LibraxisAI Team

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::{Mutex, RwLock};
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::request::ApplyWorkspaceEdit;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::actions::{self, ServerCommand};
use crate::completion;
use crate::config::ServerConfig;
use crate::diagnostics::{compute_diagnostics, limit_problems};
use crate::documents::DocumentStore;
use crate::session::Session;

/// capslock LSP backend state
pub struct Backend {
    /// LSP client for sending notifications/requests
    client: Client,
    /// Open documents (uri -> full text)
    documents: DocumentStore,
    /// Lifecycle state machine, shared with the serve loop
    session: Arc<Session>,
    /// Current settings
    config: RwLock<ServerConfig>,
    /// Serializes document mutation together with the diagnostics push
    sync_gate: Mutex<()>,
}

impl Backend {
    /// Create a new Backend instance with its own session
    pub fn new(client: Client) -> Self {
        Self::with_session(client, Arc::new(Session::new()))
    }

    /// Create a Backend that reports lifecycle changes into `session`
    pub fn with_session(client: Client, session: Arc<Session>) -> Self {
        Self {
            client,
            documents: DocumentStore::new(),
            session,
            config: RwLock::new(ServerConfig::default()),
            sync_gate: Mutex::new(()),
        }
    }

    /// Recompute and push diagnostics for a stored document
    ///
    /// Callers must hold `sync_gate`.
    async fn validate(&self, uri: Url) {
        let Some(diags) = self.documents.with_text(&uri, compute_diagnostics) else {
            tracing::debug!("validate: {} is not open", uri);
            return;
        };

        let max_problems = self.config.read().await.max_number_of_problems;
        let diags = limit_problems(diags, max_problems);
        tracing::debug!("Publishing {} diagnostics for {}", diags.len(), uri);

        self.client.publish_diagnostics(uri, diags, None).await;
    }

    /// Whether a document sync notification may be processed now
    async fn accepts_notification(&self, method: &str) -> bool {
        match self.session.ensure_initialized().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Dropping {}: {}", method, e);
                false
            }
        }
    }

    /// Apply settings if they parse. Returns whether anything was applied.
    async fn apply_settings(&self, settings: &Value) -> bool {
        match ServerConfig::from_settings(settings) {
            Some(config) => {
                tracing::info!("Settings updated: {:?}", config);
                *self.config.write().await = config;
                true
            }
            None => false,
        }
    }
}

/// Capabilities advertised from `initialize`
pub fn server_capabilities() -> ServerCapabilities {
    ServerCapabilities {
        text_document_sync: Some(TextDocumentSyncCapability::Options(
            TextDocumentSyncOptions {
                open_close: Some(true),
                change: Some(TextDocumentSyncKind::FULL),
                save: Some(TextDocumentSyncSaveOptions::Supported(true)),
                ..Default::default()
            },
        )),
        completion_provider: Some(CompletionOptions {
            resolve_provider: Some(true),
            ..Default::default()
        }),
        code_action_provider: Some(CodeActionProviderCapability::Options(CodeActionOptions {
            code_action_kinds: Some(vec![CodeActionKind::QUICKFIX]),
            ..Default::default()
        })),
        execute_command_provider: Some(ExecuteCommandOptions {
            commands: ServerCommand::ids(),
            ..Default::default()
        }),
        ..Default::default()
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        self.session.initialize().await?;

        if let Some(options) = params.initialization_options {
            self.apply_settings(&options).await;
        }

        Ok(InitializeResult {
            server_info: Some(ServerInfo {
                name: "capslock-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
            capabilities: server_capabilities(),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        tracing::info!("capslock-lsp server initialized");

        self.client
            .log_message(MessageType::INFO, "capslock-lsp ready")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        tracing::info!("capslock-lsp server shutting down");
        self.session.shutdown().await?;
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        if !self.accepts_notification("didOpen").await {
            return;
        }
        let uri = params.text_document.uri;
        let content = params.text_document.text;
        tracing::debug!("did_open: {} ({} bytes)", uri, content.len());

        let _gate = self.sync_gate.lock().await;
        self.documents.open(uri.clone(), content);
        self.validate(uri).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        if !self.accepts_notification("didChange").await {
            return;
        }
        let uri = params.text_document.uri;
        tracing::debug!(
            "did_change: {} ({} fragments)",
            uri,
            params.content_changes.len()
        );

        // With FULL sync the last fragment holds the entire content
        let fragments = params.content_changes.into_iter().map(|change| change.text);

        let _gate = self.sync_gate.lock().await;
        if self.documents.change(uri.clone(), fragments) {
            self.validate(uri).await;
        }
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        if !self.accepts_notification("didSave").await {
            return;
        }
        let uri = params.text_document.uri;
        tracing::debug!("did_save: {}", uri);

        let _gate = self.sync_gate.lock().await;
        self.validate(uri).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        if !self.accepts_notification("didClose").await {
            return;
        }
        let uri = params.text_document.uri;
        tracing::debug!("did_close: {}", uri);

        let _gate = self.sync_gate.lock().await;
        self.documents.close(&uri);

        // Publish empty diagnostics to clear any shown in the editor
        self.client.publish_diagnostics(uri, vec![], None).await;
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        if !self.accepts_notification("didChangeConfiguration").await {
            return;
        }
        if !self.apply_settings(&params.settings).await {
            return;
        }

        self.client
            .log_message(MessageType::INFO, "capslock-lsp settings updated")
            .await;

        let _gate = self.sync_gate.lock().await;
        for uri in self.documents.uris() {
            self.validate(uri).await;
        }
    }

    async fn did_change_watched_files(&self, params: DidChangeWatchedFilesParams) {
        tracing::debug!("did_change_watched_files: {} changes", params.changes.len());
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        self.session.ensure_initialized().await?;
        tracing::debug!(
            "completion: {} at {:?}",
            params.text_document_position.text_document.uri,
            params.text_document_position.position
        );

        Ok(Some(CompletionResponse::Array(
            completion::list_completions(),
        )))
    }

    async fn completion_resolve(&self, item: CompletionItem) -> Result<CompletionItem> {
        self.session.ensure_initialized().await?;
        tracing::debug!("completion_resolve: {}", item.label);

        Ok(completion::resolve_completion(item))
    }

    async fn code_action(&self, params: CodeActionParams) -> Result<Option<CodeActionResponse>> {
        self.session.ensure_initialized().await?;
        tracing::debug!(
            "code_action: {} at {:?} ({} diagnostics in context)",
            params.text_document.uri,
            params.range,
            params.context.diagnostics.len()
        );

        let code_actions: Vec<CodeActionOrCommand> = actions::code_actions_for(&params)
            .into_iter()
            .map(CodeActionOrCommand::CodeAction)
            .collect();

        if code_actions.is_empty() {
            Ok(None)
        } else {
            Ok(Some(code_actions))
        }
    }

    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<Value>> {
        self.session.ensure_initialized().await?;
        tracing::debug!("execute_command: {}", params.command);

        let Some(command) = ServerCommand::parse(&params.command, &params.arguments)? else {
            return Ok(None);
        };

        let edit = ApplyWorkspaceEditParams {
            label: Some(command.title().to_string()),
            edit: command.workspace_edit(),
        };

        match self.client.send_request::<ApplyWorkspaceEdit>(edit).await {
            Ok(response) if response.applied => {
                tracing::debug!("{} applied", command.id());
            }
            Ok(response) => {
                tracing::warn!(
                    "Client declined {}: {}",
                    command.id(),
                    response.failure_reason.unwrap_or_default()
                );
            }
            Err(e) => {
                tracing::warn!("applyEdit for {} failed: {}", command.id(), e);
            }
        }

        Ok(None)
    }
}
