//! Session lifecycle for capslock LSP
//!
//! `Uninitialized -> Initialized -> ShuttingDown -> Exited`
//!
//! `initialize` is the only legal first step, `shutdown` requires an
//! initialized session, and `exit` is terminal from either live state.
//!
//! Created by M&K (c)2025 The LibraxisAI Team

use std::fmt;
use std::process::ExitCode;

use tokio::sync::RwLock;

use crate::error::ServerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Initialized,
    ShuttingDown,
    Exited,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Uninitialized => "uninitialized",
            SessionState::Initialized => "initialized",
            SessionState::ShuttingDown => "shutting down",
            SessionState::Exited => "exited",
        };
        f.write_str(name)
    }
}

/// Shared lifecycle state
///
/// Shared between the backend and the serve loop so the exit code can be
/// derived once the client disconnects.
#[derive(Debug)]
pub struct Session {
    state: RwLock<SessionState>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(SessionState::Uninitialized),
        }
    }

    pub async fn state(&self) -> SessionState {
        *self.state.read().await
    }

    /// `Uninitialized -> Initialized`
    pub async fn initialize(&self) -> Result<(), ServerError> {
        self.transition(SessionState::Initialized, |from| {
            from == SessionState::Uninitialized
        })
        .await
    }

    /// `Initialized -> ShuttingDown`
    pub async fn shutdown(&self) -> Result<(), ServerError> {
        self.transition(SessionState::ShuttingDown, |from| {
            from == SessionState::Initialized
        })
        .await
    }

    /// Enter the terminal state and report the process exit code.
    ///
    /// Exit is always honoured. The code is `0` only after a clean shutdown.
    pub async fn exit(&self) -> ExitCode {
        let mut state = self.state.write().await;
        let previous = std::mem::replace(&mut *state, SessionState::Exited);
        tracing::info!("Session exit (was {})", previous);

        match previous {
            SessionState::ShuttingDown => ExitCode::SUCCESS,
            _ => ExitCode::FAILURE,
        }
    }

    /// Guard for feature requests: only an initialized session serves them
    pub async fn ensure_initialized(&self) -> Result<(), ServerError> {
        match self.state().await {
            SessionState::Initialized => Ok(()),
            SessionState::Uninitialized => Err(ServerError::NotInitialized),
            SessionState::ShuttingDown | SessionState::Exited => Err(ServerError::ShuttingDown),
        }
    }

    async fn transition(
        &self,
        to: SessionState,
        allowed_from: impl FnOnce(SessionState) -> bool,
    ) -> Result<(), ServerError> {
        let mut state = self.state.write().await;
        let from = *state;

        if !allowed_from(from) {
            tracing::warn!("Rejected lifecycle transition {} -> {}", from, to);
            return Err(ServerError::InvalidTransition { from, to });
        }

        tracing::info!("Session {} -> {}", from, to);
        *state = to;
        Ok(())
    }
}
