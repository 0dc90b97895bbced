//! Code actions and commands for capslock LSP
//!
//! Provides quick fixes for capslock diagnostics and the command that applies them.
//!
//! Created by M&K (c)2025 The LibraxisAI Team

mod commands;
mod quickfix;

pub use commands::ServerCommand;
pub use quickfix::code_actions_for;
