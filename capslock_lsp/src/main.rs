//! capslock LSP Server binary entry point
//!
//! Created by M&K (c)2025 The LibraxisAI Team

use std::process::ExitCode;

use capslock_lsp::run_server;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "capslock-lsp")]
#[command(about = "Language server that flags all-uppercase words")]
#[command(version)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // stdout carries the protocol, logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.parse().unwrap_or_default()),
        )
        .init();

    tracing::info!("Starting capslock-lsp v{}", env!("CARGO_PKG_VERSION"));

    match run_server().await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("LSP server error: {}", e);
            ExitCode::FAILURE
        }
    }
}
