//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `drop_analyzer` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Ctrl-C handling
//! - User-facing summary on stderr (stdout carries the results)
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;
use tokio_util::sync::CancellationToken;

use drop_analyzer::initialization::{init_crypto_provider, init_logger_with};
use drop_analyzer::{run_analysis, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    // This allows setting OPENROUTER_API_KEY in .env without exporting it manually
    // Try loading from current directory first, then from the executable's directory
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    // Parse command-line arguments into Config
    let config = Config::parse();

    // Initialize logger based on config
    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    // Initialize crypto provider for TLS operations
    init_crypto_provider();

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::warn!("Interrupt received, finishing up");
                cancel.cancel();
            }
        }
    });

    match run_analysis(config, cancel).await {
        Ok(report) => {
            eprintln!(
                "Analyzed {} of {} domain{} ({} succeeded, {} failed) in {:.1}s{}",
                report.processed,
                report.total,
                if report.total == 1 { "" } else { "s" },
                report.successful,
                report.failed,
                report.elapsed_seconds,
                if report.cancelled { " - cancelled" } else { "" }
            );
            if let Some(path) = &report.output {
                eprintln!("Results saved in {}", path.display());
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("drop_analyzer error: {:#}", e);
            process::exit(1);
        }
    }
}
