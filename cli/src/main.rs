use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::warn;

mod cli;
mod commands;
mod config;
mod domain;
mod error;
mod infrastructure;
mod services;
mod tools;
mod ui;

use cli::{Cli, Commands};
use commands::copy::{self, CopyOptions};
use config::GroupToggles;

/// Cancel `token` on the first Ctrl-C
///
/// Pairs already being copied finish their pull/retag/push; no new pair starts.
fn cancel_on_interrupt(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, finishing in-flight images before stopping");
            token.cancel();
        }
    });
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging with LOGGING env var support
    // LOGGING=debug,info,warn,error or just LOGGING=debug
    let log_level = std::env::var("LOGGING")
        .or_else(|_| std::env::var("LOG_LEVEL"))
        .unwrap_or_else(|_| {
            if cli.verbose {
                "debug".to_string()
            } else {
                "info".to_string()
            }
        });

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(false) // Disable ANSI escape codes for cleaner output
        .init();

    let cancel = CancellationToken::new();
    cancel_on_interrupt(cancel.clone());

    // Execute command
    match cli.command {
        Commands::Copy {
            source_dockerhub,
            target_dockerhub,
            source_branch,
            target_branch,
            no_dockerhub,
            no_registry,
            no_ghcr_io,
            python_versions,
            groups_file,
            concurrency,
            attempts,
            retry_delay,
            container_tool,
            dry_run,
            report,
            ..
        } => {
            let options = CopyOptions {
                source_dockerhub,
                target_dockerhub,
                source_branch,
                target_branch,
                toggles: GroupToggles {
                    dockerhub: !no_dockerhub,
                    registry: !no_registry,
                    ghcr_io: !no_ghcr_io,
                },
                python_versions,
                groups_file: groups_file.map(PathBuf::from),
                concurrency: usize::from(concurrency),
                attempts,
                retry_delay,
                container_tool,
                dry_run,
                report: report.map(PathBuf::from),
            };

            let result = copy::execute(options, cancel).await?;

            // Return appropriate exit code
            let code = copy::exit_code(&result);
            if code != 0 {
                std::process::exit(code);
            }
        }
    }

    Ok(())
}
