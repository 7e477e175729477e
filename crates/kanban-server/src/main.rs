mod admin;
mod cli;
mod output;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
use kanban_core::AppConfig;
use kanban_server::{board_script_file, build_router, AppState};
use tracing_subscriber::EnvFilter;

fn init_tracing() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("KANBAN_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open debug log {}", log_path))?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        // stdout is reserved for command output.
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }
    Ok(())
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let state = Arc::new(AppState::from_config(&config));
    if !state.store.exists().await {
        tracing::warn!(
            "{} does not exist yet; run `kanban-server init` to create it",
            state.store.path().display()
        );
    }

    let script = board_script_file(&config.server.public_dir);
    if !script.exists() {
        tracing::warn!(
            "{} is missing; cards cannot be dragged until `cargo xtask dnd` builds it",
            script.display()
        );
    }

    let app = build_router(state, &config.server.public_dir);
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("KanbanPro listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await?,
        Commands::Check => admin::check(&config).await,
        Commands::Init { force } => admin::init(&config, force).await,
    }

    Ok(())
}
