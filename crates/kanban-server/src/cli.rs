use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use kanban_core::AppConfig;

#[derive(Parser)]
#[command(name = "kanban-server")]
#[command(about = "KanbanPro board server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to the platform config path)
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Path to the board document (or set KANBAN_FILE env var)
    #[arg(long, value_name = "FILE", env = "KANBAN_FILE", global = true)]
    pub data_file: Option<PathBuf>,

    #[arg(long, global = true)]
    pub host: Option<String>,

    #[arg(long, env = "KANBAN_PORT", global = true)]
    pub port: Option<u16>,

    /// Directory of static assets served as-is
    #[arg(long, value_name = "DIR", global = true)]
    pub public_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Clone, Copy)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,
    /// Validate the board document and print a summary
    Check,
    /// Write a starter board document
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// Config file values with command-line and environment overrides on top.
    pub fn resolve_config(&self) -> anyhow::Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load_from(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => AppConfig::load(),
        };

        if let Some(data_file) = &self.data_file {
            config.storage.data_file = data_file.clone();
        }
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(public_dir) = &self.public_dir {
            config.server.public_dir = public_dir.clone();
        }
        Ok(config)
    }
}
