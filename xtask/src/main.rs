//! `cargo xtask dnd` builds the drag-and-drop bundle the dashboard loads
//! from `/pkg/kanban_dnd.js`.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "xtask", about = "KanbanPro build helpers")]
struct Cli {
    #[command(subcommand)]
    command: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Build crates/kanban-dnd with wasm-pack into <public-dir>/pkg
    Dnd {
        /// Public directory the server is started with
        #[arg(long, default_value = "public")]
        public_dir: PathBuf,

        /// Unoptimized build, for faster iteration
        #[arg(long)]
        dev: bool,
    },
}

fn workspace_root() -> anyhow::Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask must live one level below the workspace root")
}

fn wasm_pack_args(crate_dir: &Path, out_dir: &Path, dev: bool) -> Vec<String> {
    let mut args = vec![
        "build".to_string(),
        crate_dir.display().to_string(),
        "--target".to_string(),
        "web".to_string(),
        "--out-dir".to_string(),
        out_dir.display().to_string(),
        "--out-name".to_string(),
        "kanban_dnd".to_string(),
        "--no-typescript".to_string(),
        if dev { "--dev" } else { "--release" }.to_string(),
    ];
    args.extend(["--".to_string(), "--features".to_string(), "web".to_string()]);
    args
}

fn build_dnd(public_dir: &Path, dev: bool) -> anyhow::Result<()> {
    let root = workspace_root()?;
    let public_dir = if public_dir.is_absolute() {
        public_dir.to_path_buf()
    } else {
        root.join(public_dir)
    };
    let out_dir = public_dir.join("pkg");
    let args = wasm_pack_args(&root.join("crates/kanban-dnd"), &out_dir, dev);

    eprintln!("wasm-pack {}", args.join(" "));
    let status = Command::new("wasm-pack")
        .args(&args)
        .current_dir(&root)
        .status()
        .context("Failed to run wasm-pack; install it with `cargo install wasm-pack`")?;
    if !status.success() {
        bail!("wasm-pack exited with {}", status);
    }
    eprintln!("Wrote {}", out_dir.join("kanban_dnd.js").display());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    match Cli::parse().command {
        Task::Dnd { public_dir, dev } => build_dnd(&public_dir, dev),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wasm_pack_args_enable_web_feature() {
        let args = wasm_pack_args(
            Path::new("/ws/crates/kanban-dnd"),
            Path::new("/ws/public/pkg"),
            false,
        );
        assert_eq!(args[..2], ["build", "/ws/crates/kanban-dnd"]);
        assert!(args.windows(2).any(|w| w == ["--target", "web"]));
        assert!(args.windows(2).any(|w| w == ["--out-dir", "/ws/public/pkg"]));
        assert!(args.windows(2).any(|w| w == ["--out-name", "kanban_dnd"]));
        assert!(args.contains(&"--release".to_string()));
        assert_eq!(args[args.len() - 3..], ["--", "--features", "web"]);
    }

    #[test]
    fn test_dev_build_skips_release_profile() {
        let args = wasm_pack_args(Path::new("d"), Path::new("o"), true);
        assert!(args.contains(&"--dev".to_string()));
        assert!(!args.contains(&"--release".to_string()));
    }
}
