//! mdpad - A terminal markdown editor with a live preview.
//!
//! # Usage
//!
//! ```bash
//! mdpad
//! mdpad notes.md
//! mdpad --theme dark --export-dir ~/exports --save
//! ```

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mdpad::app::App;
use mdpad::config::{
    ConfigFlags, ThemeMode, clear_config_flags, default_data_dir, global_config_path,
    load_config_flags, local_override_path, parse_flag_tokens, save_config_flags,
};
use mdpad::persistence::{FileStore, MemoryStore, PersistenceBridge};

/// A terminal markdown editor with a live preview
#[derive(Parser, Debug)]
#[command(name = "mdpad", version, about, long_about = None)]
struct Cli {
    /// Markdown file to import on startup
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Start in this theme instead of the saved one
    #[arg(long, value_enum)]
    theme: Option<ThemeMode>,

    /// Directory holding the saved buffer and theme
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Directory export files are written to
    #[arg(long, value_name = "DIR")]
    export_dir: Option<PathBuf>,

    /// Write diagnostic logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

// The terminal belongs to the UI, so logs go to a file or nowhere.
fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let filter = || EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into());
    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_writer(std::io::sink)
                .init();
        }
    }
    Ok(())
}

fn open_persistence(data_dir: PathBuf) -> PersistenceBridge {
    match FileStore::open_in(&data_dir) {
        Ok(store) => PersistenceBridge::new(store),
        Err(err) => {
            tracing::warn!(%err, dir = %data_dir.display(), "store.unavailable");
            PersistenceBridge::new(MemoryStore::default())
        }
    }
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.log_file.as_ref())?;

    let data_dir = effective.data_dir.clone().unwrap_or_else(default_data_dir);
    let export_dir = effective
        .export_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    tracing::info!(
        data_dir = %data_dir.display(),
        export_dir = %export_dir.display(),
        "startup"
    );

    let mut app = App::new(open_persistence(data_dir))
        .with_export_dir(export_dir)
        .with_theme(effective.theme)
        .with_initial_import(cli.file);

    app.run().context("Application error")
}
