//! Urupemba - A terminal rich-text editor.
//!
//! # Usage
//!
//! ```bash
//! urupemba
//! urupemba --document notes.json
//! urupemba --mod-key super --save
//! ```

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use urupemba::app::App;
use urupemba::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use urupemba::document::DEFAULT_HISTORY_LIMIT;
use urupemba::hotkey::ModKey;
use urupemba::shell::DEFAULT_ROUTE;

/// A terminal rich-text editor with a formatting toolbar
#[derive(Parser, Debug)]
#[command(name = "urupemba", version, about, long_about = None)]
struct Cli {
    /// Route of the page to mount
    #[arg(long, default_value = DEFAULT_ROUTE)]
    route: String,

    /// Load the initial document from a JSON file
    #[arg(long, value_name = "FILE")]
    document: Option<PathBuf>,

    /// Modifier used by hotkeys ("mod+b" etc.)
    #[arg(long, value_enum)]
    mod_key: Option<ModKey>,

    /// Maximum number of undo steps kept
    #[arg(long, value_name = "N")]
    history_limit: Option<usize>,

    /// Write logs to a file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Do not capture the mouse
    #[arg(long)]
    no_mouse: bool,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into());
    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            // Stderr shares the terminal with the UI, so only warnings go there
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
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

    init_logging(effective.log_file.as_deref())?;
    tracing::debug!(?effective, "effective flags");

    if let Some(document) = &effective.document
        && !document.exists()
    {
        anyhow::bail!("Document not found: {}", document.display());
    }

    // Run the application
    let app = App::new()
        .with_route(cli.route)
        .with_document(effective.document)
        .with_mod_key(effective.mod_key.unwrap_or(ModKey::Auto))
        .with_history_limit(effective.history_limit.unwrap_or(DEFAULT_HISTORY_LIMIT))
        .with_mouse(!effective.no_mouse)
        .with_config_paths(
            Some(global_path.clone()),
            if local_path.exists() {
                Some(local_path.clone())
            } else {
                None
            },
        );

    app.run().context("Application error")
}
